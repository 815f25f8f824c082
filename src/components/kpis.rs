use sports_feed::{Event, EventStatus};
use std::collections::HashSet;
use tui::buffer::Buffer;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// Headline numbers for the KPI tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kpis {
    pub sports_covered: usize,
    pub live: usize,
    pub upcoming: usize,
    pub finished: usize,
}

impl Kpis {
    pub fn from_events(events: &[Event]) -> Self {
        let mut kpis = Kpis {
            sports_covered: events.iter().map(|e| e.sport.as_str()).collect::<HashSet<_>>().len(),
            ..Kpis::default()
        };
        for event in events {
            match event.status {
                EventStatus::Live => kpis.live += 1,
                EventStatus::Upcoming => kpis.upcoming += 1,
                EventStatus::Finished => kpis.finished += 1,
            }
        }
        kpis
    }
}

pub struct KpiTiles {
    pub kpis: Kpis,
    /// Highlight the live tile border on alternate animation frames.
    pub pulse: bool,
}

impl Widget for KpiTiles {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let tiles: [Rect; 4] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(area);
        let live_border = if self.pulse { Color::Red } else { Color::DarkGray };

        let specs = [
            ("Sports Covered", self.kpis.sports_covered, Color::Cyan, Color::DarkGray),
            ("Live Matches", self.kpis.live, Color::Red, live_border),
            ("Upcoming", self.kpis.upcoming, Color::Yellow, Color::DarkGray),
            ("Finished", self.kpis.finished, Color::Gray, Color::DarkGray),
        ];

        for (tile, (title, value, value_color, border_color)) in tiles.into_iter().zip(specs) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color))
                .title(format!(" {title} "));
            Paragraph::new(Line::from(value.to_string()))
                .style(Style::default().fg(value_color).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .block(block)
                .render(tile, buf);
        }
    }
}
