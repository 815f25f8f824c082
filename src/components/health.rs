use sports_feed::HealthEntry;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// One pill per source: name, event count, green or red dot.
pub struct HealthPills<'a> {
    pub entries: &'a [HealthEntry],
}

impl Widget for HealthPills<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let healthy = self.entries.iter().filter(|h| h.ok).count();
        let border = if !self.entries.is_empty() && healthy == 0 {
            Color::Red
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(format!(" Sources {healthy}/{} ", self.entries.len()));

        let line = if self.entries.is_empty() {
            Line::from(Span::styled("waiting for first refresh", Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(self.entries.iter().flat_map(pill_spans).collect::<Vec<_>>())
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

pub fn pill_spans(entry: &HealthEntry) -> Vec<Span<'static>> {
    let dot_color = if entry.ok { Color::Green } else { Color::Red };
    vec![
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::styled(entry.source.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {} events   ", entry.count),
            Style::default().fg(Color::Gray),
        ),
    ]
}
