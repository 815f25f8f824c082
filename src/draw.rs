use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::symbols;
use tui::text::{Line, Span};
use tui::widgets::{
    Axis, BarChart, Block, BorderType, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row,
    Table, Tabs,
};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::charts::{
    SPORT_LABEL_LIMIT, sport_counts, trend_bounds_labels, trend_points, trend_y_max,
};
use crate::components::health::HealthPills;
use crate::components::kpis::{KpiTiles, Kpis};
use crate::state::app_state::TABLE_ROW_LIMIT;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::{DashboardAreas, LayoutAreas};
use sports_feed::{Event, EventStatus};

static TABS: &[&str; 2] = &["Dashboard", "Events"];

/// Frames in one live-marker pulse cycle.
pub const FRAME_COUNT: usize = 4;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Dashboard => draw_dashboard(f, layout.main, app),
            MenuItem::Events => draw_events_tab(f, layout.main, app),
            MenuItem::Help => draw_placeholder(
                f,
                layout.main,
                "Help: q=quit  1=Dashboard  2=Events  r=refresh  j/k=scroll  p=pause animations  f=full screen  \"=logs  Esc=back",
            ),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Dashboard => 0,
        MenuItem::Events => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let areas = DashboardAreas::from_rect(area);
    let events = app.state.feed.events();

    draw_header(f, areas.header, app);
    f.render_widget(
        KpiTiles { kpis: Kpis::from_events(events), pulse: pulse_on(app) },
        areas.kpis,
    );
    f.render_widget(HealthPills { entries: app.state.feed.health() }, areas.health);
    draw_sports_chart(f, areas.charts[0], events);
    draw_trend_chart(f, areas.charts[1], app);
    draw_events_table(f, areas.table, app);
}

fn draw_events_tab(f: &mut Frame, area: Rect, app: &App) {
    let [header, table] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
    draw_header(f, header, app);
    draw_events_table(f, table, app);
}

fn pulse_on(app: &App) -> bool {
    app.state.animation.paused || app.state.animation.frame < FRAME_COUNT / 2
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let live = app.state.feed.snapshot.as_ref().map(|s| s.live_count()).unwrap_or(0);
    let marker_style = if live > 0 && pulse_on(app) {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let refreshed = app
        .state
        .feed
        .last_refreshed
        .as_deref()
        .map(|t| format!("updated {t} (refresh #{})", app.state.feed.refresh_count))
        .unwrap_or_else(|| "loading...".to_string());
    let animations = if app.state.animation.paused { "  [animations paused]" } else { "" };

    let line = Line::from(vec![
        Span::styled("● ", marker_style),
        Span::styled(format!("{live} LIVE"), marker_style),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::raw(refreshed),
        Span::styled(
            format!("  |  every {}s", app.settings.refresh_interval.as_secs()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(animations, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_sports_chart(f: &mut Frame, area: Rect, events: &[Event]) {
    let block = default_border(Color::DarkGray).title(" Events by Sport ");
    let counts = sport_counts(events, SPORT_LABEL_LIMIT);
    if counts.is_empty() {
        draw_empty(f, area, block, "No events yet");
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = (inner_width / counts.len()).saturating_sub(1).clamp(3, 12) as u16;
    let data: Vec<(&str, u64)> = counts.iter().map(|(s, n)| (s.as_str(), *n)).collect();

    let chart = BarChart::default()
        .block(block)
        .data(data.as_slice())
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .label_style(Style::default().fg(Color::Gray));
    f.render_widget(chart, area);
}

fn draw_trend_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Live Events Trend ");
    let trend = &app.state.feed.trend;
    if trend.is_empty() {
        draw_empty(f, area, block, "Waiting for samples");
        return;
    }

    let points = trend_points(trend);
    let (first, last) = trend_bounds_labels(trend);
    let y_max = trend_y_max(trend);
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    let dataset = Dataset::default()
        .name("Live Events")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Magenta))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{}", y_max as u64))]),
        );
    f.render_widget(chart, area);
}

fn draw_events_table(f: &mut Frame, area: Rect, app: &App) {
    let events = app.state.feed.events();
    let shown = events.len().min(TABLE_ROW_LIMIT);
    let block = default_border(Color::White).title(format!(" Events {shown}/{} ", events.len()));

    if events.is_empty() {
        let msg = if app.state.feed.snapshot.is_some() {
            "No events returned by any source"
        } else {
            "Loading events..."
        };
        draw_empty(f, area, block, msg);
        return;
    }

    let header = Row::new(["Sport", "Match", "League", "Score", "Status", "Source"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = events
        .iter()
        .take(TABLE_ROW_LIMIT)
        .skip(app.state.table.scroll_offset)
        .map(event_row)
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(16),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).header(header).block(block).column_spacing(1);
    f.render_widget(table, area);
}

fn event_row(event: &Event) -> Row<'_> {
    Row::new(vec![
        Cell::from(event.sport.as_str()),
        Cell::from(event.matchup.as_str()),
        Cell::from(event.league.as_str()),
        Cell::from(event.score_line()),
        Cell::from(Span::styled(event.status_text.as_str(), status_style(event.status))),
        Cell::from(event.source.as_str()),
    ])
}

fn status_style(status: EventStatus) -> Style {
    match status {
        EventStatus::Live => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        EventStatus::Upcoming => Style::default().fg(Color::Yellow),
        EventStatus::Finished => Style::default().fg(Color::DarkGray),
    }
}

fn draw_empty(f: &mut Frame, area: Rect, block: Block, msg: &str) {
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    draw_empty(f, area, default_border(Color::DarkGray), msg);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
