use crate::app::MenuItem;
use chrono::Local;
use sports_feed::{Snapshot, TrendRecorder};

/// The events table never shows more rows than this.
pub const TABLE_ROW_LIMIT: usize = 140;

// ---------------------------------------------------------------------------
// Animation state
// ---------------------------------------------------------------------------

/// Purely cosmetic. Nothing here feeds back into the feed data.
#[derive(Debug, Default)]
pub struct AnimationState {
    /// Current frame index, wraps at the frame count passed to `advance`.
    pub frame: usize,
    /// Monotonic tick counter, frozen while paused.
    pub tick: u64,
    pub paused: bool,
}

impl AnimationState {
    pub fn advance(&mut self, frame_count: usize) {
        if self.paused {
            return;
        }
        self.tick = self.tick.wrapping_add(1);
        self.frame = (self.frame + 1) % frame_count.max(1);
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }
}

// ---------------------------------------------------------------------------
// Feed state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FeedState {
    /// `None` until the first refresh cycle lands.
    pub snapshot: Option<Snapshot>,
    pub trend: TrendRecorder,
    pub last_refreshed: Option<String>,
    pub refresh_count: u64,
}

impl FeedState {
    /// Replace the previous cycle's data wholesale and append a trend sample.
    pub fn apply(&mut self, snapshot: Snapshot) {
        self.trend.record(&snapshot.events);
        self.last_refreshed = Some(
            snapshot
                .fetched_at
                .map(|t| t.with_timezone(&Local))
                .unwrap_or_else(Local::now)
                .format("%H:%M:%S")
                .to_string(),
        );
        self.refresh_count += 1;
        self.snapshot = Some(snapshot);
    }

    pub fn events(&self) -> &[sports_feed::Event] {
        self.snapshot.as_ref().map(|s| s.events.as_slice()).unwrap_or(&[])
    }

    pub fn health(&self) -> &[sports_feed::HealthEntry] {
        self.snapshot.as_ref().map(|s| s.health.as_slice()).unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Events table state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TableState {
    pub scroll_offset: usize,
}

impl TableState {
    pub fn scroll_down(&mut self, row_count: usize) {
        let max = row_count.min(TABLE_ROW_LIMIT).saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Keep the offset valid after the row set shrank.
    pub fn clamp(&mut self, row_count: usize) {
        let max = row_count.min(TABLE_ROW_LIMIT).saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(max);
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub feed: FeedState,
    pub table: TableState,
    pub animation: AnimationState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sports_feed::{Event, EventStatus, HealthEntry};

    fn snapshot_with_live(live: usize, upcoming: usize) -> Snapshot {
        let mut events = vec![Event { status: EventStatus::Live, ..Default::default() }; live];
        events.extend(vec![Event::default(); upcoming]);
        Snapshot {
            events,
            health: vec![HealthEntry::healthy("ESPN Football", live + upcoming)],
            fetched_at: None,
        }
    }

    #[test]
    fn apply_replaces_events_and_appends_trend() {
        let mut feed = FeedState::default();
        feed.apply(snapshot_with_live(2, 1));
        feed.apply(snapshot_with_live(1, 0));

        assert_eq!(feed.events().len(), 1);
        assert_eq!(feed.health()[0].count, 1);
        assert_eq!(feed.refresh_count, 2);
        let lives: Vec<_> = feed.trend.samples().map(|s| s.live).collect();
        assert_eq!(lives, [2, 1]);
        assert!(feed.last_refreshed.is_some());
    }

    #[test]
    fn empty_feed_has_no_rows() {
        let feed = FeedState::default();
        assert!(feed.events().is_empty());
        assert!(feed.health().is_empty());
    }

    #[test]
    fn paused_animation_does_not_advance() {
        let mut animation = AnimationState::default();
        animation.advance(4);
        animation.toggle_paused();
        animation.advance(4);
        animation.advance(4);
        assert_eq!(animation.tick, 1);
        assert_eq!(animation.frame, 1);
        animation.toggle_paused();
        animation.advance(4);
        assert_eq!(animation.tick, 2);
    }

    #[test]
    fn table_scroll_is_bounded_by_row_limit() {
        let mut table = TableState::default();
        for _ in 0..500 {
            table.scroll_down(1000);
        }
        assert_eq!(table.scroll_offset, TABLE_ROW_LIMIT - 1);
        table.clamp(3);
        assert_eq!(table.scroll_offset, 2);
        table.scroll_up();
        assert_eq!(table.scroll_offset, 1);
    }
}
