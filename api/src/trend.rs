use crate::Event;
use chrono::Local;
use serde::Serialize;
use std::collections::VecDeque;

pub const TREND_CAPACITY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSample {
    /// Local wall-clock time of the refresh, `HH:MM:SS`.
    pub at: String,
    pub live: usize,
}

/// Rolling window of live-event counts, one sample per refresh cycle.
#[derive(Debug, Clone)]
pub struct TrendRecorder {
    samples: VecDeque<TrendSample>,
    capacity: usize,
}

impl Default for TrendRecorder {
    fn default() -> Self {
        Self::with_capacity(TREND_CAPACITY)
    }
}

impl TrendRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { samples: VecDeque::with_capacity(capacity + 1), capacity }
    }

    /// Record the live count of `events`, stamped with the current local time.
    pub fn record(&mut self, events: &[Event]) {
        self.record_at(events, Local::now().format("%H:%M:%S").to_string());
    }

    pub fn record_at(&mut self, events: &[Event], at: impl Into<String>) {
        let live = events.iter().filter(|e| e.is_live()).count();
        self.samples.push_back(TrendSample { at: at.into(), live });
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Oldest first.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = &TrendSample> + '_ {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&TrendSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventStatus;

    fn live_events(n: usize) -> Vec<Event> {
        let mut events = vec![Event { status: EventStatus::Live, ..Default::default() }; n];
        events.push(Event { status: EventStatus::Upcoming, ..Default::default() });
        events.push(Event { status: EventStatus::Finished, ..Default::default() });
        events
    }

    #[test]
    fn record_counts_only_live_events() {
        let mut trend = TrendRecorder::new();
        trend.record_at(&live_events(3), "12:00:00");
        assert_eq!(
            trend.latest(),
            Some(&TrendSample { at: "12:00:00".into(), live: 3 })
        );
    }

    #[test]
    fn ten_records_keep_the_eight_most_recent_in_order() {
        let mut trend = TrendRecorder::new();
        for i in 0..10 {
            trend.record_at(&live_events(i), format!("t{i}"));
        }
        assert_eq!(trend.len(), TREND_CAPACITY);
        let labels: Vec<_> = trend.samples().map(|s| s.at.as_str()).collect();
        assert_eq!(labels, ["t2", "t3", "t4", "t5", "t6", "t7", "t8", "t9"]);
        let counts: Vec<_> = trend.samples().map(|s| s.live).collect();
        assert_eq!(counts, [2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn record_stamps_wall_clock_time() {
        let mut trend = TrendRecorder::new();
        trend.record(&[]);
        let sample = trend.latest().unwrap();
        assert_eq!(sample.live, 0);
        assert_eq!(sample.at.len(), 8);
        assert_eq!(sample.at.matches(':').count(), 2);
    }

    #[test]
    fn zero_capacity_still_keeps_latest_sample() {
        let mut trend = TrendRecorder::with_capacity(0);
        trend.record_at(&[], "a");
        trend.record_at(&[], "b");
        assert_eq!(trend.len(), 1);
        assert_eq!(trend.latest().unwrap().at, "b");
    }
}
