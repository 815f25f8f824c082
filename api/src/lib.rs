pub mod aggregate;
pub mod client;
pub mod config;
pub mod espn;
mod lenient;
pub mod sportsdb;
pub mod trend;

pub use aggregate::{Aggregator, FeedSource, SourceOutcome};
pub use client::{ApiError, ApiResult, FeedApi};
pub use config::{FeedConfig, SourceSpec};
pub use trend::{TrendRecorder, TrendSample};

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Domain types, independent of any provider wire format
// ---------------------------------------------------------------------------

/// One normalized match or listing, whatever provider it came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Event {
    pub sport: String,
    pub league: String,
    pub matchup: String,
    pub home_team: String, // may be empty for catalog entries
    pub away_team: String,
    pub home_score: Option<String>, // None renders as a placeholder, never as 0
    pub away_score: Option<String>,
    pub status_text: String,
    pub status: EventStatus,
    pub source: String,
    pub starts_at: Option<DateTime<Utc>>,
}

impl Event {
    pub fn is_live(&self) -> bool {
        self.status == EventStatus::Live
    }

    /// Display score, e.g. `"Arsenal 2 : - Chelsea"`. `"TBD"` when neither side has one.
    pub fn score_line(&self) -> String {
        if self.home_score.is_none() && self.away_score.is_none() {
            return "TBD".to_string();
        }
        format!(
            "{} {} : {} {}",
            self.home_team,
            self.home_score.as_deref().unwrap_or("-"),
            self.away_score.as_deref().unwrap_or("-"),
            self.away_team
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Live,
    #[default]
    Upcoming,
    Finished,
}

impl EventStatus {
    /// Classify a provider's free-text status.
    ///
    /// Case-insensitive substring match, first match wins: "in progress" / "live"
    /// before "final" / "ended" / "complete". Anything else is upcoming.
    pub fn classify(status_text: &str) -> Self {
        let s = status_text.to_lowercase();
        if s.contains("in progress") || s.contains("live") {
            EventStatus::Live
        } else if s.contains("final") || s.contains("ended") || s.contains("complete") {
            EventStatus::Finished
        } else {
            EventStatus::Upcoming
        }
    }

    /// Sort weight: live first, finished last.
    pub fn rank(self) -> u8 {
        match self {
            EventStatus::Live => 0,
            EventStatus::Upcoming => 1,
            EventStatus::Finished => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Live => "live",
            EventStatus::Upcoming => "upcoming",
            EventStatus::Finished => "finished",
        }
    }
}

/// Per-source result of one refresh cycle. `ok == false` always carries `count == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthEntry {
    pub source: String,
    pub ok: bool,
    pub count: usize,
}

impl HealthEntry {
    pub fn healthy(source: impl Into<String>, count: usize) -> Self {
        Self { source: source.into(), ok: true, count }
    }

    pub fn failed(source: impl Into<String>) -> Self {
        Self { source: source.into(), ok: false, count: 0 }
    }
}

/// Everything one refresh cycle produced. Replaced wholesale on every refresh.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub events: Vec<Event>,
    pub health: Vec<HealthEntry>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn count_by_status(&self, status: EventStatus) -> usize {
        self.events.iter().filter(|e| e.status == status).count()
    }

    pub fn live_count(&self) -> usize {
        self.count_by_status(EventStatus::Live)
    }

    pub fn all_sources_failed(&self) -> bool {
        !self.health.is_empty() && self.health.iter().all(|h| !h.ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_live_keywords() {
        assert_eq!(EventStatus::classify("In Progress"), EventStatus::Live);
        assert_eq!(EventStatus::classify("LIVE"), EventStatus::Live);
        assert_eq!(EventStatus::classify("2nd Half - live"), EventStatus::Live);
    }

    #[test]
    fn classify_finished_keywords() {
        assert_eq!(EventStatus::classify("Final"), EventStatus::Finished);
        assert_eq!(EventStatus::classify("Final/OT"), EventStatus::Finished);
        assert_eq!(EventStatus::classify("Match Ended"), EventStatus::Finished);
        assert_eq!(EventStatus::classify("Complete"), EventStatus::Finished);
    }

    #[test]
    fn classify_defaults_to_upcoming() {
        assert_eq!(EventStatus::classify("Scheduled"), EventStatus::Upcoming);
        assert_eq!(EventStatus::classify(""), EventStatus::Upcoming);
        assert_eq!(EventStatus::classify("Postponed"), EventStatus::Upcoming);
    }

    #[test]
    fn classify_checks_live_before_finished() {
        assert_eq!(EventStatus::classify("Live - Final"), EventStatus::Live);
        assert_eq!(EventStatus::classify("final, in progress"), EventStatus::Live);
    }

    #[test]
    fn rank_orders_live_upcoming_finished() {
        assert!(EventStatus::Live.rank() < EventStatus::Upcoming.rank());
        assert!(EventStatus::Upcoming.rank() < EventStatus::Finished.rank());
    }

    #[test]
    fn score_line_without_scores_is_tbd() {
        let event = Event { home_team: "A".into(), away_team: "B".into(), ..Default::default() };
        assert_eq!(event.score_line(), "TBD");
    }

    #[test]
    fn score_line_fills_missing_side_with_dash() {
        let event = Event {
            home_team: "Arsenal".into(),
            away_team: "Chelsea".into(),
            home_score: Some("2".into()),
            ..Default::default()
        };
        assert_eq!(event.score_line(), "Arsenal 2 : - Chelsea");
    }

    #[test]
    fn zero_score_is_not_treated_as_absent() {
        let event = Event {
            home_team: "A".into(),
            away_team: "B".into(),
            home_score: Some("0".into()),
            away_score: Some("0".into()),
            ..Default::default()
        };
        assert_eq!(event.score_line(), "A 0 : 0 B");
    }

    #[test]
    fn failed_health_entry_has_zero_count() {
        let entry = HealthEntry::failed("ESPN Hockey");
        assert!(!entry.ok);
        assert_eq!(entry.count, 0);
    }

    #[test]
    fn snapshot_serializes_status_in_lowercase() {
        let snapshot = Snapshot {
            events: vec![Event { status: EventStatus::Live, ..Default::default() }],
            ..Default::default()
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["events"][0]["status"], "live");
    }

    #[test]
    fn all_sources_failed_requires_at_least_one_entry() {
        assert!(!Snapshot::default().all_sources_failed());
        let snapshot = Snapshot {
            health: vec![HealthEntry::failed("a"), HealthEntry::failed("b")],
            ..Default::default()
        };
        assert!(snapshot.all_sources_failed());
    }
}
