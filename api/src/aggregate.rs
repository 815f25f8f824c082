use crate::client::{ApiResult, FeedApi, SPORTSDB_SOURCE};
use crate::config::{FeedConfig, SourceSpec};
use crate::{Event, HealthEntry, Snapshot};
use chrono::Utc;
use futures_util::future::join_all;
use log::{info, warn};
use std::cmp::Ordering;

/// One upstream the aggregator polls each cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// ESPN scoreboard for a single (sport, league) pair.
    Scoreboard(SourceSpec),
    /// TheSportsDB sport listing.
    Catalog,
}

impl FeedSource {
    pub fn label(&self) -> String {
        match self {
            FeedSource::Scoreboard(spec) => spec.health_label(),
            FeedSource::Catalog => SPORTSDB_SOURCE.to_string(),
        }
    }
}

/// How one source invocation settled. Failures are values, never panics or early returns.
#[derive(Debug)]
pub struct SourceOutcome {
    pub source: String,
    pub result: ApiResult<Vec<Event>>,
}

/// Fans out to every configured source, then merges and ranks what came back.
#[derive(Debug, Clone)]
pub struct Aggregator {
    api: FeedApi,
    sources: Vec<FeedSource>,
}

impl Aggregator {
    /// Scoreboards in configuration order, then the catalog.
    pub fn new(config: &FeedConfig) -> Self {
        let mut sources: Vec<FeedSource> = config
            .sources
            .iter()
            .cloned()
            .map(FeedSource::Scoreboard)
            .collect();
        sources.push(FeedSource::Catalog);
        Self::with_sources(FeedApi::from_config(config), sources)
    }

    pub fn with_sources(api: FeedApi, sources: Vec<FeedSource>) -> Self {
        Self { api, sources }
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    /// Run one refresh cycle. Never fails: a source that errors shows up as an
    /// unhealthy [`HealthEntry`] and contributes no events.
    pub async fn refresh(&self) -> Snapshot {
        let outcomes = self.settle_all().await;
        let mut snapshot = merge_outcomes(outcomes);
        snapshot.fetched_at = Some(Utc::now());

        let healthy = snapshot.health.iter().filter(|h| h.ok).count();
        info!(
            "refresh complete: {} events ({} live) from {healthy}/{} sources",
            snapshot.events.len(),
            snapshot.live_count(),
            snapshot.health.len()
        );
        snapshot
    }

    /// Start every source at once and wait for all of them, success or not.
    /// Outcomes come back in source order regardless of completion order.
    pub async fn settle_all(&self) -> Vec<SourceOutcome> {
        join_all(self.sources.iter().map(|source| self.fetch_source(source))).await
    }

    async fn fetch_source(&self, source: &FeedSource) -> SourceOutcome {
        let result = match source {
            FeedSource::Scoreboard(spec) => {
                self.api.fetch_scoreboard(&spec.sport, &spec.league).await
            }
            FeedSource::Catalog => self.api.fetch_catalog().await,
        };
        SourceOutcome { source: source.label(), result }
    }
}

/// Fold settled outcomes into a ranked snapshot. Health keeps outcome order.
pub fn merge_outcomes(outcomes: Vec<SourceOutcome>) -> Snapshot {
    let mut events = Vec::new();
    let mut health = Vec::with_capacity(outcomes.len());

    for outcome in outcomes {
        match outcome.result {
            Ok(batch) => {
                health.push(HealthEntry::healthy(&outcome.source, batch.len()));
                events.extend(batch);
            }
            Err(e) => {
                warn!("{} failed: {e}", outcome.source);
                health.push(HealthEntry::failed(&outcome.source));
            }
        }
    }

    sort_events(&mut events);
    Snapshot { events, health, fetched_at: None }
}

/// Live before upcoming before finished; earliest start first within a status.
/// Undated events trail the dated ones of the same status. Stable.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.status
            .rank()
            .cmp(&b.status.rank())
            .then_with(|| match (a.starts_at, b.starts_at) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiError;
    use crate::EventStatus;
    use chrono::{DateTime, Duration, TimeZone};
    use reqwest::StatusCode;
    use serde_json::json;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
    }

    fn event(matchup: &str, status: EventStatus, starts_at: Option<DateTime<Utc>>) -> Event {
        Event {
            matchup: matchup.into(),
            status,
            starts_at,
            ..Default::default()
        }
    }

    fn failed(source: &str) -> SourceOutcome {
        SourceOutcome {
            source: source.into(),
            result: Err(ApiError::Status(StatusCode::BAD_GATEWAY, format!("http://{source}"))),
        }
    }

    fn succeeded(source: &str, events: Vec<Event>) -> SourceOutcome {
        SourceOutcome { source: source.into(), result: Ok(events) }
    }

    #[test]
    fn sort_ranks_status_before_time() {
        let mut events = vec![
            event("finished-early", EventStatus::Finished, Some(at(1))),
            event("upcoming-late", EventStatus::Upcoming, Some(at(20))),
            event("live-late", EventStatus::Live, Some(at(18))),
            event("upcoming-early", EventStatus::Upcoming, Some(at(9))),
            event("live-early", EventStatus::Live, Some(at(12))),
        ];
        sort_events(&mut events);
        let order: Vec<_> = events.iter().map(|e| e.matchup.as_str()).collect();
        assert_eq!(
            order,
            ["live-early", "live-late", "upcoming-early", "upcoming-late", "finished-early"]
        );
    }

    #[test]
    fn sort_puts_undated_events_last_within_status() {
        let mut events = vec![
            event("undated", EventStatus::Upcoming, None),
            event("dated", EventStatus::Upcoming, Some(at(23))),
            event("finished", EventStatus::Finished, Some(at(0))),
        ];
        sort_events(&mut events);
        let order: Vec<_> = events.iter().map(|e| e.matchup.as_str()).collect();
        assert_eq!(order, ["dated", "undated", "finished"]);
    }

    #[test]
    fn sort_keeps_input_order_for_equal_keys() {
        let mut events = vec![
            event("first", EventStatus::Upcoming, Some(at(5))),
            event("second", EventStatus::Upcoming, Some(at(5))),
            event("third", EventStatus::Upcoming, Some(at(5))),
        ];
        sort_events(&mut events);
        let order: Vec<_> = events.iter().map(|e| e.matchup.as_str()).collect();
        assert_eq!(order, ["first", "second", "third"]);
    }

    #[test]
    fn sorted_output_respects_rank_then_time_for_every_pair() {
        let statuses = [EventStatus::Finished, EventStatus::Live, EventStatus::Upcoming];
        let mut events: Vec<Event> = (0..60u32)
            .map(|i| {
                let status = statuses[(i * 7 % 3) as usize];
                event(&i.to_string(), status, Some(at(0) + Duration::minutes(i64::from(i * 37 % 53))))
            })
            .collect();
        sort_events(&mut events);
        for pair in events.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.status.rank() <= b.status.rank());
            if a.status == b.status {
                assert!(a.starts_at <= b.starts_at);
            }
        }
    }

    #[test]
    fn merge_total_failure_is_empty_but_renderable() {
        let snapshot = merge_outcomes(vec![failed("A"), failed("B"), failed("C")]);
        assert!(snapshot.events.is_empty());
        assert_eq!(snapshot.health.len(), 3);
        assert!(snapshot.health.iter().all(|h| !h.ok && h.count == 0));
        assert!(snapshot.all_sources_failed());
    }

    #[test]
    fn merge_partial_failure_keeps_healthy_events() {
        let events = vec![
            event("y1", EventStatus::Upcoming, Some(at(3))),
            event("y2", EventStatus::Live, Some(at(4))),
        ];
        let snapshot = merge_outcomes(vec![failed("X"), succeeded("Y", events)]);
        assert_eq!(snapshot.events.len(), 2);
        assert_eq!(
            snapshot.health,
            vec![HealthEntry::failed("X"), HealthEntry::healthy("Y", 2)]
        );
        assert_eq!(snapshot.events[0].matchup, "y2");
    }

    #[test]
    fn merge_health_follows_outcome_order_not_event_order() {
        let snapshot = merge_outcomes(vec![
            succeeded("late", vec![event("f", EventStatus::Finished, Some(at(1)))]),
            succeeded("early", vec![event("l", EventStatus::Live, Some(at(2)))]),
        ]);
        let sources: Vec<_> = snapshot.health.iter().map(|h| h.source.as_str()).collect();
        assert_eq!(sources, ["late", "early"]);
        assert_eq!(snapshot.events[0].matchup, "l");
    }

    #[test]
    fn new_appends_catalog_after_scoreboards() {
        let aggregator = Aggregator::new(&FeedConfig::default());
        let sources = aggregator.sources();
        assert_eq!(sources.len(), 7);
        assert_eq!(sources[0].label(), "ESPN Football");
        assert_eq!(sources[6], FeedSource::Catalog);
        assert_eq!(sources[6].label(), "TheSportsDB");
    }

    // -----------------------------------------------------------------------
    // Against a mock HTTP server
    // -----------------------------------------------------------------------

    fn aggregator_for(server: &mockito::ServerGuard, specs: &[SourceSpec]) -> Aggregator {
        Aggregator::new(&FeedConfig {
            espn_base: server.url(),
            sportsdb_base: server.url(),
            sources: specs.to_vec(),
            ..FeedConfig::default()
        })
    }

    fn espn_event(name: &str, date: &str, status: &str) -> serde_json::Value {
        json!({
            "name": name,
            "date": date,
            "status": { "type": { "description": status } },
            "competitions": [{ "competitors": [
                { "homeAway": "home", "team": { "shortDisplayName": "H" }, "score": "1" },
                { "homeAway": "away", "team": { "shortDisplayName": "A" }, "score": "0" }
            ]}]
        })
    }

    #[tokio::test]
    async fn refresh_end_to_end_with_one_failing_source() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/soccer/eng.1/scoreboard")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "sport": { "name": "Soccer" },
                    "league": { "name": "Premier League" },
                    "events": [
                        espn_event("upcoming", "2025-03-01T09:00Z", "Scheduled"),
                        espn_event("live-later", "2025-03-01T14:00Z", "In Progress"),
                        espn_event("live-earlier", "2025-03-01T12:00Z", "Live"),
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;
        server
            .mock("GET", "/hockey/nhl/scoreboard")
            .with_status(500)
            .create_async()
            .await;
        let sports: Vec<_> = (0..20).map(|i| json!({ "strSport": format!("S{i}") })).collect();
        server
            .mock("GET", "/all_sports.php")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "sports": sports }).to_string())
            .create_async()
            .await;

        let aggregator = aggregator_for(
            &server,
            &[
                SourceSpec::new("A", "soccer", "eng.1"),
                SourceSpec::new("B", "hockey", "nhl"),
            ],
        );
        let snapshot = aggregator.refresh().await;

        assert_eq!(snapshot.events.len(), 11);
        assert_eq!(snapshot.events[0].matchup, "live-earlier");
        assert_eq!(snapshot.events[1].matchup, "live-later");
        assert!(snapshot.events[2..].iter().all(|e| e.status == EventStatus::Upcoming));
        assert_eq!(snapshot.events[2].matchup, "upcoming");
        assert_eq!(snapshot.count_by_status(EventStatus::Finished), 0);
        assert_eq!(
            snapshot.health,
            vec![
                HealthEntry::healthy("ESPN A", 3),
                HealthEntry::failed("ESPN B"),
                HealthEntry::healthy("TheSportsDB", 8),
            ]
        );
        assert!(snapshot.fetched_at.is_some());
    }

    #[tokio::test]
    async fn refresh_total_failure_does_not_raise() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(502)
            .expect(3)
            .create_async()
            .await;

        let aggregator = aggregator_for(
            &server,
            &[
                SourceSpec::new("A", "soccer", "eng.1"),
                SourceSpec::new("B", "hockey", "nhl"),
            ],
        );
        let snapshot = aggregator.refresh().await;

        assert!(snapshot.events.is_empty());
        assert_eq!(snapshot.health.len(), 3);
        assert!(snapshot.health.iter().all(|h| !h.ok && h.count == 0));
    }

    #[tokio::test]
    async fn settle_all_reports_each_source_once_in_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cricket/ipl/scoreboard")
            .with_status(200)
            .with_body(r#"{"events": []}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/all_sports.php")
            .with_status(404)
            .create_async()
            .await;

        let aggregator = aggregator_for(&server, &[SourceSpec::new("Cricket", "cricket", "ipl")]);
        let outcomes = aggregator.settle_all().await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].source, "ESPN Cricket");
        assert!(matches!(outcomes[0].result, Ok(ref v) if v.is_empty()));
        assert_eq!(outcomes[1].source, "TheSportsDB");
        assert!(outcomes[1].result.is_err());
    }
}
