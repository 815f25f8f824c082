use crate::config::FeedConfig;
use crate::espn::{EspnCompetitor, EspnEvent, ScoreboardResponse};
use crate::sportsdb::AllSportsResponse;
use crate::{Event, EventStatus};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

/// Catalog listings are reference rows, not fixtures; only the head is shown.
pub const CATALOG_LIMIT: usize = 8;

pub const ESPN_SOURCE: &str = "ESPN";
pub const SPORTSDB_SOURCE: &str = "TheSportsDB";

/// HTTP client for the ESPN scoreboard and TheSportsDB catalog endpoints.
#[derive(Debug, Clone)]
pub struct FeedApi {
    client: Client,
    espn_base: String,
    sportsdb_base: String,
    timeout: Duration,
}

impl Default for FeedApi {
    fn default() -> Self {
        Self::from_config(&FeedConfig::default())
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Status(StatusCode, String),
    Parsing(reqwest::Error, String),
    Config(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Status(status, url) => write!(f, "HTTP {status} from {url}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Parsing(e, _) => Some(e),
            ApiError::Status(..) | ApiError::Config(_) => None,
        }
    }
}

impl FeedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent("sportsdash/0.1 (terminal sports dashboard)")
                .build()
                .unwrap_or_default(),
            espn_base: config.espn_base.clone(),
            sportsdb_base: config.sportsdb_base.clone(),
            timeout: config.timeout,
        }
    }

    /// Fetch one ESPN scoreboard, e.g. `("soccer", "eng.1")`.
    pub async fn fetch_scoreboard(&self, sport: &str, league: &str) -> ApiResult<Vec<Event>> {
        let url = format!("{}/{sport}/{league}/scoreboard", self.espn_base);
        let raw: ScoreboardResponse = self.get(&url).await?;
        Ok(map_scoreboard(raw, sport, league))
    }

    /// Fetch TheSportsDB sport listing as placeholder events, truncated to
    /// [`CATALOG_LIMIT`].
    pub async fn fetch_catalog(&self) -> ApiResult<Vec<Event>> {
        let url = format!("{}/all_sports.php", self.sportsdb_base);
        let raw: AllSportsResponse = self.get(&url).await?;
        Ok(map_catalog(raw, Utc::now()))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status, url.to_owned()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → Event
// ---------------------------------------------------------------------------

fn map_scoreboard(raw: ScoreboardResponse, sport: &str, league: &str) -> Vec<Event> {
    let sport_name = raw
        .sport
        .and_then(|s| s.name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| sport.to_owned());
    let league_name = raw
        .league
        .and_then(|l| l.name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| league.to_owned());

    raw.events
        .unwrap_or_default()
        .iter()
        .map(|event| map_espn_event(event, &sport_name, &league_name))
        .collect()
}

fn map_espn_event(event: &EspnEvent, sport: &str, league: &str) -> Event {
    let competition = event.competitions.as_deref().and_then(|c| c.first());
    let home = competition.and_then(|c| c.side("home"));
    let away = competition.and_then(|c| c.side("away"));

    let home_team = team_name(home).unwrap_or_else(|| "Home".into());
    let away_team = team_name(away).unwrap_or_else(|| "Away".into());

    let status_text = event
        .status
        .as_ref()
        .and_then(|s| s.status_type.as_ref())
        .and_then(|t| t.description.clone())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "Scheduled".into());

    Event {
        sport: sport.to_owned(),
        league: league.to_owned(),
        matchup: event
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("{home_team} vs {away_team}")),
        home_score: score(home),
        away_score: score(away),
        status: EventStatus::classify(&status_text),
        status_text,
        home_team,
        away_team,
        source: ESPN_SOURCE.to_owned(),
        starts_at: event.date.as_deref().and_then(parse_timestamp),
    }
}

fn team_name(competitor: Option<&EspnCompetitor>) -> Option<String> {
    competitor?
        .team
        .as_ref()?
        .short_display_name
        .clone()
        .filter(|n| !n.is_empty())
}

fn score(competitor: Option<&EspnCompetitor>) -> Option<String> {
    competitor?.score.clone().filter(|s| !s.trim().is_empty())
}

/// Accepts RFC 3339 and ESPN's minute-precision `2025-03-01T15:00Z`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

// ---------------------------------------------------------------------------
// Mapping: TheSportsDB wire types → Event
// ---------------------------------------------------------------------------

fn map_catalog(raw: AllSportsResponse, now: DateTime<Utc>) -> Vec<Event> {
    raw.sports
        .unwrap_or_default()
        .into_iter()
        .take(CATALOG_LIMIT)
        .map(|s| {
            let sport = s
                .str_sport
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".into());
            Event {
                matchup: format!("Top competitions in {sport}"),
                sport,
                league: "Catalog".into(),
                home_team: String::new(),
                away_team: String::new(),
                home_score: None,
                away_score: None,
                status_text: "Reference".into(),
                status: EventStatus::Upcoming,
                source: SPORTSDB_SOURCE.into(),
                starts_at: Some(now),
            }
        })
        .collect()
}
