use crate::client::{ApiError, ApiResult};
use std::time::Duration;

pub const ESPN_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports";
pub const SPORTSDB_V1: &str = "https://www.thesportsdb.com/api/v1/json/3";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default ESPN scoreboards: (label, sport, league).
const DEFAULT_SOURCES: [(&str, &str, &str); 6] = [
    ("Football", "soccer", "eng.1"),
    ("Cricket", "cricket", "ipl"),
    ("Hockey", "hockey", "nhl"),
    ("NBL/Basketball", "basketball", "nbl"),
    ("Tennis", "tennis", "atp"),
    ("Badminton", "badminton", "bwf"),
];

/// One ESPN scoreboard to poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub label: String,
    pub sport: String,
    pub league: String,
}

impl SourceSpec {
    pub fn new(label: &str, sport: &str, league: &str) -> Self {
        Self {
            label: label.to_string(),
            sport: sport.to_string(),
            league: league.to_string(),
        }
    }

    /// Parse `sport/league` or `sport/league=Label`. Without a label the
    /// sport identifier is title-cased.
    pub fn parse(raw: &str) -> ApiResult<Self> {
        let raw = raw.trim();
        let (path, label) = match raw.split_once('=') {
            Some((path, label)) => (path.trim(), Some(label.trim())),
            None => (raw, None),
        };

        let Some((sport, league)) = path.split_once('/') else {
            return Err(ApiError::Config(format!(
                "expected sport/league, got {raw:?}"
            )));
        };
        let (sport, league) = (sport.trim(), league.trim());
        if sport.is_empty() || league.is_empty() || league.contains('/') {
            return Err(ApiError::Config(format!(
                "expected sport/league, got {raw:?}"
            )));
        }

        let label = match label {
            Some(l) if !l.is_empty() => l.to_string(),
            Some(_) => return Err(ApiError::Config(format!("empty label in {raw:?}"))),
            None => to_title_case(sport),
        };

        Ok(Self::new(&label, sport, league))
    }

    /// Name used in health entries.
    pub fn health_label(&self) -> String {
        format!("ESPN {}", self.label)
    }
}

/// Everything the aggregator needs to know about its upstreams.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub espn_base: String,
    pub sportsdb_base: String,
    pub sources: Vec<SourceSpec>,
    pub timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            espn_base: ESPN_SITE_V2.to_string(),
            sportsdb_base: SPORTSDB_V1.to_string(),
            sources: DEFAULT_SOURCES
                .iter()
                .map(|(label, sport, league)| SourceSpec::new(label, sport, league))
                .collect(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FeedConfig {
    /// Defaults overridden by the process environment:
    ///
    /// - `SPORTSDASH_ESPN_BASE`, `SPORTSDASH_SPORTSDB_BASE`: provider base URLs
    /// - `SPORTSDASH_LEAGUES`: comma list of `sport/league[=Label]`
    /// - `SPORTSDASH_TIMEOUT_SECS`: per-request timeout
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base) = get("SPORTSDASH_ESPN_BASE") {
            config.espn_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(base) = get("SPORTSDASH_SPORTSDB_BASE") {
            config.sportsdb_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(leagues) = get("SPORTSDASH_LEAGUES") {
            config.sources = leagues
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(SourceSpec::parse)
                .collect::<ApiResult<Vec<_>>>()?;
        }
        if let Some(secs) = get("SPORTSDASH_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                ApiError::Config(format!("SPORTSDASH_TIMEOUT_SECS={secs:?}: {e}"))
            })?;
            config.timeout = Duration::from_secs(secs.max(1));
        }

        Ok(config)
    }
}

fn to_title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}
