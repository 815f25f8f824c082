/// ESPN site v2 scoreboard wire types.
/// Endpoint: https://site.api.espn.com/apis/site/v2/sports/{sport}/{league}/scoreboard
///
/// Every field is optional and decoded leniently; the mapping in client.rs
/// supplies the defaults.
use crate::lenient;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    #[serde(default, deserialize_with = "lenient::object")]
    pub sport: Option<EspnNamed>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub league: Option<EspnNamed>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub events: Option<Vec<EspnEvent>>,
}

/// `sport` and `league` both carry a display `name`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnNamed {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: Option<String>, // ISO 8601, often minute precision ("2025-03-01T15:00Z")
    #[serde(default, deserialize_with = "lenient::object")]
    pub status: Option<EspnStatus>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type", default, deserialize_with = "lenient::object")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>, // "Scheduled", "In Progress", "Full Time", ...
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    #[serde(default, deserialize_with = "lenient::list")]
    pub competitors: Option<Vec<EspnCompetitor>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitor {
    #[serde(rename = "homeAway", default, deserialize_with = "lenient::text")]
    pub home_away: Option<String>, // "home" | "away"
    #[serde(default, deserialize_with = "lenient::object")]
    pub team: Option<EspnTeam>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub score: Option<String>, // usually a string, occasionally a bare number
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    #[serde(rename = "shortDisplayName", default, deserialize_with = "lenient::text")]
    pub short_display_name: Option<String>,
}

impl EspnCompetition {
    /// Competitor with the given `homeAway` role, if present.
    pub fn side(&self, role: &str) -> Option<&EspnCompetitor> {
        self.competitors
            .iter()
            .flatten()
            .find(|c| c.home_away.as_deref() == Some(role))
    }
}
