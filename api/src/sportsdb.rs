/// Wire types for TheSportsDB catalog listing.
/// Endpoint: https://www.thesportsdb.com/api/v1/json/3/all_sports.php
use crate::lenient;
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct AllSportsResponse {
    /// `null` when the service has nothing to list. Entries that are not
    /// objects are dropped.
    #[serde(default, deserialize_with = "lenient::list")]
    pub sports: Option<Vec<SportsDbSport>>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct SportsDbSport {
    #[serde(rename = "strSport", default, deserialize_with = "lenient::text")]
    pub str_sport: Option<String>,
}
