//! Sonarr series resource (`/api/v3/series/{id}`).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Extra;

/// Authoritative series record as returned by Sonarr.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub ended: bool,
    pub path: String,
    pub year: i32,
    pub monitored: bool,
    #[serde(default)]
    pub seasons: Vec<Season>,
    pub statistics: SeriesStatistics,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Series {
    /// No further episodes are expected.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Every known episode has a file. Exact comparison: 99.999 is not complete.
    pub fn is_complete(&self) -> bool {
        self.statistics.percent_of_episodes == 100.0
    }

    pub fn unmonitor(&mut self) {
        self.monitored = false;
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={}, title={}, year={}, seasons={}, complete={}, monitored={}",
            self.id,
            self.title,
            self.year,
            self.seasons.len(),
            self.is_complete(),
            self.monitored
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStatistics {
    pub percent_of_episodes: f64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub season_number: i32,
    pub monitored: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<SeasonStatistics>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonStatistics {
    pub percent_of_episodes: f64,
    #[serde(flatten)]
    pub extra: Extra,
}
