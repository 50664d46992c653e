//! Radarr movie resource (`/api/v3/movie/{id}`).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Extra;

/// Authoritative movie record as returned by Radarr.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub path: String,
    pub size_on_disk: i64,
    pub status: String,
    pub year: i32,
    pub monitored: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Movie {
    pub fn unmonitor(&mut self) {
        self.monitored = false;
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={}, title={}, path={}, size={}, monitored={}",
            self.id, self.title, self.path, self.size_on_disk, self.monitored
        )
    }
}
