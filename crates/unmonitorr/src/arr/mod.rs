//! Gateway to the arr services (Radarr, Sonarr).
//!
//! Every call goes through [`ArrClient`], which turns transport, status and
//! body failures into a single [`ArrError`]. Nothing here panics or retries;
//! callers get a value or an error and decide whether to log and move on.
//!
//! The decision engine talks to the services through [`MovieGateway`] and
//! [`SeriesGateway`] so policies can be exercised without a network.

mod client;
mod error;
mod radarr;
mod sonarr;

use std::fmt;

use async_trait::async_trait;

use crate::models::{Movie, Series};

pub use client::ArrClient;
pub use error::{ArrError, ErrorKind};
pub use radarr::RadarrClient;
pub use sonarr::SonarrClient;

/// Which arr service a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrService {
    Radarr,
    Sonarr,
}

impl fmt::Display for ArrService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrService::Radarr => f.write_str("Radarr"),
            ArrService::Sonarr => f.write_str("Sonarr"),
        }
    }
}

/// Read/mutate operations on movies.
#[async_trait]
pub trait MovieGateway: Send + Sync {
    /// True when the uri or api key is missing.
    fn disabled(&self) -> bool;

    /// Fetch a movie. A 404 or empty body is `Ok(None)`.
    async fn get_movie(&self, id: i64) -> Result<Option<Movie>, ArrError>;

    async fn delete_movie(&self, id: i64) -> Result<(), ArrError>;

    /// Write back the full record.
    async fn update_movie(&self, movie: &Movie) -> Result<(), ArrError>;
}

/// Read/mutate operations on series and episodes.
#[async_trait]
pub trait SeriesGateway: Send + Sync {
    /// True when the uri or api key is missing.
    fn disabled(&self) -> bool;

    /// Fetch a series. A 404 or empty body is `Ok(None)`.
    async fn get_series(&self, id: i64) -> Result<Option<Series>, ArrError>;

    /// Delete a series, keeping its files on disk.
    async fn delete_series(&self, id: i64, add_import_list_exclusion: bool)
    -> Result<(), ArrError>;

    /// Write back the full record.
    async fn update_series(&self, series: &Series) -> Result<(), ArrError>;

    /// Unmonitor a batch of episodes in one call.
    async fn unmonitor_episodes(&self, episode_ids: &[i64]) -> Result<(), ArrError>;
}
