//! Wire models for Radarr and Sonarr.
//!
//! Field names arrive in camelCase and are mapped to snake_case. Authoritative
//! records keep every field they do not model in an `extra` map, so a full
//! record PUT writes back exactly what was read.

pub mod radarr;
pub mod sonarr;
pub mod webhook;

pub use radarr::Movie;
pub use sonarr::{Season, SeasonStatistics, Series, SeriesStatistics};
pub use webhook::{MovieWebhook, SeriesWebhook, WebhookEpisode, WebhookMovie, WebhookSeries};

/// Unmodelled upstream fields, preserved verbatim.
pub type Extra = serde_json::Map<String, serde_json::Value>;
