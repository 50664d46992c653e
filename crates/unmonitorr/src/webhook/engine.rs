//! Movie and series policies.
//!
//! Both policies are a straight line of gates. Every gateway failure is logged
//! and ends the current step; nothing is retried and nothing is returned to
//! the webhook sender. The returned [`Outcome`] only feeds logs and tests.

use std::fmt;

use tracing::{debug, info, warn};

use crate::arr::{MovieGateway, SeriesGateway};
use crate::models::{Series, SeriesWebhook, WebhookMovie};
use crate::settings::Policy;

/// What a policy did with a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The gateway is missing its uri or api key.
    GatewayDisabled,
    /// Turned off by policy.
    Skipped,
    /// The service does not know the item.
    NotFound,
    /// Series is not ended (when required) or not complete.
    Ineligible,
    Unmonitored,
    Deleted,
    /// A gateway call failed; see the logs.
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::GatewayDisabled => "gateway disabled",
            Outcome::Skipped => "skipped",
            Outcome::NotFound => "not found",
            Outcome::Ineligible => "ineligible",
            Outcome::Unmonitored => "unmonitored",
            Outcome::Deleted => "deleted",
            Outcome::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Episode-level and series-level results of the series policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesOutcome {
    pub episodes: Outcome,
    pub series: Outcome,
}

impl SeriesOutcome {
    fn both(outcome: Outcome) -> Self {
        Self {
            episodes: outcome,
            series: outcome,
        }
    }
}

// ============================================================================
// Movie policy
// ============================================================================

/// Delete the movie, or unmonitor it with a full-record write back.
pub async fn handle_movie(
    movie: &WebhookMovie,
    policy: &Policy,
    gateway: &dyn MovieGateway,
) -> Outcome {
    if gateway.disabled() {
        info!("Radarr client is missing a valid configuration, cannot access API");
        return Outcome::GatewayDisabled;
    }

    info!(%movie, "Handling movie");

    if policy.remove_media {
        info!(movie_id = movie.id, "Configured to delete movie");
        return match gateway.delete_movie(movie.id).await {
            Ok(()) => {
                info!(movie_id = movie.id, "Deleted movie");
                Outcome::Deleted
            }
            Err(e) => {
                warn!(movie_id = movie.id, kind = %e.kind(), error = %e, "Failed to delete movie");
                Outcome::Failed
            }
        };
    }

    info!(movie_id = movie.id, "Configured to unmonitor movie, fetching it from Radarr");
    let mut api_movie = match gateway.get_movie(movie.id).await {
        Ok(Some(m)) => m,
        Ok(None) => {
            warn!(%movie, "Movie not found in Radarr");
            return Outcome::NotFound;
        }
        Err(e) => {
            warn!(%movie, kind = %e.kind(), error = %e, "Unable to fetch movie from Radarr");
            return Outcome::Failed;
        }
    };
    debug!(movie = %api_movie, "Fetched movie from Radarr");

    api_movie.unmonitor();
    match gateway.update_movie(&api_movie).await {
        Ok(()) => {
            info!(movie = %api_movie, "Unmonitored movie");
            Outcome::Unmonitored
        }
        Err(e) => {
            warn!(movie_id = movie.id, kind = %e.kind(), error = %e, "Failed to unmonitor movie");
            Outcome::Failed
        }
    }
}

// ============================================================================
// Series policy
// ============================================================================

/// Whether series-level handling may proceed for a fetched series.
///
/// The ended check only applies when `handle_series_ended_only` is set;
/// completeness is always required.
pub fn series_eligible(series: &Series, policy: &Policy) -> bool {
    let can_handle = !policy.handle_series_ended_only || series.is_ended();
    can_handle && series.is_complete()
}

/// Unmonitor the notified episodes, then unmonitor or delete the whole series
/// once it is eligible.
pub async fn handle_series(
    webhook: &SeriesWebhook,
    policy: &Policy,
    gateway: &dyn SeriesGateway,
) -> SeriesOutcome {
    if gateway.disabled() {
        info!("Sonarr client is missing a valid configuration, cannot access API");
        return SeriesOutcome::both(Outcome::GatewayDisabled);
    }

    let series = &webhook.series;
    info!(%series, "Handling series");

    let episodes = if policy.handle_episodes {
        let ids = webhook.episode_ids();
        info!(series_id = series.id, episode_ids = ?ids, "Unmonitoring episodes");
        match gateway.unmonitor_episodes(&ids).await {
            Ok(()) => {
                info!(series_id = series.id, count = ids.len(), "Unmonitored episodes");
                Outcome::Unmonitored
            }
            Err(e) => {
                warn!(series_id = series.id, kind = %e.kind(), error = %e, "Failed to unmonitor episodes");
                Outcome::Failed
            }
        }
    } else {
        info!("Episode handling is disabled, skipping individual episodes");
        Outcome::Skipped
    };

    if !policy.handle_series {
        info!(%series, "Series handling is disabled, skipping series");
        return SeriesOutcome {
            episodes,
            series: Outcome::Skipped,
        };
    }

    let outcome = handle_whole_series(series.id, policy, gateway).await;
    SeriesOutcome {
        episodes,
        series: outcome,
    }
}

async fn handle_whole_series(id: i64, policy: &Policy, gateway: &dyn SeriesGateway) -> Outcome {
    info!(series_id = id, "Fetching series from Sonarr");
    let mut api_series = match gateway.get_series(id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            warn!(series_id = id, "Series not found in Sonarr");
            return Outcome::NotFound;
        }
        Err(e) => {
            warn!(series_id = id, kind = %e.kind(), error = %e, "Unable to fetch series from Sonarr");
            return Outcome::Failed;
        }
    };

    if !series_eligible(&api_series, policy) {
        let reason = if !api_series.is_complete() {
            "incomplete"
        } else {
            "ongoing"
        };
        info!(series = %api_series, reason, "Series cannot be handled further");
        return Outcome::Ineligible;
    }

    info!(series = %api_series, "Series is complete and ready to handle");
    if policy.remove_media {
        match gateway.delete_series(id, policy.exclude_series).await {
            Ok(()) => {
                info!(series_id = id, exclude = policy.exclude_series, "Deleted series");
                Outcome::Deleted
            }
            Err(e) => {
                warn!(series_id = id, kind = %e.kind(), error = %e, "Failed to delete series");
                Outcome::Failed
            }
        }
    } else {
        api_series.unmonitor();
        match gateway.update_series(&api_series).await {
            Ok(()) => {
                info!(series = %api_series, "Unmonitored series");
                Outcome::Unmonitored
            }
            Err(e) => {
                warn!(series_id = id, kind = %e.kind(), error = %e, "Failed to unmonitor series");
                Outcome::Failed
            }
        }
    }
}
