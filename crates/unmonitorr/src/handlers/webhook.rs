//! Webhook endpoint shared by Radarr and Sonarr.
//!
//! The sender always gets `200 OK` once the body parsed as JSON. Unknown
//! shapes, test events, disabled clients and upstream failures are only
//! visible in the logs, otherwise the arr services would keep retrying.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::server::AppState;
use crate::webhook::{self, Classification};

/// POST /radarr, POST /sonarr
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> StatusCode {
    debug!(?headers, "Received request headers");
    debug!(%payload, "Received request payload");

    let classification = webhook::classify(&payload);

    if classification == Classification::Unrecognized {
        warn!(
            ?headers,
            %payload,
            "Incoming payload could not be validated, did it originate from Sonarr or Radarr?"
        );
        return StatusCode::OK;
    }

    if classification.is_test() {
        info!(
            instance = classification.instance_name().unwrap_or_default(),
            "Received valid test payload"
        );
        return StatusCode::OK;
    }

    info!(
        event_type = classification.event_type().unwrap_or_default(),
        instance = classification.instance_name().unwrap_or_default(),
        "Received event payload"
    );

    // One snapshot for the whole decision.
    let settings = state.settings.snapshot().await;

    match classification {
        Classification::Movie(payload) => {
            let radarr = state.radarr(&settings);
            let outcome = webhook::handle_movie(&payload.movie, &settings.policy, &radarr).await;
            info!(movie_id = payload.movie.id, %outcome, "Finished handling movie");
        }
        Classification::Series(payload) => {
            let sonarr = state.sonarr(&settings);
            let outcome = webhook::handle_series(&payload, &settings.policy, &sonarr).await;
            info!(
                series_id = payload.series.id,
                episodes = %outcome.episodes,
                series = %outcome.series,
                "Finished handling series"
            );
        }
        Classification::Unrecognized => {}
    }

    debug!("Finished processing request");
    StatusCode::OK
}
