use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::server::AppState;

#[derive(Serialize)]
pub struct ReadyResponse {
    status: &'static str,
    radarr_enabled: bool,
    sonarr_enabled: bool,
}

pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Always ready; reports which arr clients currently have a uri and api key.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let settings = state.settings.snapshot().await;
    (
        StatusCode::OK,
        Json(ReadyResponse {
            status: "ok",
            radarr_enabled: settings.radarr_configured(),
            sonarr_enabled: settings.sonarr_configured(),
        }),
    )
}
