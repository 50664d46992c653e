//! Admin endpoints: view and replace settings, probe an arr server.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};

use crate::arr::{ArrClient, ArrError, ArrService};
use crate::response;
use crate::server::AppState;
use crate::settings::Settings;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct SettingsResponse {
    #[serde(flatten)]
    settings: Settings,
    mode: &'static str,
    radarr_enabled: bool,
    sonarr_enabled: bool,
}

impl From<&Settings> for SettingsResponse {
    fn from(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
            mode: settings.mode(),
            radarr_enabled: settings.radarr_configured(),
            sonarr_enabled: settings.sonarr_configured(),
        }
    }
}

#[derive(Deserialize)]
pub struct TestArrRequest {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    client: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/settings
pub async fn get_settings(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    let settings = state.settings.snapshot().await;
    (StatusCode::OK, Json(SettingsResponse::from(&*settings))).into_response()
}

/// PUT /api/v1/settings
pub async fn put_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(settings): Json<Settings>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    info!("Received request to update the settings");

    let change = match state.settings.replace(settings).await {
        Ok(change) => change,
        Err(e) => {
            warn!(error = %e, "Failed to save settings");
            return response::internal_error(format!("Failed to save settings: {e}"))
                .into_response();
        }
    };

    let current = state.settings.snapshot().await;
    if change.radarr {
        info!("Radarr configuration updated");
        if !current.radarr_configured() {
            info!("Radarr client missing required configuration, API requests disabled");
        }
    }
    if change.sonarr {
        info!("Sonarr configuration updated");
        if !current.sonarr_configured() {
            info!("Sonarr client missing required configuration, API requests disabled");
        }
    }
    if change.policy {
        info!(policy = ?current.policy, "Handling rules updated");
    }
    if !change.is_empty() {
        info!("New settings have been saved");
    }

    (StatusCode::OK, Json(SettingsResponse::from(&*current))).into_response()
}

/// POST /api/v1/test-arr
///
/// Proxies a `GET {uri}/api` so a client can validate credentials before
/// saving them.
pub async fn test_arr(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<TestArrRequest>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    let uri = req.uri.unwrap_or_default();
    let api_key = req.api_key.unwrap_or_default();
    let service = match req.client.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("sonarr") => ArrService::Sonarr,
        _ => ArrService::Radarr,
    };

    let client = ArrClient::new(state.http.clone(), service, uri.trim(), api_key.trim());
    if client.disabled() {
        info!(%service, "Could not test arr server with missing uri or api key");
        return (StatusCode::UNAUTHORIZED, "URI or API KEY missing.").into_response();
    }

    info!(%service, uri = %uri.trim(), "Pinging arr server");
    match client.ping().await {
        Ok(body) => {
            info!(%service, "Validation success");
            debug!(%body, "Validation response");
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            info!(%service, kind = %e.kind(), error = %e, "Validation failed");
            (ping_error_status(&e), e.reason()).into_response()
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Check the bearer token when one is configured.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(ref expected) = state.admin_token else {
        return Ok(());
    };

    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(response::unauthorized("Invalid or missing admin token").into_response())
    }
}

fn ping_error_status(err: &ArrError) -> StatusCode {
    match err {
        ArrError::Response { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        ArrError::Disabled { .. } => StatusCode::UNAUTHORIZED,
        _ => StatusCode::BAD_GATEWAY,
    }
}
