use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use reqwest::Client;
use tower_http::timeout::TimeoutLayer;

use crate::arr::{RadarrClient, SonarrClient};
use crate::handlers;
use crate::settings::{Settings, SettingsStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<SettingsStore>,
    pub http: Client,
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(settings: SettingsStore, http: Client, admin_token: Option<String>) -> Self {
        Self {
            settings: Arc::new(settings),
            http,
            admin_token: admin_token.map(Arc::from),
        }
    }

    /// Radarr client for one decision, built from a settings snapshot.
    pub fn radarr(&self, settings: &Settings) -> RadarrClient {
        RadarrClient::new(
            self.http.clone(),
            settings.radarr_uri.as_str(),
            settings.radarr_api_key.as_str(),
        )
    }

    /// Sonarr client for one decision, built from a settings snapshot.
    pub fn sonarr(&self, settings: &Settings) -> SonarrClient {
        SonarrClient::new(
            self.http.clone(),
            settings.sonarr_uri.as_str(),
            settings.sonarr_api_key.as_str(),
        )
    }
}

/// Outbound HTTP client. Idle connections are not kept, so each arr call
/// opens its own connection. A call running past `timeout` fails as a
/// transport error.
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .pool_max_idle_per_host(0)
        .timeout(timeout)
        .build()
}

/// Webhook routes sit outside the request timeout: the sender must get a 200
/// once the payload parsed, and a decision is never cut off between steps.
/// Slow arr calls are bounded by the outbound client instead.
pub fn build_app(state: AppState, request_timeout_secs: u64) -> Router {
    let webhooks = Router::new()
        .route("/radarr", post(handlers::webhook))
        .route("/sonarr", post(handlers::webhook))
        .with_state(state.clone());

    let api_v1 = Router::new()
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::put_settings),
        )
        .route("/test-arr", post(handlers::test_arr))
        .with_state(state.clone());

    Router::new()
        .route("/readyz", get(handlers::readyz))
        .with_state(state)
        .route("/livez", get(handlers::livez))
        .route("/version", get(handlers::version))
        .nest("/api/v1", api_v1)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(request_timeout_secs),
        ))
        .merge(webhooks)
}
