use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use unmonitorr::config::Config;
use unmonitorr::server::{self, AppState};
use unmonitorr::settings::SettingsStore;

#[derive(Debug, Parser)]
#[command(name = "unmonitorr", version, about)]
struct Cli {
    /// Path to the YAML config file.
    #[arg(short, long, default_value = "unmonitorr.yaml")]
    config: PathBuf,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)
        .await
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let settings = SettingsStore::load(&config.settings_path)
        .await
        .with_context(|| format!("loading settings from {}", config.settings_path.display()))?;

    let snapshot = settings.snapshot().await;
    if !snapshot.radarr_configured() {
        warn!("Radarr is missing required configuration, movie handling disabled");
    }
    if !snapshot.sonarr_configured() {
        warn!("Sonarr is missing required configuration, series handling disabled");
    }
    info!(mode = snapshot.mode(), policy = ?snapshot.policy, "Settings loaded");

    let http = server::http_client(Duration::from_secs(config.server.arr_timeout_seconds))
        .context("building http client")?;
    let state = AppState::new(settings, http, config.server.admin_token.clone());
    let app = server::build_app(state, config.server.request_timeout_seconds);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins; otherwise `LOG_LEVEL` (debug, info, warn, error), default info.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match std::env::var("LOG_LEVEL")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str()
        {
            "debug" => "debug",
            "warn" | "warning" => "warn",
            "error" | "critical" => "error",
            _ => "info",
        };
        EnvFilter::new(format!("{level},hyper=warn,reqwest=warn"))
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => warn!("Server shutdown started: ctrl-c"),
        () = terminate => warn!("Server shutdown started: SIGTERM"),
    }
}
