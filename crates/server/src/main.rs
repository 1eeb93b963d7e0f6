//! Compliance Agent Server Entry Point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use compliance_agent_config::{load_settings, Settings};
use compliance_agent_server::downloads::spawn_sweeper;
use compliance_agent_server::{create_router, init_metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // env vars > config/{env}.* > config/default.* > defaults
    let env = std::env::var("COMPLIANCE_AGENT_ENV").ok();
    let config = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing(&config);

    tracing::info!("Starting Compliance Agent Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?config.environment,
        config_path = env.as_deref().unwrap_or("default"),
        "Configuration loaded"
    );

    let persistence =
        compliance_agent_persistence::init(&config).context("Failed to initialize persistence")?;

    // First use creates the pool and the schema
    match persistence.leads.ping().await {
        Ok(()) => tracing::info!("Lead store reachable"),
        Err(e) => tracing::warn!(error = %e, "Lead store unreachable at startup, will retry on use"),
    }

    let metrics_enabled = config.observability.metrics_enabled;
    let port = config.server.port;
    let host = config.server.host.clone();
    let sweep_every = Duration::from_secs(config.downloads.sweep_interval_secs.max(1));

    let mut state = AppState::from_settings(config, persistence)
        .context("Failed to initialize application state")?;

    if metrics_enabled {
        match init_metrics() {
            Ok(handle) => {
                tracing::info!("Initialized Prometheus metrics at /metrics");
                state = state.with_metrics(handle);
            }
            Err(e) => tracing::warn!(error = %e, "Metrics disabled"),
        }
    }

    let _sweeper = spawn_sweeper(Arc::clone(&state.downloads), sweep_every);

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("compliance_agent={},tower_http=debug", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}
