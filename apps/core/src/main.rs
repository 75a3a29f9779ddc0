// PulseBoard Assistant Backend Entry Point
// Conversational core of the social media dashboard

mod actors;
mod config;
mod conversation;
mod error;
mod generators;
mod intent;
mod models;
mod platform;
mod quick_actions;
mod routes;
mod transcript;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use actors::AssistantHandle;
use config::ServiceConfig;
use generators::TemplateReplyEngine;
use intent::IntentClassifier;
use platform::PlatformConnector;
use routes::{create_router, AppState};
use transcript::TranscriptLog;

/// Initializes the tracing stack. `RUST_LOG` overrides the default filter;
/// `PULSEBOARD_LOG_JSON` switches output to machine-readable JSON lines.
fn init_telemetry() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pulseboard_core=info,tower_http=info"));

    if std::env::var_os("PULSEBOARD_LOG_JSON").is_some() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .ok();
    }
}

/// Resolves when Ctrl+C or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_telemetry();

    let config = ServiceConfig::from_env().context("loading configuration")?;

    let transcript = config
        .transcript_path
        .clone()
        .map(TranscriptLog::new)
        .transpose()
        .context("opening transcript log")?;
    if let Some(ref log) = transcript {
        info!(
            "Transcript log enabled at {} ({} existing entries)",
            log.path().display(),
            log.entry_count()
        );
    }

    let classifier = Arc::new(IntentClassifier::new());
    let engine = Arc::new(TemplateReplyEngine::new());
    let assistant = AssistantHandle::with_components(
        config.assistant.clone(),
        Arc::clone(&classifier),
        Arc::clone(&engine),
        transcript,
    );

    let state = AppState {
        assistant,
        classifier,
        engine,
        platform: PlatformConnector::default(),
    };
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding to {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running server")?;

    Ok(())
}
