//! aima-server: the form relay and read-only quiz/catalog API.
//!
//! [`router::build_app_router`] is shared by the `aima serve` command and
//! the integration tests so both run the same middleware stack.

pub mod error;
pub mod router;
pub mod routes;
pub mod state;

use anyhow::{Context, Result};

use aima_mail::ServerSettings;

pub use router::build_app_router;
pub use state::AppState;

/// Bind and serve until Ctrl-C.
pub async fn serve(state: AppState, settings: &ServerSettings) -> Result<()> {
    let app = build_app_router(state, settings)?;

    let listener = tokio::net::TcpListener::bind(&settings.bind)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind))?;
    tracing::info!(addr = %listener.local_addr()?, "relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
