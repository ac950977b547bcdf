// =============================================================================
// FinSight Advisor — Main Entry Point
// =============================================================================
//
// The recommendation engine itself is pure; this binary wraps it in a small
// authenticated HTTP service with a hot-reloadable calibration file.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod allocation;
mod answers;
mod api;
mod app_state;
mod bounds;
mod calibration;
mod consistency;
mod engine;
mod rationale;
mod refine;
mod signal_catalog;
mod signal_processor;
mod stress;
mod types;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::calibration::Calibration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        FinSight Advisor — Starting Up                    ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let calibration_path = std::env::var("FINSIGHT_CALIBRATION")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("calibration.json"));

    let calibration = if calibration_path.exists() {
        Calibration::load(&calibration_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load calibration, using defaults");
            Calibration::default()
        })
    } else {
        info!(path = %calibration_path.display(), "No calibration file, using defaults");
        Calibration::default()
    };

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState::new(calibration, Some(calibration_path)));

    // ── 3. Start the API server ──────────────────────────────────────────
    let bind_addr =
        std::env::var("FINSIGHT_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".into());

    let app = api::rest::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            warn!("Shutdown signal received — stopping gracefully");
        })
        .await?;

    info!("FinSight Advisor shut down complete.");
    Ok(())
}
