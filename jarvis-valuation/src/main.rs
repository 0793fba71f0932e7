//! jarvis-valuation service entry point.

use anyhow::{Context, Result};
use jarvis_common::config::Config;
use jarvis_common::logging::init_logging;
use jarvis_valuation::routes::SERVICE_NAME;
use jarvis_valuation::{build_router, AppState};
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> Result<()> {
    let startup_start = std::time::Instant::now();

    let config = Config::load_and_validate()?;
    init_logging(&config.observability, SERVICE_NAME);

    tracing::info!("Jarvis Valuation v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        training_cost_policy = ?config.valuation.training_cost_policy,
        external_value_basis = ?config.valuation.external_value_basis,
        productivity_ramp = config.valuation.apply_productivity_ramp,
        "Valuation policies loaded"
    );

    let state = AppState::from_config(&config);

    // Build router with CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = build_router(state).layer(cors);

    let addr = format!("{}:{}", config.bind_address(), config.valuation_port());

    let startup_duration = startup_start.elapsed();
    tracing::info!(
        duration_ms = startup_duration.as_millis() as u64,
        "Service initialized in {:?}",
        startup_duration
    );

    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
