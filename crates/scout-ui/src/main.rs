//! Sales Scout - main entry point.
//!
//! Loads the configuration, starts the tokio runtime that drives the search
//! backend, and runs the GPUI application.

use std::sync::Arc;

use scout_agent::{SearchController, SimulatedSearchBackend};
use scout_core::AppConfig;
use scout_ui::run_app;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Sales Scout starting...");

    let config = AppConfig::load();

    // GPUI has its own executor; backend timers need a tokio runtime that
    // outlives the app.
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("scout-backend")
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let backend = SimulatedSearchBackend::new().with_delay(config.search.delay());
    tracing::info!("Simulated backend ready (delay: {:?})", backend.delay());
    let controller = Arc::new(SearchController::new(Arc::new(backend)));

    tracing::info!("Starting GPUI application...");
    run_app(config, controller, runtime.handle().clone());
}
