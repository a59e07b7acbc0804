//! autocal-processor server entry point.
//!
//! Starts the Axum HTTP server that receives change-notification events
//! from the trigger infrastructure.

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use autocal_processor::api;
use autocal_processor::app_state::AppState;
use autocal_processor::config::ProcessorConfig;
use autocal_processor::genai::{GeminiClient, MODEL_ID};
use autocal_processor::persistence::FirestoreClient;
use autocal_processor::service::ImageProcessor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ProcessorConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        location = %config.location,
        model = MODEL_ID,
        "starting autocal-processor"
    );

    // Build the two long-lived clients, sharing one connection pool
    let http = reqwest::Client::new();
    let model = Arc::new(GeminiClient::new(http.clone(), &config));
    let store = Arc::new(FirestoreClient::new(http, &config));

    // Build the pipeline and application state
    let processor = Arc::new(ImageProcessor::new(model, store));
    let app_state = AppState { processor };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
