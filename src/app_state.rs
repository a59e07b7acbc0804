//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::ImageProcessor;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The extraction pipeline, shared across concurrent invocations.
    pub processor: Arc<ImageProcessor>,
}
