//! HTTP layer: the trigger endpoint, system endpoints, and router
//! composition.
//!
//! The trigger infrastructure POSTs events to `/`; there is no further
//! public API surface.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete router.
pub fn build_router() -> Router<AppState> {
    handlers::routes()
}
