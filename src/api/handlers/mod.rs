//! HTTP endpoint handlers.

pub mod system;
pub mod trigger;

use axum::Router;

use crate::app_state::AppState;

/// Composes all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(trigger::routes())
        .merge(system::routes())
}
