//! Trigger endpoint: the event-invoked entry point of the service.

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::post;

use crate::api::dto::TriggerEventDto;
use crate::app_state::AppState;
use crate::error::ProcessorError;

/// `POST /` — one change-notification event from the trigger
/// infrastructure.
///
/// Answers 204 on a normal completion, including the silent skip on
/// missing trigger fields. Abnormal failures surface as 5xx so the
/// hosting infrastructure records a failed invocation.
///
/// # Errors
///
/// Returns [`ProcessorError::InvalidEvent`] when the body is not a
/// decodable event envelope, and whatever the pipeline propagates.
pub async fn handle_trigger(
    State(state): State<AppState>,
    payload: Result<axum::Json<TriggerEventDto>, JsonRejection>,
) -> Result<StatusCode, ProcessorError> {
    let axum::Json(event) = payload.map_err(|e| ProcessorError::InvalidEvent(e.body_text()))?;

    state
        .processor
        .process(event.source_name(), &event.value.fields)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Trigger routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(handle_trigger))
}
