//! Processor error types with HTTP status code mapping.
//!
//! [`ProcessorError`] is the central error type for the service. Each
//! variant maps to a specific HTTP status code so the trigger
//! infrastructure can distinguish a normally-completed invocation from an
//! abnormal one. The two outbound clients carry their own narrower enums
//! ([`ModelError`], [`StoreError`]) because the pipeline handles specific
//! kinds differently at the write step.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 3001,
///     "message": "model call failed: ...",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Failure raised by the generative model client.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The inference service answered with a non-success status
    /// (quota exhausted, malformed locator, unsupported media type, ...).
    #[error("inference service error {status}: {message}")]
    Api {
        /// HTTP status returned by the service.
        status: u16,
        /// Error text from the response body.
        message: String,
    },

    /// The request never produced a response (connect, DNS, timeout).
    #[error("inference transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response carried no candidate text to parse.
    #[error("inference response contained no text")]
    EmptyResponse,
}

/// Failure raised by the document-store client.
///
/// The split matters: [`StoreError::Api`] is the one kind the pipeline
/// swallows at the write step; every other kind propagates.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store answered with a non-success status carrying a Google API
    /// error body.
    #[error("document store error {status}: {message}")]
    Api {
        /// HTTP status returned by the store.
        status: u16,
        /// Error text from the response body.
        message: String,
    },

    /// The request never produced a response (connect, DNS, timeout).
    #[error("document store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The patch could not be encoded for the wire.
    #[error("document store encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                |
/// |-----------|-------------------|----------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request            |
/// | 3000–3999 | Server/Downstream | 500 / 502                  |
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    /// The trigger body could not be decoded as a change-notification
    /// event envelope.
    #[error("invalid trigger event: {0}")]
    InvalidEvent(String),

    /// The model call failed; the invocation terminates abnormally.
    #[error("model call failed: {0}")]
    Model(#[from] ModelError),

    /// The model's response text was not valid JSON; the invocation
    /// terminates abnormally.
    #[error("extraction result is not valid JSON: {0}")]
    MalformedExtraction(#[from] serde_json::Error),

    /// A non-swallowed failure from the document store.
    #[error("state write failed: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ProcessorError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidEvent(_) => 1001,
            Self::Model(_) => 3001,
            Self::MalformedExtraction(_) => 3002,
            Self::Store(_) => 3003,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEvent(_) => StatusCode::BAD_REQUEST,
            Self::Model(_) => StatusCode::BAD_GATEWAY,
            Self::MalformedExtraction(_) | Self::Store(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProcessorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
