//! The patch merged into a `state` document after extraction.
//!
//! A `state` document also carries `error`, `active`, `image`, `ID`,
//! `message`, and `timestamp` fields owned by the upload flow and the UI.
//! This handler only ever sets `processed` and `event`; the merge write
//! leaves every other field untouched.

use serde::Serialize;

/// Exactly the fields this handler merges into `state/<transaction id>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatePatch {
    /// Whether the screenshot has been processed.
    pub processed: bool,
    /// The model's parsed extraction result, stored verbatim.
    pub event: serde_json::Value,
}

impl StatePatch {
    /// Builds the patch recorded after a successful extraction.
    #[must_use]
    pub fn completed(event: serde_json::Value) -> Self {
        Self {
            processed: true,
            event,
        }
    }
}
