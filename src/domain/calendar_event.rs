//! Calendar event shape requested from the model.
//!
//! The pipeline itself stores the model's parsed JSON verbatim; this
//! typed view exists for the response-shape hint sent with the request
//! and for consumers reading the `state` collection.

use serde::{Deserialize, Serialize};

/// The main fields of a calendar event as extracted from a screenshot.
///
/// `start` and `end` are `YYYY-MM-DDTHH:MM:SS` strings in the time zone
/// the model inferred from the screenshot; when no duration is visible
/// the model is instructed to assume one hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Brief summary of the event.
    pub summary: String,
    /// Location of the event, when one is visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Short description of the event.
    pub description: String,
    /// Start date and time (`YYYY-MM-DDTHH:MM:SS`).
    pub start: String,
    /// End date and time (`YYYY-MM-DDTHH:MM:SS`).
    pub end: String,
}

impl CalendarEvent {
    /// Response-shape hint passed alongside the extraction request to
    /// bias the model toward compliant output.
    ///
    /// `location` is the one optional property.
    #[must_use]
    pub fn response_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "summary": {"type": "STRING"},
                "location": {"type": "STRING"},
                "description": {"type": "STRING"},
                "start": {"type": "STRING"},
                "end": {"type": "STRING"},
            },
            "required": ["summary", "description", "start", "end"],
        })
    }
}
