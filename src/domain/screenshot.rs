//! Screenshot reference decoded from a trigger payload.
//!
//! A document snapshot arrives as a field map of typed value wrappers
//! (`{"image": {"stringValue": "gs://..."}}`). Only string-typed values
//! are read; a field delivered with any other value type is treated as
//! absent.

use std::collections::HashMap;

use serde::Deserialize;

/// Typed value wrapper as delivered in a document snapshot field map.
///
/// The document store encodes every field as a single-key object naming
/// the value type. Non-string encodings (`integerValue`, `mapValue`, ...)
/// deserialize with `string_value = None` and are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerValue {
    /// The string payload, when the field is string-typed.
    #[serde(default)]
    pub string_value: Option<String>,
}

/// The three required fields of a `screenshots` document, all present
/// and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotRef {
    /// Object storage locator of the uploaded image (e.g. `gs://bucket/a.png`).
    pub image: String,
    /// Media MIME type of the image (e.g. `image/png`).
    pub mime_type: String,
    /// Unique transaction identifier, minted by the upload flow.
    pub transaction_id: String,
}

impl ScreenshotRef {
    /// Decodes the required trio from a snapshot field map.
    ///
    /// Returns `None` when any of `image`, `type`, or `ID` is missing,
    /// empty, or not string-typed. The caller treats `None` as a skip
    /// signal, never as an error.
    #[must_use]
    pub fn from_fields(fields: &HashMap<String, TriggerValue>) -> Option<Self> {
        let image = string_field(fields, "image")?;
        let mime_type = string_field(fields, "type")?;
        let transaction_id = string_field(fields, "ID")?;

        Some(Self {
            image,
            mime_type,
            transaction_id,
        })
    }
}

/// Reads a non-empty string-typed field, or `None`.
fn string_field(fields: &HashMap<String, TriggerValue>, name: &str) -> Option<String> {
    fields
        .get(name)?
        .string_value
        .clone()
        .filter(|v| !v.is_empty())
}
