//! Change-notification event envelope as delivered by the trigger
//! infrastructure.
//!
//! The body wraps a serialized document snapshot: the written document's
//! resource name plus its fields as typed value wrappers. Fields of the
//! envelope this handler never reads (`oldValue`, `updateMask`) are
//! ignored on deserialization.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::TriggerValue;

/// One document-written event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEventDto {
    /// Origin of the event (the watched resource), when delivered in the
    /// body rather than as a transport header.
    #[serde(default)]
    pub source: Option<String>,

    /// Snapshot of the document after the write.
    pub value: DocumentSnapshotDto,
}

/// Serialized document snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshotDto {
    /// Full resource name of the written document.
    #[serde(default)]
    pub name: Option<String>,

    /// Field map of typed value wrappers.
    #[serde(default)]
    pub fields: HashMap<String, TriggerValue>,

    /// Creation time of the document.
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,

    /// Time of the write that fired this event.
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
}

impl TriggerEventDto {
    /// Best-effort name of the triggering resource for the logs.
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source
            .as_deref()
            .or(self.value.name.as_deref())
            .unwrap_or("<unknown>")
    }
}
