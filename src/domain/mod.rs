//! Domain layer: trigger decoding and the record shapes exchanged with
//! the document store.
//!
//! This module contains the decoded screenshot reference extracted from a
//! trigger payload, the calendar-event shape the model is asked to
//! produce, and the exact patch merged into the `state` collection.

pub mod calendar_event;
pub mod screenshot;
pub mod state_patch;

pub use calendar_event::CalendarEvent;
pub use screenshot::{ScreenshotRef, TriggerValue};
pub use state_patch::StatePatch;
