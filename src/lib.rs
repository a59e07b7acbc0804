//! # autocal-processor
//!
//! Event-triggered extraction service for the autocal pipeline.
//!
//! When a document is written to the `screenshots` Firestore collection, the
//! trigger infrastructure delivers a change-notification event to this
//! service. The handler sends the referenced screenshot to Gemini with a
//! calendar-event extraction prompt and merge-writes the structured result
//! into the `state` collection. All inference is delegated to the hosted
//! model — this service is a coordination layer.
//!
//! ## Architecture
//!
//! ```text
//! Trigger infrastructure (HTTP CloudEvent)
//!     │
//!     ├── Trigger Handler (api/)
//!     │
//!     ├── ImageProcessor (service/)
//!     │       │
//!     │       ├── ScreenshotRef decode (domain/)
//!     │       ├── Gemini generateContent (genai/)
//!     │       └── Firestore merge write (persistence/)
//!     │
//!     └── state/<ID> document
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod genai;
pub mod persistence;
pub mod service;
