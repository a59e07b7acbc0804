//! The extraction pipeline: decode trigger, call the model, merge the
//! result.
//!
//! Control flows strictly forward through the three stages with no
//! branching beyond the early skip on missing trigger fields. Model and
//! JSON-decode failures propagate so the hosting infrastructure records
//! an abnormal invocation; only a store-side API rejection at the write
//! step is swallowed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::{ScreenshotRef, StatePatch, TriggerValue};
use crate::error::{ProcessorError, StoreError};
use crate::genai::ExtractionModel;
use crate::persistence::StateStore;
use crate::service::prompt;

/// How an invocation ended, as far as the trigger infrastructure is
/// concerned. Both outcomes are a normal completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The extraction ran and the merge write was attempted.
    Processed,
    /// A required trigger field was missing; nothing was called or written.
    Skipped,
}

/// Orchestrates one invocation of the screenshot pipeline.
///
/// Holds the two long-lived clients behind their seams; both are
/// immutable after construction and shared across concurrent invocations.
#[derive(Clone)]
pub struct ImageProcessor {
    model: Arc<dyn ExtractionModel>,
    store: Arc<dyn StateStore>,
}

impl fmt::Debug for ImageProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageProcessor").finish_non_exhaustive()
    }
}

impl ImageProcessor {
    /// Creates a new `ImageProcessor`.
    #[must_use]
    pub fn new(model: Arc<dyn ExtractionModel>, store: Arc<dyn StateStore>) -> Self {
        Self { model, store }
    }

    /// Runs the pipeline for one change-notification event.
    ///
    /// `source` names the triggering document for the logs; `fields` is
    /// the delivered snapshot field map.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessorError`] when the model call fails, its output
    /// is not valid JSON, or the store fails with anything other than an
    /// API rejection. Missing trigger fields are a skip, not an error.
    pub async fn process(
        &self,
        source: &str,
        fields: &HashMap<String, TriggerValue>,
    ) -> Result<Outcome, ProcessorError> {
        tracing::info!(source, "triggered by document change");

        let Some(shot) = ScreenshotRef::from_fields(fields) else {
            tracing::warn!(?fields, "missing required fields in document, skipping");
            return Ok(Outcome::Skipped);
        };

        let instruction = prompt::instruction_now();
        let raw = self
            .model
            .extract(&shot.image, &shot.mime_type, &instruction)
            .await?;
        tracing::debug!(raw = %raw, "raw model response");

        let event: serde_json::Value = serde_json::from_str(&raw)?;
        let patch = StatePatch::completed(event);

        match self.store.merge_state(&shot.transaction_id, &patch).await {
            Ok(()) => {
                tracing::info!(
                    transaction_id = %shot.transaction_id,
                    "state document updated"
                );
                Ok(Outcome::Processed)
            }
            Err(StoreError::Api { status, message }) => {
                // A store rejection is visible in the logs only; the
                // invocation still completes normally.
                tracing::error!(
                    transaction_id = %shot.transaction_id,
                    status,
                    message = %message,
                    "state write rejected by store"
                );
                Ok(Outcome::Processed)
            }
            Err(other) => Err(other.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDateTime;

    use super::*;
    use crate::error::ModelError;

    const VALID_RESPONSE: &str = r#"{"summary":"Meeting","location":"Room 1","description":"desc","start":"2025-06-01T10:00:00","end":"2025-06-01T11:00:00"}"#;

    /// Captures every request; replies with a canned text or fails.
    struct MockModel {
        reply: Option<String>,
        requests: Mutex<Vec<(String, String, String)>>,
    }

    impl MockModel {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(String, String, String)> {
            let Ok(requests) = self.requests.lock() else {
                panic!("request log poisoned");
            };
            requests.clone()
        }
    }

    #[async_trait]
    impl ExtractionModel for MockModel {
        async fn extract(
            &self,
            image_uri: &str,
            mime_type: &str,
            instruction: &str,
        ) -> Result<String, ModelError> {
            let Ok(mut requests) = self.requests.lock() else {
                panic!("request log poisoned");
            };
            requests.push((
                image_uri.to_string(),
                mime_type.to_string(),
                instruction.to_string(),
            ));
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(ModelError::EmptyResponse),
            }
        }
    }

    /// What the mock store does with a write.
    enum StoreBehavior {
        Accept,
        RejectApi,
        FailTransport,
    }

    struct MockStore {
        behavior: StoreBehavior,
        writes: Mutex<Vec<(String, StatePatch)>>,
    }

    impl MockStore {
        fn new(behavior: StoreBehavior) -> Self {
            Self {
                behavior,
                writes: Mutex::new(Vec::new()),
            }
        }

        fn writes(&self) -> Vec<(String, StatePatch)> {
            let Ok(writes) = self.writes.lock() else {
                panic!("write log poisoned");
            };
            writes.clone()
        }
    }

    #[async_trait]
    impl StateStore for MockStore {
        async fn merge_state(
            &self,
            transaction_id: &str,
            patch: &StatePatch,
        ) -> Result<(), StoreError> {
            match self.behavior {
                StoreBehavior::Accept => {
                    let Ok(mut writes) = self.writes.lock() else {
                        panic!("write log poisoned");
                    };
                    writes.push((transaction_id.to_string(), patch.clone()));
                    Ok(())
                }
                StoreBehavior::RejectApi => Err(StoreError::Api {
                    status: 403,
                    message: "Missing or insufficient permissions.".to_string(),
                }),
                StoreBehavior::FailTransport => {
                    // An empty-host URL fails at build time, yielding a
                    // reqwest::Error without touching the network.
                    let Err(err) = reqwest::Client::new().get("http://").build() else {
                        panic!("expected an invalid request");
                    };
                    Err(StoreError::Transport(err))
                }
            }
        }
    }

    fn string_value(v: &str) -> TriggerValue {
        TriggerValue {
            string_value: Some(v.to_string()),
        }
    }

    fn valid_fields() -> HashMap<String, TriggerValue> {
        let mut fields = HashMap::new();
        fields.insert("image".to_string(), string_value("gs://bucket/a.png"));
        fields.insert("type".to_string(), string_value("image/png"));
        fields.insert("ID".to_string(), string_value("tx-1"));
        fields
    }

    fn make_processor(
        model: Arc<MockModel>,
        store: Arc<MockStore>,
    ) -> ImageProcessor {
        ImageProcessor::new(model, store)
    }

    #[tokio::test]
    async fn valid_payload_merges_processed_event() {
        let model = Arc::new(MockModel::replying(VALID_RESPONSE));
        let store = Arc::new(MockStore::new(StoreBehavior::Accept));
        let processor = make_processor(Arc::clone(&model), Arc::clone(&store));

        let outcome = processor.process("screenshots/tx-1", &valid_fields()).await;
        assert!(matches!(outcome, Ok(Outcome::Processed)));

        let writes = store.writes();
        let Some((id, patch)) = writes.first() else {
            panic!("expected exactly one write");
        };
        assert_eq!(writes.len(), 1);
        assert_eq!(id, "tx-1");
        assert!(patch.processed);

        // Round-trip: the stored event equals the parsed response exactly.
        let Ok(expected) = serde_json::from_str::<serde_json::Value>(VALID_RESPONSE) else {
            panic!("canned response must be valid JSON");
        };
        assert_eq!(patch.event, expected);
    }

    #[tokio::test]
    async fn missing_field_skips_without_calls() {
        for name in ["image", "type", "ID"] {
            let model = Arc::new(MockModel::replying(VALID_RESPONSE));
            let store = Arc::new(MockStore::new(StoreBehavior::Accept));
            let processor = make_processor(Arc::clone(&model), Arc::clone(&store));

            let mut fields = valid_fields();
            fields.remove(name);

            let outcome = processor.process("screenshots/tx-1", &fields).await;
            assert!(matches!(outcome, Ok(Outcome::Skipped)));
            assert!(model.requests().is_empty(), "model called despite missing {name}");
            assert!(store.writes().is_empty(), "write despite missing {name}");
        }
    }

    #[tokio::test]
    async fn model_receives_image_reference_and_timestamped_instruction() {
        let model = Arc::new(MockModel::replying(VALID_RESPONSE));
        let store = Arc::new(MockStore::new(StoreBehavior::Accept));
        let processor = make_processor(Arc::clone(&model), store);

        let Ok(Outcome::Processed) =
            processor.process("screenshots/tx-1", &valid_fields()).await
        else {
            panic!("expected a processed outcome");
        };

        let requests = model.requests();
        let Some((image, mime, instruction)) = requests.first() else {
            panic!("expected exactly one model call");
        };
        assert_eq!(image, "gs://bucket/a.png");
        assert_eq!(mime, "image/png");

        let Some(start) = instruction.find("is: ") else {
            panic!("instruction must carry the current instant");
        };
        let stamp = instruction.get(start + 4..start + 4 + 26).unwrap_or("");
        assert!(
            NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S%.f").is_ok(),
            "not a valid ISO-8601 instant: {stamp}"
        );
    }

    #[tokio::test]
    async fn model_failure_propagates_without_write() {
        let model = Arc::new(MockModel::failing());
        let store = Arc::new(MockStore::new(StoreBehavior::Accept));
        let processor = make_processor(model, Arc::clone(&store));

        let outcome = processor.process("screenshots/tx-1", &valid_fields()).await;
        assert!(matches!(outcome, Err(ProcessorError::Model(_))));
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn unparseable_response_propagates_without_write() {
        let model = Arc::new(MockModel::replying("not json at all"));
        let store = Arc::new(MockStore::new(StoreBehavior::Accept));
        let processor = make_processor(model, Arc::clone(&store));

        let outcome = processor.process("screenshots/tx-1", &valid_fields()).await;
        assert!(matches!(
            outcome,
            Err(ProcessorError::MalformedExtraction(_))
        ));
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn store_api_rejection_is_swallowed() {
        let model = Arc::new(MockModel::replying(VALID_RESPONSE));
        let store = Arc::new(MockStore::new(StoreBehavior::RejectApi));
        let processor = make_processor(model, store);

        let outcome = processor.process("screenshots/tx-1", &valid_fields()).await;
        assert!(matches!(outcome, Ok(Outcome::Processed)));
    }

    #[tokio::test]
    async fn store_transport_failure_propagates() {
        let model = Arc::new(MockModel::replying(VALID_RESPONSE));
        let store = Arc::new(MockStore::new(StoreBehavior::FailTransport));
        let processor = make_processor(model, store);

        let outcome = processor.process("screenshots/tx-1", &valid_fields()).await;
        assert!(matches!(
            outcome,
            Err(ProcessorError::Store(StoreError::Transport(_)))
        ));
    }
}
