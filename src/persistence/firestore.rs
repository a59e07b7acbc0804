//! Firestore REST implementation of the state store.
//!
//! Merge semantics come from the `updateMask` query parameter: only the
//! fields named in the mask are written, everything else on the target
//! document survives. The mask is derived from the patch itself so the
//! two can never drift apart.

use async_trait::async_trait;
use serde::ser::Error as _;

use crate::config::ProcessorConfig;
use crate::domain::StatePatch;
use crate::error::StoreError;
use crate::persistence::{StateStore, values};

/// Collection holding the per-transaction output documents.
pub const STATE_COLLECTION: &str = "state";

/// Firestore REST client bound to one project's default database.
///
/// Constructed once at startup and shared across invocations; holds no
/// mutable state beyond the connection pool inside [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    http: reqwest::Client,
    documents_url: String,
    access_token: String,
}

impl FirestoreClient {
    /// Creates a client for the project in `config`.
    #[must_use]
    pub fn new(http: reqwest::Client, config: &ProcessorConfig) -> Self {
        let documents_url = format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents",
            config.project_id,
        );
        Self {
            http,
            documents_url,
            access_token: config.access_token.clone(),
        }
    }

    /// Returns the REST resource URL for `state/<transaction_id>`.
    #[must_use]
    pub fn document_url(&self, transaction_id: &str) -> String {
        format!("{}/{STATE_COLLECTION}/{transaction_id}", self.documents_url)
    }
}

#[async_trait]
impl StateStore for FirestoreClient {
    async fn merge_state(
        &self,
        transaction_id: &str,
        patch: &StatePatch,
    ) -> Result<(), StoreError> {
        let value = serde_json::to_value(patch)?;
        let Some(object) = value.as_object() else {
            return Err(StoreError::Encode(serde_json::Error::custom(
                "patch must serialize to an object",
            )));
        };

        let mask: Vec<(&str, &str)> = object
            .keys()
            .map(|k| ("updateMask.fieldPaths", k.as_str()))
            .collect();
        let fields = values::to_document_fields(object);

        let response = self
            .http
            .patch(self.document_url(transaction_id))
            .query(&mask)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({"fields": fields}))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        Ok(())
    }
}

/// Pulls the human-readable message out of a Google API error body,
/// falling back to the raw body when it is not the expected shape.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
