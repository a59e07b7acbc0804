//! Persistence layer: the state-store seam and the Firestore client.
//!
//! Provides the [`StateStore`] trait for merge-writing extraction results
//! into the `state` collection. The concrete implementation talks to the
//! Firestore REST API over `reqwest`.

pub mod firestore;
pub mod values;

use async_trait::async_trait;

use crate::domain::StatePatch;
use crate::error::StoreError;

pub use firestore::FirestoreClient;

/// A document store holding the per-transaction `state` documents.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Merges `patch` into the document keyed by `transaction_id`.
    ///
    /// Merge, not replace: fields absent from the patch survive on the
    /// target document, and the document is created when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Api`] when the store rejects the write, and
    /// other [`StoreError`] kinds on transport or encoding failures. The
    /// caller decides which kinds terminate the invocation.
    async fn merge_state(&self, transaction_id: &str, patch: &StatePatch)
    -> Result<(), StoreError>;
}
