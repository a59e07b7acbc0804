//! Generative-AI layer: the extraction model seam and the Gemini client.
//!
//! The pipeline talks to [`ExtractionModel`] so the hosted model can be
//! swapped for a mock in tests; [`gemini::GeminiClient`] is the production
//! implementation.

pub mod gemini;

use async_trait::async_trait;

use crate::error::ModelError;

pub use gemini::GeminiClient;

/// Model identifier submitted with every extraction request.
pub const MODEL_ID: &str = "gemini-2.0-flash-001";

/// A multimodal model that turns a referenced image plus an instruction
/// into generated text.
#[async_trait]
pub trait ExtractionModel: Send + Sync {
    /// Submits one synchronous extraction request.
    ///
    /// The image is passed by reference (`image_uri` + `mime_type`), never
    /// downloaded by this service. Returns the raw generated text; the
    /// caller decides how to parse it.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] when the service rejects the request, the
    /// transport fails, or the response carries no text. No retry.
    async fn extract(
        &self,
        image_uri: &str,
        mime_type: &str,
        instruction: &str,
    ) -> Result<String, ModelError>;
}
