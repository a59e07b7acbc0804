//! Gemini client for the regional Vertex AI `generateContent` endpoint.

use async_trait::async_trait;

use crate::config::ProcessorConfig;
use crate::domain::CalendarEvent;
use crate::error::ModelError;
use crate::genai::{ExtractionModel, MODEL_ID};

/// Client for one model on one regional Vertex AI endpoint.
///
/// Constructed once at startup and shared across invocations; holds no
/// mutable state beyond the connection pool inside [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl GeminiClient {
    /// Creates a client bound to the region and project in `config`.
    #[must_use]
    pub fn new(http: reqwest::Client, config: &ProcessorConfig) -> Self {
        let endpoint = format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}:generateContent",
            location = config.location,
            project = config.project_id,
            model = MODEL_ID,
        );
        Self {
            http,
            endpoint,
            access_token: config.access_token.clone(),
        }
    }

    /// Returns the fully-qualified `generateContent` URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ExtractionModel for GeminiClient {
    async fn extract(
        &self,
        image_uri: &str,
        mime_type: &str,
        instruction: &str,
    ) -> Result<String, ModelError> {
        let body = request_body(image_uri, mime_type, instruction);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: serde_json::Value = response.json().await?;
        candidate_text(&envelope).ok_or(ModelError::EmptyResponse)
    }
}

/// Builds the `generateContent` request: the image by reference, the
/// instruction text, and a JSON response constraint with the calendar
/// event shape hint.
fn request_body(image_uri: &str, mime_type: &str, instruction: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [
                {"fileData": {"fileUri": image_uri, "mimeType": mime_type}},
                {"text": instruction},
            ],
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": CalendarEvent::response_schema(),
        },
    })
}

/// Extracts the first candidate's text from a `generateContent` response.
fn candidate_text(envelope: &serde_json::Value) -> Option<String> {
    envelope
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::to_string)
}
