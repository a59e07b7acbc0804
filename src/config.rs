//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), loaded once at startup.

use std::net::SocketAddr;

use anyhow::Context;

/// Regional Vertex AI endpoint used when `LOCATION` is unset or empty.
pub const DEFAULT_LOCATION: &str = "europe-west1";

/// Top-level processor configuration.
///
/// Loaded once at startup via [`ProcessorConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Region for the Vertex AI endpoint (e.g. `europe-west1`).
    pub location: String,

    /// Google Cloud project that owns the Firestore database and the
    /// Vertex AI quota.
    pub project_id: String,

    /// OAuth2 bearer token presented to both Google APIs. Credential
    /// refresh is the deployment environment's concern, not ours.
    pub access_token: String,
}

impl ProcessorConfig {
    /// Loads configuration from environment variables.
    ///
    /// `LOCATION` falls back to [`DEFAULT_LOCATION`] when unset or empty.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as a
    /// [`SocketAddr`], or if `GOOGLE_CLOUD_PROJECT` or
    /// `GOOGLE_ACCESS_TOKEN` is missing.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("LISTEN_ADDR must be a socket address")?;

        let location = non_empty(std::env::var("LOCATION").ok())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        let project_id = non_empty(std::env::var("GOOGLE_CLOUD_PROJECT").ok())
            .context("GOOGLE_CLOUD_PROJECT must be set")?;

        let access_token = non_empty(std::env::var("GOOGLE_ACCESS_TOKEN").ok())
            .context("GOOGLE_ACCESS_TOKEN must be set")?;

        Ok(Self {
            listen_addr,
            location,
            project_id,
            access_token,
        })
    }
}

/// Filters out unset and empty-string environment values so both fall
/// through to the same default.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
