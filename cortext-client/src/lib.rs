//! Cortext HTTP Client
//!
//! A small, type-safe HTTP client for the Cortext pipeline service.
//!
//! # Example
//!
//! ```no_run
//! use cortext_client::CortextClient;
//!
//! #[tokio::main]
//! async fn main() -> cortext_client::Result<()> {
//!     let client = CortextClient::new("http://localhost:5000");
//!
//!     client.write_text("Item 1A. Risk Factors ...").await?;
//!     let outcome = client.run_full_process().await?;
//!
//!     println!("Run {} finished: {}", outcome.run_id, outcome.message);
//!     Ok(())
//! }
//! ```

pub mod error;
mod files;
mod runs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Cortext API
#[derive(Debug, Clone)]
pub struct CortextClient {
    /// Base URL of the server (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl CortextClient {
    /// Create a new client
    ///
    /// The underlying HTTP client has no request timeout: pipeline runs
    /// take as long as the external programs do.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /health
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        Self::check_status(response).await.map(|_| ())
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Turn a non-2xx response into [`ClientError::ApiError`]
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!("API returned {}: {}", status, error_text);
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }
}
