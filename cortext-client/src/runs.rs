//! Pipeline run endpoints
//!
//! These calls return only once the external processes have exited.

use cortext_core::domain::outcome::PipelineOutcome;
use cortext_core::dto::run::NativeRunResponse;

use crate::CortextClient;
use crate::error::Result;

impl CortextClient {
    /// Run the native phase alone (`POST /run-java`)
    pub async fn run_native(&self) -> Result<NativeRunResponse> {
        self.post_run("run-java").await
    }

    /// Run the scripted phase alone
    pub async fn run_scripts(&self) -> Result<PipelineOutcome> {
        self.post_run("run-python-scripts").await
    }

    /// Run the native phase, then the scripted phase if it succeeded
    pub async fn run_full_process(&self) -> Result<PipelineOutcome> {
        self.post_run("run-full-process").await
    }

    async fn post_run<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).send().await?;

        Self::handle_response(response).await
    }
}
