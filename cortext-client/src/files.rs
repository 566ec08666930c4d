//! Input text and artifact endpoints

use cortext_core::dto::text::{StatusResponse, WriteText};

use crate::CortextClient;
use crate::error::Result;

impl CortextClient {
    /// Overwrite the server's input file with `text`
    pub async fn write_text(&self, text: impl Into<String>) -> Result<StatusResponse> {
        let url = format!("{}/write", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&WriteText { text: text.into() })
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Download the generated HTML artifact
    ///
    /// A missing artifact surfaces as an error for which
    /// [`ClientError::is_not_found`](crate::ClientError::is_not_found) holds.
    pub async fn download_html(&self) -> Result<Vec<u8>> {
        let url = format!("{}/download-html", self.base_url);
        let response = self.client.get(&url).send().await?;

        let bytes = Self::check_status(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
