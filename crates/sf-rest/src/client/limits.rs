use tracing::instrument;

use crate::error::Result;

impl super::SalesforceRestClient {
    /// Get API limits for the org.
    #[instrument(skip(self))]
    pub async fn limits(&self) -> Result<serde_json::Value> {
        self.client.rest_get("limits").await.map_err(Into::into)
    }

    /// Get available API versions.
    #[instrument(skip(self))]
    pub async fn versions(&self) -> Result<Vec<super::ApiVersion>> {
        self.client
            .get_json("/services/data")
            .await
            .map_err(Into::into)
    }

    /// The REST resources available at the configured API version.
    #[instrument(skip(self))]
    pub async fn rest_resources(&self) -> Result<super::RestResources> {
        let path = format!("/services/data/v{}", self.client.api_version());
        self.client.get_json(&path).await.map_err(Into::into)
    }
}
