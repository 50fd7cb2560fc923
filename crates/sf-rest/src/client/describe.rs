use tracing::instrument;

use super::check_sobject;
use crate::describe::{DescribeGlobalResult, DescribeSObjectResult};
use crate::error::Result;

impl super::SalesforceRestClient {
    /// List every sObject available in the org.
    #[instrument(skip(self))]
    pub async fn describe_global(&self) -> Result<DescribeGlobalResult> {
        self.client.rest_get("sobjects").await.map_err(Into::into)
    }

    /// Alias of [`describe_global`](Self::describe_global).
    pub async fn get_all_sobjects(&self) -> Result<DescribeGlobalResult> {
        self.describe_global().await
    }

    /// Basic information about an sObject, or its full describe when
    /// `describe` is set, as raw JSON.
    #[instrument(skip(self))]
    pub async fn get_sobject(&self, sobject: &str, describe: bool) -> Result<serde_json::Value> {
        check_sobject(sobject)?;
        let path = if describe {
            format!("sobjects/{}/describe", sobject)
        } else {
            format!("sobjects/{}", sobject)
        };
        self.client.rest_get(&path).await.map_err(Into::into)
    }

    /// Full metadata for one sObject.
    #[instrument(skip(self))]
    pub async fn describe_sobject(&self, sobject: &str) -> Result<DescribeSObjectResult> {
        check_sobject(sobject)?;
        let path = format!("sobjects/{}/describe", sobject);
        self.client.rest_get(&path).await.map_err(Into::into)
    }
}
