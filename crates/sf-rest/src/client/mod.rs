//! Salesforce REST API client.
//!
//! This client wraps `SalesforceClient` from `forcelink-client` and provides
//! typed methods for the REST operations: discovery, describe, CRUD, SOQL,
//! SOSL, limits and Knowledge.

use std::collections::HashMap;

use forcelink_auth::Credentials;
use forcelink_client::security::{soql, url as url_security};
use forcelink_client::{ClientConfig, SalesforceClient};

use crate::error::{Error, Result};

mod binary;
mod crud;
mod describe;
mod knowledge;
mod limits;
mod query;
mod search;

/// Salesforce REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use forcelink_rest::SalesforceRestClient;
///
/// let client = SalesforceRestClient::new(
///     "https://myorg.my.salesforce.com",
///     "access_token_here",
/// )?;
///
/// let result = client
///     .query::<serde_json::Value>("SELECT Id, Title FROM Knowledge__kav LIMIT 10")
///     .await?;
///
/// let created = client
///     .create("Account", &serde_json::json!({"Name": "New Account"}))
///     .await?;
/// client
///     .update("Account", &created.id, &serde_json::json!({"Name": "Updated"}))
///     .await?;
/// client.delete("Account", &created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalesforceRestClient {
    client: SalesforceClient,
}

impl SalesforceRestClient {
    /// Create a new REST client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let client = SalesforceClient::new(instance_url, access_token)?;
        Ok(Self { client })
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = SalesforceClient::with_config(instance_url, access_token, config)?;
        Ok(Self { client })
    }

    /// Create a REST client from issued credentials, keeping their API version.
    pub fn from_credentials(credentials: &impl Credentials) -> Result<Self> {
        let client = SalesforceClient::new(credentials.instance_url(), credentials.access_token())?
            .with_api_version(credentials.api_version());
        Ok(Self { client })
    }

    /// Create a REST client from an existing SalesforceClient.
    pub fn from_client(client: SalesforceClient) -> Self {
        Self { client }
    }

    /// Get the underlying SalesforceClient.
    pub fn inner(&self) -> &SalesforceClient {
        &self.client
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        self.client.instance_url()
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    /// Set the API version. A leading `v` is accepted.
    pub fn with_api_version(mut self, version: impl AsRef<str>) -> Self {
        self.client = self.client.with_api_version(version);
        self
    }
}

pub(crate) fn check_sobject(sobject: &str) -> Result<()> {
    if soql::is_safe_sobject_name(sobject) {
        Ok(())
    } else {
        Err(Error::invalid("INVALID_SOBJECT", "Invalid SObject name"))
    }
}

pub(crate) fn check_id(id: &str) -> Result<()> {
    if url_security::is_valid_salesforce_id(id) {
        Ok(())
    } else {
        Err(Error::invalid("INVALID_ID", "Invalid Salesforce ID format"))
    }
}

pub(crate) fn check_field(field: &str) -> Result<()> {
    if soql::is_safe_field_name(field) {
        Ok(())
    } else {
        Err(Error::invalid("INVALID_FIELD", "Invalid field name"))
    }
}

/// Result of a SOSL search.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct SearchResult<T> {
    #[serde(rename = "searchRecords", default = "Vec::new")]
    pub search_records: Vec<T>,
}

/// API version information.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ApiVersion {
    pub version: String,
    pub label: String,
    pub url: String,
}

/// The resources available at one API version, keyed by name.
pub type RestResources = HashMap<String, String>;
