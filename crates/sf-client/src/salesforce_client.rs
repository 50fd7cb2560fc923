//! High-level Salesforce client with typed HTTP methods.
//!
//! This module provides `SalesforceClient`, which combines an access token
//! with an HTTP client and provides typed JSON methods for API interactions.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Payloads are skipped in tracing spans

use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::request::{RequestBuilder, RequestMethod};
use crate::{normalize_api_version, DEFAULT_API_VERSION};

/// High-level Salesforce API client.
///
/// Holds the instance URL, access token and API version, and attaches the
/// default Salesforce headers (`Content-Type: application/json`, gzip) to
/// every request. The bearer token is only sent to the instance's own origin. API-specific crates (rest,
/// chatter) are thin wrappers around it.
///
/// The access token is redacted in Debug output.
///
/// # Example
///
/// ```rust,ignore
/// use forcelink_client::SalesforceClient;
///
/// let client = SalesforceClient::new("https://myorg.my.salesforce.com", token)?;
///
/// let limits: serde_json::Value = client.rest_get("limits").await?;
/// let result: CreateResult = client.rest_post("sobjects/Account", &account).await?;
/// ```
#[derive(Clone)]
pub struct SalesforceClient {
    http: SfHttpClient,
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Create a new Salesforce client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(instance_url, access_token, ClientConfig::default())
    }

    /// Create a new Salesforce client with custom configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = SfHttpClient::new(config)?;
        Ok(Self {
            http,
            instance_url: instance_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Set the API version (e.g., "55.0" or "v55.0").
    pub fn with_api_version(mut self, version: impl AsRef<str>) -> Self {
        self.api_version = normalize_api_version(version.as_ref());
        self
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Get the access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Get the API version, without the leading `v`.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Build the full URL for a path.
    ///
    /// Absolute `http(s)://` URLs pass through unchanged. Anything else is
    /// appended to the instance URL, with a `/` inserted if missing.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.instance_url, path)
        } else {
            format!("{}/{}", self.instance_url, path)
        }
    }

    /// Whether `url` points at the instance's scheme, host and port.
    pub fn is_instance_origin(&self, url: &str) -> bool {
        match (url::Url::parse(url), url::Url::parse(&self.instance_url)) {
            (Ok(target), Ok(instance)) => target.origin() == instance.origin(),
            _ => false,
        }
    }

    /// Build the REST API URL for a path.
    ///
    /// Example: `rest_url("sobjects/Account")` -> `{instance}/services/data/v55.0/sobjects/Account`
    pub fn rest_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url, self.api_version, path
        )
    }

    // =========================================================================
    // Base HTTP Methods (with authentication)
    // =========================================================================

    /// Create a request builder carrying the default Salesforce headers.
    ///
    /// The access token is attached only when `url` has the same origin as
    /// the instance URL; requests to other hosts go out unauthenticated.
    pub fn request(&self, method: RequestMethod, url: &str) -> RequestBuilder {
        let mut request =
            RequestBuilder::new(method, url).header("Content-Type", "application/json");
        if self.is_instance_origin(url) {
            request = request.bearer_auth(&self.access_token);
        }
        if self.http.config().accept_compressed {
            request.accept_gzip()
        } else {
            request
        }
    }

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Get, url)
    }

    /// Create a POST request builder with authentication.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Post, url)
    }

    /// Create a PATCH request builder with authentication.
    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Patch, url)
    }

    /// Create a PUT request builder with authentication.
    pub fn put(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Put, url)
    }

    /// Create a DELETE request builder with authentication.
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Delete, url)
    }

    /// Execute a request and return the checked response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<crate::Response> {
        self.http.execute(request).await
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// GET request with JSON response deserialization.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.get(&self.url(url));
        let response = self.http.execute(request).await?;
        response.json().await
    }

    /// GET request with query parameters and JSON response deserialization.
    #[instrument(skip(self, params), fields(url = %url))]
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let request = self
            .get(&self.url(url))
            .query_pairs(params.iter().copied());
        let response = self.http.execute(request).await?;
        response.json().await
    }

    /// GET request returning the untyped JSON document.
    pub async fn get_value(&self, url: &str) -> Result<serde_json::Value> {
        self.get_json(url).await
    }

    /// GET request returning the raw response body.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_bytes(&self, url: &str) -> Result<bytes::Bytes> {
        let request = self.get(&self.url(url));
        let response = self.http.execute(request).await?;
        response.bytes().await
    }

    /// GET request to REST API with JSON response.
    pub async fn rest_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_json(&self.rest_url(path)).await
    }

    /// GET request to REST API with query parameters.
    pub async fn rest_get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        self.get_json_with_query(&self.rest_url(path), params).await
    }

    /// POST request with JSON body and response.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.post(&self.url(url)).json(body)?;
        let response = self.http.execute(request).await?;
        response.json().await
    }

    /// POST request to REST API with JSON body and response.
    pub async fn rest_post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.post_json(&self.rest_url(path), body).await
    }

    /// PATCH request with JSON body. Salesforce answers `204 No Content`.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn patch_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<()> {
        let request = self.patch(&self.url(url)).json(body)?;
        self.http.execute(request).await?;
        Ok(())
    }

    /// PATCH request to REST API with JSON body.
    pub async fn rest_patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.patch_json(&self.rest_url(path), body).await
    }

    /// PUT request with JSON body and response.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.put(&self.url(url)).json(body)?;
        let response = self.http.execute(request).await?;
        response.json().await
    }

    /// PUT request to REST API with JSON body and response.
    pub async fn rest_put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.put_json(&self.rest_url(path), body).await
    }

    /// DELETE request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn delete_request(&self, url: &str) -> Result<()> {
        let request = self.delete(&self.url(url));
        self.http.execute(request).await?;
        Ok(())
    }

    /// DELETE request to REST API.
    pub async fn rest_delete(&self, path: &str) -> Result<()> {
        self.delete_request(&self.rest_url(path)).await
    }

    /// Send a payload with POST, PATCH or PUT and return the JSON answer.
    ///
    /// An empty answer (such as PATCH's `204`) is returned as `Value::Null`.
    /// GET and DELETE carry no payload and fail with `InvalidArgument`.
    #[instrument(skip(self, payload, params), fields(method = method.as_str(), url = %url))]
    pub async fn send_with_payload<B: Serialize + ?Sized>(
        &self,
        method: RequestMethod,
        url: &str,
        payload: &B,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value> {
        if !matches!(
            method,
            RequestMethod::Post | RequestMethod::Patch | RequestMethod::Put
        ) {
            return Err(Error::invalid_argument(format!(
                "{} requests do not carry a payload; use POST, PATCH or PUT",
                method.as_str()
            )));
        }
        let request = self
            .request(method, &self.url(url))
            .query_pairs(params.iter().copied())
            .json(payload)?;
        let response = self.http.execute(request).await?;
        response.json().await
    }

    // =========================================================================
    // Query Helpers
    // =========================================================================

    /// Execute a SOQL query via REST API. Only the first page is returned.
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        self.rest_get_with_query("query/", &[("q", soql)]).await
    }
}

/// Result of a SOQL query.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    pub done: bool,

    /// URL to fetch next batch of results.
    #[serde(rename = "nextRecordsUrl", default)]
    pub next_records_url: Option<String>,

    /// The records.
    pub records: Vec<T>,
}
