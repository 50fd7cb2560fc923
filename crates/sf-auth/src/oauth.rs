//! OAuth 2.0 username-password flow.
//!
//! The grant is posted as a form body to the token endpoint; the password
//! sent is the account password with the security token appended.

use forcelink_client::{sanitize_error_message, ClientConfig, SfHttpClient};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::connection::ConnectionInfo;
use crate::credentials::SalesforceCredentials;
use crate::error::{Error, ErrorKind, Result};

/// Username-password OAuth flow against a connected app.
#[derive(Clone)]
pub struct PasswordFlow {
    info: ConnectionInfo,
    http: SfHttpClient,
}

impl std::fmt::Debug for PasswordFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordFlow")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl PasswordFlow {
    /// Create a flow with the default client configuration.
    pub fn new(info: ConnectionInfo) -> Result<Self> {
        Self::with_config(info, ClientConfig::default())
    }

    /// Create a flow whose HTTP client honours `config` (timeouts, TLS verification).
    pub fn with_config(info: ConnectionInfo, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            info,
            http: SfHttpClient::new(config)?,
        })
    }

    /// The connection info this flow authenticates with.
    pub fn connection_info(&self) -> &ConnectionInfo {
        &self.info
    }

    /// Request an access token.
    ///
    /// Fails with `MissingField` before any request if the username,
    /// password, client key or client secret is unset. A non-200 answer
    /// becomes `OAuth` when Salesforce sends an OAuth error body and
    /// `ConnectionFailed` otherwise.
    #[instrument(skip(self))]
    pub async fn connect(&self) -> Result<TokenResponse> {
        let required = |name: &str, value: Option<&str>| -> Result<String> {
            value
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| Error::new(ErrorKind::MissingField(name.to_string())))
        };

        let username = required("username", self.info.username.as_deref())?;
        let password = required("password", self.info.password())?;
        let client_id = required("client_key", self.info.client_key.as_deref())?;
        let client_secret = required("client_secret", self.info.client_secret())?;
        let endpoint = url::Url::parse(&self.info.token_endpoint())?;

        let password = format!("{}{}", password, self.info.security_token().unwrap_or_default());

        debug!(endpoint = %endpoint, "requesting access token");
        let request = self.http.post(endpoint.as_str()).form([
            ("grant_type", "password"),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("username", username.as_str()),
            ("password", password.as_str()),
        ]);
        let response = self.http.execute_raw(&request).await?;

        let status = response.status();
        if status != 200 {
            let text = response.text().await.unwrap_or_default();
            if let Ok(error) = serde_json::from_str::<OAuthErrorResponse>(&text) {
                return Err(Error::new(ErrorKind::OAuth {
                    error: error.error,
                    description: error.error_description,
                }));
            }
            return Err(Error::new(ErrorKind::ConnectionFailed {
                status,
                message: sanitize_error_message(&text),
            }));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token)
    }
}

/// Token response from the token endpoint.
///
/// The access token and signature are redacted in Debug output.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Instance URL.
    pub instance_url: String,
    /// Identity URL.
    #[serde(default)]
    pub id: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Issued at timestamp, in epoch milliseconds.
    #[serde(default)]
    pub issued_at: Option<String>,
    /// HMAC signature over the identity URL and issue time.
    #[serde(default)]
    pub signature: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("issued_at", &self.issued_at)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl TokenResponse {
    /// Convert to SalesforceCredentials.
    pub fn to_credentials(&self, api_version: &str) -> SalesforceCredentials {
        SalesforceCredentials::new(&self.instance_url, &self.access_token, api_version)
    }
}

/// OAuth error response.
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}
