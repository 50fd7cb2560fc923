//! Connection information for the password grant.
//!
//! A [`ConnectionInfo`] can be built in code, read from `SF_*` environment
//! variables, or loaded from a helper file (see [`crate::HelperSettings`]).
//! The password, security token and client secret are redacted in Debug
//! output.

use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};
use crate::PRODUCTION_LOGIN_URL;

const TOKEN_PATH: &str = "/services/oauth2/token";

/// Everything needed to request an access token with the password grant.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionInfo {
    /// Org base URL, e.g. `https://example.my.salesforce.com`.
    pub base_url: Option<String>,
    /// Token endpoint. Derived from `base_url` when unset.
    pub endpoint_url: Option<String>,
    /// Organization ID.
    pub org_id: Option<String>,
    /// Login username.
    pub username: Option<String>,
    password: Option<String>,
    security_token: Option<String>,
    /// Connected app consumer key (`client_id`).
    pub client_key: Option<String>,
    client_secret: Option<String>,
}

impl std::fmt::Debug for ConnectionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ConnectionInfo")
            .field("base_url", &self.base_url)
            .field("endpoint_url", &self.endpoint_url)
            .field("org_id", &self.org_id)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("security_token", &redact(&self.security_token))
            .field("client_key", &self.client_key)
            .field("client_secret", &redact(&self.client_secret))
            .finish()
    }
}

impl ConnectionInfo {
    /// Create empty connection info.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the org base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the token endpoint explicitly.
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the organization ID.
    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the security token appended to the password.
    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    /// Set the connected app consumer key.
    pub fn with_client_key(mut self, client_key: impl Into<String>) -> Self {
        self.client_key = Some(client_key.into());
        self
    }

    /// Set the connected app consumer secret.
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub(crate) fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub(crate) fn security_token(&self) -> Option<&str> {
        self.security_token.as_deref()
    }

    pub(crate) fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    /// The token endpoint to POST the grant to.
    ///
    /// `endpoint_url` if set, else `{base_url}/services/oauth2/token`, else
    /// the production login host.
    pub fn token_endpoint(&self) -> String {
        match (&self.endpoint_url, &self.base_url) {
            (Some(endpoint), _) if !endpoint.is_empty() => endpoint.clone(),
            (_, Some(base)) if !base.is_empty() => {
                format!("{}{}", base.trim_end_matches('/'), TOKEN_PATH)
            }
            _ => format!("{}{}", PRODUCTION_LOGIN_URL, TOKEN_PATH),
        }
    }

    /// Fill any unset field from `other`.
    pub fn merge(mut self, other: ConnectionInfo) -> Self {
        fn fill(slot: &mut Option<String>, value: Option<String>) {
            if slot.is_none() {
                *slot = value;
            }
        }
        fill(&mut self.base_url, other.base_url);
        fill(&mut self.endpoint_url, other.endpoint_url);
        fill(&mut self.org_id, other.org_id);
        fill(&mut self.username, other.username);
        fill(&mut self.password, other.password);
        fill(&mut self.security_token, other.security_token);
        fill(&mut self.client_key, other.client_key);
        fill(&mut self.client_secret, other.client_secret);
        self
    }

    /// Load connection info from environment variables.
    ///
    /// Reads `SF_USERNAME`, `SF_PASSWORD`, `SF_SECURITY_TOKEN`,
    /// `SF_CLIENT_KEY`, `SF_CLIENT_SECRET`, `SF_BASE_URL`,
    /// `SF_ENDPOINT_URL` and `SF_ORG_ID`, each with a `SALESFORCE_*`
    /// fallback. `SF_USERNAME` is required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |suffix: &str| {
            lookup(&format!("SF_{suffix}"))
                .or_else(|| lookup(&format!("SALESFORCE_{suffix}")))
                .filter(|value| !value.is_empty())
        };

        let username = read("USERNAME")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_USERNAME".to_string())))?;

        Ok(Self {
            base_url: read("BASE_URL"),
            endpoint_url: read("ENDPOINT_URL"),
            org_id: read("ORG_ID"),
            username: Some(username),
            password: read("PASSWORD"),
            security_token: read("SECURITY_TOKEN"),
            client_key: read("CLIENT_KEY"),
            client_secret: read("CLIENT_SECRET"),
        })
    }
}
