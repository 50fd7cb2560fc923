//! Connected session handing out the REST and Chatter clients.

use std::path::Path;

use tracing::{info, instrument};

use forcelink_auth::{ConnectionInfo, HelperSettings, PasswordFlow, TokenResponse};
use forcelink_chatter::ChatterClient;
use forcelink_client::{ClientConfig, SalesforceClient, DEFAULT_API_VERSION};
use forcelink_rest::SalesforceRestClient;

use crate::error::Result;

/// An authenticated Salesforce session.
///
/// The REST and Chatter clients returned by [`rest`](Self::rest) and
/// [`chatter`](Self::chatter) share this session's HTTP connection pool.
#[derive(Debug, Clone)]
pub struct Salesforce {
    client: SalesforceClient,
    token: Option<TokenResponse>,
}

impl Salesforce {
    /// Connect with the password grant using the default client config.
    pub async fn connect(info: ConnectionInfo) -> Result<Self> {
        Self::connect_with_config(info, ClientConfig::default(), DEFAULT_API_VERSION).await
    }

    /// Connect with the password grant.
    ///
    /// `config` is used for the token request and for every later API call.
    #[instrument(skip(info, config))]
    pub async fn connect_with_config(
        info: ConnectionInfo,
        config: ClientConfig,
        api_version: &str,
    ) -> Result<Self> {
        let token = PasswordFlow::with_config(info, config.clone())?
            .connect()
            .await?;
        info!(instance_url = %token.instance_url, "connected to Salesforce");

        let client =
            SalesforceClient::with_config(&token.instance_url, &token.access_token, config)?
                .with_api_version(api_version);
        Ok(Self {
            client,
            token: Some(token),
        })
    }

    /// Load a YAML or JSON helper file and connect with its settings.
    ///
    /// The file's `ssl_verify` flag carries over to every request.
    #[instrument(skip(path))]
    pub async fn from_helper_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = HelperSettings::from_file(path.as_ref(), None)?;
        let config = ClientConfig::builder()
            .with_ssl_verify(settings.ssl_verify)
            .build();
        Self::connect_with_config(settings.connection_info(), config, DEFAULT_API_VERSION).await
    }

    /// Wrap an access token issued elsewhere.
    pub fn from_parts(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            client: SalesforceClient::new(instance_url, access_token)?,
            token: None,
        })
    }

    /// Set the API version used by clients handed out afterwards.
    pub fn with_api_version(mut self, version: impl AsRef<str>) -> Self {
        self.client = self.client.with_api_version(version);
        self
    }

    pub fn rest(&self) -> SalesforceRestClient {
        SalesforceRestClient::from_client(self.client.clone())
    }

    pub fn chatter(&self) -> ChatterClient {
        ChatterClient::from_client(self.client.clone())
    }

    pub fn client(&self) -> &SalesforceClient {
        &self.client
    }

    pub fn instance_url(&self) -> &str {
        self.client.instance_url()
    }

    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    /// The token response, when this session was opened by [`connect`](Self::connect).
    pub fn token(&self) -> Option<&TokenResponse> {
        self.token.as_ref()
    }

    /// Signature from the token response.
    pub fn signature(&self) -> Option<&str> {
        self.token.as_ref()?.signature.as_deref()
    }
}
