//! # forcelink-auth
//!
//! Salesforce authentication with the OAuth 2.0 username-password flow.
//!
//! ## Security
//!
//! - Passwords, security tokens, client secrets and access tokens are
//!   redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Credentials travel in the form body, never in the URL
//!
//! ## Sources of connection info
//!
//! - Builder methods on [`ConnectionInfo`]
//! - `SF_*` environment variables ([`ConnectionInfo::from_env`])
//! - A YAML or JSON helper file ([`HelperSettings::from_file`])
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_auth::{ConnectionInfo, HelperSettings, PasswordFlow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcelink_auth::Error> {
//!     let info = ConnectionInfo::from_env()?;
//!     let token = PasswordFlow::new(info)?.connect().await?;
//!     println!("connected to {}", token.instance_url);
//!
//!     let settings = HelperSettings::from_file("helper.yml", None)?;
//!     let token = PasswordFlow::new(settings.connection_info())?.connect().await?;
//!     Ok(())
//! }
//! ```

mod connection;
mod credentials;
mod error;
mod helper;
mod oauth;

pub use connection::ConnectionInfo;
pub use credentials::{Credentials, SalesforceCredentials};
pub use error::{Error, ErrorKind, Result};
pub use helper::HelperSettings;
pub use oauth::{PasswordFlow, TokenResponse};

pub use forcelink_client::utils::FileType;

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";
