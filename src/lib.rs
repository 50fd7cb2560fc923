//! # forcelink
//!
//! A Salesforce REST, Chatter and Knowledge API client library for Rust.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets) are redacted in Debug output
//! - Tracing/logging skips credential parameters
//! - Error messages sanitize any credential data
//!
//! ## Crates
//!
//! - **forcelink-client** - HTTP plumbing, configuration, record ID normalization
//! - **forcelink-auth** - Password-grant OAuth, connection info, helper files
//! - **forcelink-rest** - REST API: CRUD, SOQL, SOSL, describe, limits, Knowledge
//! - **forcelink-chatter** - Chatter feeds, feed items and comments
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use forcelink::{ConnectionInfo, Salesforce};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcelink::Error> {
//!     let sf = Salesforce::connect(ConnectionInfo::from_env()?).await?;
//!
//!     let accounts = sf
//!         .rest()
//!         .query::<serde_json::Value>("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!     for account in accounts.records {
//!         println!("{}", account["Name"]);
//!     }
//!
//!     let full = forcelink::client::id::normalize("001D000000IqhSL")?;
//!     assert_eq!(full, "001D000000IqhSLIAZ");
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub mod version;

#[cfg(all(feature = "rest", feature = "chatter"))]
mod salesforce;

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use forcelink_auth as auth;
#[cfg(feature = "chatter")]
pub use forcelink_chatter as chatter;
#[cfg(feature = "client")]
pub use forcelink_client as client;
#[cfg(feature = "rest")]
pub use forcelink_rest as rest;

pub use error::{Error, Result};
#[cfg(all(feature = "rest", feature = "chatter"))]
pub use salesforce::Salesforce;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use forcelink_auth::{ConnectionInfo, Credentials, HelperSettings, SalesforceCredentials};
#[cfg(feature = "chatter")]
pub use forcelink_chatter::{ChatterClient, Message, MessageSegment};
#[cfg(feature = "client")]
pub use forcelink_client::{ClientConfig, RecordId, SalesforceClient};
#[cfg(feature = "rest")]
pub use forcelink_rest::SalesforceRestClient;
