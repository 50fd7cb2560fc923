//! # sf-client
//!
//! Core HTTP client infrastructure for the Salesforce REST, Chatter and
//! Knowledge APIs.
//!
//! This crate provides:
//! - A single-shot HTTP client (one request, one interpreted response)
//! - Salesforce error-body parsing with sanitized messages
//! - Rate limit detection (reported, never retried)
//! - Record ID normalization (15 to 18 character form)
//! - SOQL/URL escaping and small string/URL utilities
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │           (sf-rest, sf-chatter, root facade)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SalesforceClient                          │
//! │  - Holds instance URL, access token, API version            │
//! │  - Typed JSON methods (get_json, post_json, etc.)           │
//! │  - Default Salesforce headers                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - Raw HTTP with timeouts, compression, TLS settings        │
//! │  - Response/error interpretation                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_client::{SalesforceClient, id};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcelink_client::Error> {
//!     let client = SalesforceClient::new("https://myorg.my.salesforce.com", "token")?;
//!
//!     let resources: serde_json::Value = client.rest_get("").await?;
//!
//!     let full_id = id::normalize("ka4PO0000002hby")?;
//!     assert_eq!(full_id, "ka4PO0000002hbyYAA");
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
pub mod id;
mod request;
mod response;
mod salesforce_client;
pub mod security;
pub mod utils;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use id::RecordId;
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::{sanitize_error_message, ApiUsage, Response, ResponseExt};
pub use salesforce_client::{QueryResult, SalesforceClient};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "55.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("forcelink/", env!("CARGO_PKG_VERSION"));

/// Strip an optional leading `v` from an API version string.
///
/// `"v55.0"` and `"55.0"` both yield `"55.0"`.
pub fn normalize_api_version(version: &str) -> String {
    version
        .trim()
        .trim_start_matches(['v', 'V'])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_api_version() {
        assert_eq!(normalize_api_version("v55.0"), "55.0");
        assert_eq!(normalize_api_version("55.0"), "55.0");
        assert_eq!(normalize_api_version(" V60.0 "), "60.0");
    }

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("forcelink/"));
    }
}
