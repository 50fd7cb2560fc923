//! HTTP response handling with Salesforce-specific extensions.

use std::sync::OnceLock;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};

/// Wrapper around HTTP response with additional functionality.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the Retry-After header as a Duration.
    ///
    /// Only the delta-seconds form is understood; Salesforce does not send dates here.
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")?
            .trim()
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Get the response body as bytes.
    pub async fn bytes(self) -> Result<bytes::Bytes> {
        self.inner.bytes().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    ///
    /// An empty body (e.g. `204 No Content`) is read as JSON `null`, so
    /// `serde_json::Value`, `Option<T>` and `()` targets succeed.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.inner.bytes().await?;
        let slice: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &body
        };
        serde_json::from_slice(slice).map_err(Into::into)
    }

    /// Get access to the inner reqwest::Response.
    pub fn into_inner(self) -> reqwest::Response {
        self.inner
    }

    /// Get API usage limits from response headers.
    pub fn api_usage(&self) -> Option<ApiUsage> {
        ApiUsage::from_header(self.header("sforce-limit-info")?)
    }
}

/// API usage information from response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiUsage {
    /// Number of API calls used.
    pub used: u64,
    /// Total API call limit.
    pub limit: u64,
}

impl ApiUsage {
    /// Parse a `Sforce-Limit-Info` value such as `api-usage=25/15000`.
    pub fn from_header(info: &str) -> Option<Self> {
        info.split(',')
            .map(str::trim)
            .find_map(|part| part.strip_prefix("api-usage="))
            .and_then(|usage| {
                let (used, limit) = usage.split_once('/')?;
                Some(ApiUsage {
                    used: used.trim().parse().ok()?,
                    limit: limit.trim().parse().ok()?,
                })
            })
    }

    /// Get the remaining API calls.
    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }

    /// Get the usage percentage.
    pub fn percentage(&self) -> f64 {
        if self.limit == 0 {
            100.0
        } else {
            (self.used as f64 / self.limit as f64) * 100.0
        }
    }

    /// Returns true if API usage is above the given percentage threshold.
    pub fn is_above_threshold(&self, threshold_percent: f64) -> bool {
        self.percentage() >= threshold_percent
    }
}

/// Extension trait for processing Salesforce API responses.
pub trait ResponseExt: Sized {
    /// Check for Salesforce API errors and convert to appropriate error type.
    fn check_salesforce_error(self) -> impl std::future::Future<Output = Result<Response>> + Send {
        self.check_salesforce_error_with(true)
    }

    /// Like [`check_salesforce_error`](Self::check_salesforce_error), optionally
    /// leaving the response body out of the error message.
    fn check_salesforce_error_with(
        self,
        show_full_error: bool,
    ) -> impl std::future::Future<Output = Result<Response>> + Send;
}

impl ResponseExt for Response {
    async fn check_salesforce_error_with(self, show_full_error: bool) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let retry_after = self.retry_after();
        let body = self.text().await.unwrap_or_default();
        Err(parse_error_response(status, &body, retry_after, show_full_error))
    }
}

/// Parse error response body and convert to appropriate error kind.
fn parse_error_response(
    status: u16,
    body: &str,
    retry_after: Option<Duration>,
    show_full_error: bool,
) -> Error {
    if status == 429 {
        return Error::new(ErrorKind::RateLimited { retry_after });
    }

    let summary = format!("request failed with a {} status code", status);

    let parsed = serde_json::from_str::<Vec<SalesforceErrorResponse>>(body)
        .ok()
        .and_then(|errors| errors.into_iter().next())
        .or_else(|| serde_json::from_str::<SalesforceErrorResponse>(body).ok());

    if let Some(err) = parsed {
        let message = if show_full_error {
            sanitize_error_message(&err.message)
        } else {
            summary
        };
        return Error::new(ErrorKind::SalesforceApi {
            error_code: err.error_code,
            message,
            fields: err.fields.unwrap_or_default(),
        });
    }

    let message = if show_full_error && !body.trim().is_empty() {
        format!("{}: {}", summary, sanitize_error_message(body))
    } else {
        summary
    };
    let kind = match status {
        401 => ErrorKind::Authentication(message),
        403 => ErrorKind::Authorization(message),
        404 => ErrorKind::NotFound(message),
        _ => ErrorKind::Http { status, message },
    };

    Error::new(kind)
}

fn token_pattern() -> &'static regex_lite::Regex {
    static PATTERN: OnceLock<regex_lite::Regex> = OnceLock::new();
    // Access tokens are the org ID, "!", then an opaque session string.
    PATTERN.get_or_init(|| {
        regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+")
            .unwrap_or_else(|_| unreachable!("static regex"))
    })
}

fn session_pattern() -> &'static regex_lite::Regex {
    static PATTERN: OnceLock<regex_lite::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}")
            .unwrap_or_else(|_| unreachable!("static regex"))
    })
}

/// Sanitize an error message to prevent exposing sensitive data.
///
/// Access tokens and session IDs are redacted and messages longer than
/// 500 characters are truncated.
pub fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let sanitized = token_pattern().replace_all(message, "[REDACTED_TOKEN]");
    let mut sanitized = session_pattern()
        .replace_all(&sanitized, "sid=[REDACTED]")
        .into_owned();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

/// Salesforce API error response format.
#[derive(Debug, serde::Deserialize)]
struct SalesforceErrorResponse {
    #[serde(alias = "errorCode")]
    error_code: String,
    message: String,
    fields: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_usage() {
        let usage = ApiUsage {
            used: 100,
            limit: 1000,
        };

        assert_eq!(usage.remaining(), 900);
        assert!((usage.percentage() - 10.0).abs() < 0.001);
        assert!(!usage.is_above_threshold(50.0));
        assert!(usage.is_above_threshold(5.0));
    }

    #[test]
    fn test_api_usage_from_header() {
        let usage = ApiUsage::from_header("api-usage=25/15000").unwrap();
        assert_eq!(usage, ApiUsage { used: 25, limit: 15000 });

        let usage = ApiUsage::from_header("per-app-api-usage=1/10, api-usage=7/100").unwrap();
        assert_eq!(usage.used, 7);

        assert!(ApiUsage::from_header("api-usage=bogus").is_none());
    }

    #[test]
    fn test_api_usage_edge_cases() {
        let usage = ApiUsage { used: 0, limit: 0 };
        assert_eq!(usage.remaining(), 0);
        assert!((usage.percentage() - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_sanitize_redacts_access_tokens() {
        let msg = "Session expired: 00Dxx0000001gEF!AQcAQH3k9s7LKbp_example_token_value.here";
        let sanitized = sanitize_error_message(msg);
        assert!(sanitized.contains("[REDACTED_TOKEN]"), "{sanitized}");
        assert!(!sanitized.contains("AQcAQH3k9s7LKbp"), "{sanitized}");
    }

    #[test]
    fn test_sanitize_redacts_session_ids() {
        let msg = "Invalid session: sid=abc123def456ghi789jkl012";
        let sanitized = sanitize_error_message(msg);
        assert!(sanitized.contains("sid=[REDACTED]"), "{sanitized}");
        assert!(!sanitized.contains("abc123def456"), "{sanitized}");
    }

    #[test]
    fn test_sanitize_truncates_long_messages() {
        let sanitized = sanitize_error_message(&"x".repeat(600));
        assert!(sanitized.len() < 600);
        assert!(sanitized.ends_with("...[truncated]"));

        // Never splits a multibyte character.
        let sanitized = sanitize_error_message(&"é".repeat(400));
        assert!(sanitized.ends_with("...[truncated]"));
    }

    #[test]
    fn test_sanitize_passes_through_clean_messages() {
        let msg = "No such column 'foo' on entity 'Account'";
        assert_eq!(sanitize_error_message(msg), msg);
    }

    #[test]
    fn test_parse_error_array_body() {
        let body = r#"[{"errorCode":"INVALID_FIELD","message":"No such column","fields":["Foo"]}]"#;
        let err = parse_error_response(400, body, None, true);
        match err.kind {
            ErrorKind::SalesforceApi {
                error_code,
                message,
                fields,
            } => {
                assert_eq!(error_code, "INVALID_FIELD");
                assert_eq!(message, "No such column");
                assert_eq!(fields, vec!["Foo".to_string()]);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_object_body() {
        let body = r#"{"errorCode":"NOT_FOUND","message":"The requested resource does not exist"}"#;
        let err = parse_error_response(404, body, None, true);
        assert!(matches!(err.kind, ErrorKind::SalesforceApi { ref error_code, .. } if error_code == "NOT_FOUND"));
    }

    #[test]
    fn test_parse_error_status_mapping() {
        assert!(matches!(
            parse_error_response(401, "bad session", None, true).kind,
            ErrorKind::Authentication(_)
        ));
        assert!(matches!(
            parse_error_response(403, "", None, true).kind,
            ErrorKind::Authorization(_)
        ));
        assert!(matches!(
            parse_error_response(404, "<html/>", None, true).kind,
            ErrorKind::NotFound(_)
        ));
        assert!(matches!(
            parse_error_response(500, "boom", None, true).kind,
            ErrorKind::Http { status: 500, .. }
        ));
        let limited = parse_error_response(429, "", Some(Duration::from_secs(5)), true);
        assert_eq!(limited.retry_after(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_parse_error_without_full_body() {
        let err = parse_error_response(500, "stack trace with secrets", None, false);
        let text = err.to_string();
        assert!(text.contains("500 status code"));
        assert!(!text.contains("stack trace"));

        let err = parse_error_response(500, "stack trace with secrets", None, true);
        assert!(err.to_string().contains("stack trace"));
    }
}
