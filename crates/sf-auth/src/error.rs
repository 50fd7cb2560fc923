//! Error types for forcelink-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

/// Result type alias for forcelink-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for forcelink-auth operations.
///
/// Error messages are sanitized to prevent accidental credential exposure.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }
}

/// The kind of error that occurred.
///
/// Error messages avoid including credential values.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// OAuth error response from Salesforce.
    #[error("OAuth error: {error} - {description}")]
    OAuth { error: String, description: String },

    /// The token endpoint answered with something other than 200.
    #[error("Failed to connect to the Salesforce instance. ({status}) {message}")]
    ConnectionFailed { status: u16, message: String },

    /// Invalid credentials configuration.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A connection field needed for the request is not set.
    #[error("Missing required connection field: {0}")]
    MissingField(String),

    /// HTTP error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A helper file that is neither JSON nor YAML.
    #[error("Unable to determine the file type of {0} (expected JSON or YAML)")]
    UnknownFileType(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::with_source(ErrorKind::Yaml(err.to_string()), err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidInput(err.to_string()), err)
    }
}

impl From<forcelink_client::Error> for Error {
    fn from(err: forcelink_client::Error) -> Self {
        let kind = match &err.kind {
            forcelink_client::ErrorKind::Io(message) => ErrorKind::Io(message.clone()),
            _ => {
                // Sanitize any potential credential exposure
                let message = err.to_string();
                if message.contains("Bearer") || message.contains("password=") {
                    ErrorKind::Http("Client error (details redacted for security)".to_string())
                } else {
                    ErrorKind::Http(message)
                }
            }
        };
        Error::with_source(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        let err = ErrorKind::OAuth {
            error: "invalid_grant".to_string(),
            description: "authentication failure".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "OAuth error: invalid_grant - authentication failure"
        );

        let err = ErrorKind::ConnectionFailed {
            status: 400,
            message: "bad request".to_string(),
        };
        assert!(err
            .to_string()
            .starts_with("Failed to connect to the Salesforce instance."));
    }

    #[test]
    fn test_client_io_error_stays_io() {
        let client_err = forcelink_client::Error::new(forcelink_client::ErrorKind::Io(
            "unable to locate the file".to_string(),
        ));
        let err: Error = client_err.into();
        assert!(matches!(err.kind, ErrorKind::Io(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_client_error_redacts_credentials() {
        let client_err = forcelink_client::Error::new(forcelink_client::ErrorKind::Other(
            "request to https://login.salesforce.com?password=hunter2 failed".to_string(),
        ));
        let err: Error = client_err.into();
        assert!(!err.to_string().contains("hunter2"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{not: [a list").unwrap_err();
        let err: Error = yaml_err.into();
        assert!(matches!(err.kind, ErrorKind::Yaml(_)));
    }
}
