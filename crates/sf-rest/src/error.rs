//! Error types for forcelink-rest.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Local validation failure carrying a Salesforce-style error code.
    pub(crate) fn invalid(error_code: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Salesforce {
            error_code: error_code.to_string(),
            message: message.into(),
        })
    }

    /// The wrapped client error, if this error came from the HTTP layer.
    pub fn client_error(&self) -> Option<&forcelink_client::Error> {
        self.source
            .as_ref()
            .and_then(|source| source.downcast_ref::<forcelink_client::Error>())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),

    #[error("Salesforce error: {error_code} - {message}")]
    Salesforce { error_code: String, message: String },

    #[error("Missing required data: {0}")]
    MissingRequiredData(String),

    #[error("{0}")]
    Other(String),
}

impl From<forcelink_client::Error> for Error {
    fn from(err: forcelink_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        forcelink_client::Error::from(err).into()
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        forcelink_client::Error::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_is_preserved() {
        let err: Error = forcelink_client::Error::invalid_argument("bad id").into();
        assert!(matches!(err.kind, ErrorKind::Client(_)));
        assert!(err.client_error().is_some_and(|e| e.is_invalid_argument()));
    }

    #[test]
    fn test_invalid_display() {
        let err = Error::invalid("INVALID_ID", "Invalid Salesforce ID format");
        assert_eq!(
            err.to_string(),
            "Salesforce error: INVALID_ID - Invalid Salesforce ID format"
        );
        assert!(err.client_error().is_none());
    }
}
