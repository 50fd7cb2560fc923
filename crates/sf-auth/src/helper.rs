//! Helper configuration files.
//!
//! A helper file is YAML or JSON with an optional `connection` block and an
//! optional `ssl_verify` flag:
//!
//! ```yaml
//! connection:
//!   username: admin@example.com
//!   password: hunter2
//!   security_token: abc123
//!   client_key: 3MVG9...
//!   client_secret: 1234
//!   base_url: https://example.my.salesforce.com
//! ssl_verify: yes
//! ```

use std::path::Path;

use forcelink_client::utils::{get_file_type, FileType};
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::connection::ConnectionInfo;
use crate::error::{Error, ErrorKind, Result};

/// Settings read from a helper file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperSettings {
    /// The `connection` block, if present.
    pub connection: Option<ConnectionInfo>,
    /// Verify TLS certificates. Defaults to `true` when absent.
    pub ssl_verify: bool,
}

impl Default for HelperSettings {
    fn default() -> Self {
        Self {
            connection: None,
            ssl_verify: true,
        }
    }
}

#[derive(Deserialize)]
struct RawHelper {
    #[serde(default)]
    connection: Option<ConnectionInfo>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    ssl_verify: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

/// Accepts booleans and the strings yes/no/true/false in any case.
fn deserialize_flag<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<bool>, D::Error> {
    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(value)) => Ok(Some(value)),
        Some(Flag::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" => Ok(Some(true)),
            "no" | "false" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "expected yes/no or true/false, got {other:?}"
            ))),
        },
    }
}

impl HelperSettings {
    /// Load settings from `path`.
    ///
    /// With `file_type` unset the type is detected from the extension or,
    /// failing that, from the contents.
    pub fn from_file(path: impl AsRef<Path>, file_type: Option<FileType>) -> Result<Self> {
        let path = path.as_ref();
        let file_type = match file_type {
            Some(file_type) => file_type,
            None => get_file_type(path)?.ok_or_else(|| {
                Error::new(ErrorKind::UnknownFileType(path.display().to_string()))
            })?,
        };

        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_str_as(&contents, file_type)?;
        info!(path = %path.display(), %file_type, "helper file imported");
        Ok(settings)
    }

    /// Parse settings from a string in the given format.
    pub fn from_str_as(contents: &str, file_type: FileType) -> Result<Self> {
        let raw: RawHelper = match file_type {
            FileType::Json => serde_json::from_str(contents)?,
            FileType::Yaml => serde_yaml::from_str(contents)?,
        };
        Ok(Self {
            connection: raw.connection,
            ssl_verify: raw.ssl_verify.unwrap_or(true),
        })
    }

    /// The connection block, or empty connection info if the file had none.
    pub fn connection_info(&self) -> ConnectionInfo {
        self.connection.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
# helper file
connection:
  username: admin@example.com
  password: hunter2
  security_token: abc123
  client_key: consumer-key
  client_secret: consumer-secret
  base_url: https://acme.my.salesforce.com
  org_id: 00Dxx0000001gEF
ssl_verify: no
"#;

    #[test]
    fn test_yaml_helper() {
        let settings = HelperSettings::from_str_as(YAML, FileType::Yaml).unwrap();
        assert!(!settings.ssl_verify);

        let info = settings.connection_info();
        assert_eq!(info.username.as_deref(), Some("admin@example.com"));
        assert_eq!(info.org_id.as_deref(), Some("00Dxx0000001gEF"));
        assert_eq!(
            info.token_endpoint(),
            "https://acme.my.salesforce.com/services/oauth2/token"
        );
    }

    #[test]
    fn test_json_helper() {
        let json = r#"{"connection": {"username": "a@b.com", "endpoint_url": "https://test.salesforce.com/services/oauth2/token"}, "ssl_verify": true}"#;
        let settings = HelperSettings::from_str_as(json, FileType::Json).unwrap();
        assert!(settings.ssl_verify);
        assert_eq!(
            settings.connection_info().token_endpoint(),
            "https://test.salesforce.com/services/oauth2/token"
        );
    }

    #[test]
    fn test_ssl_verify_defaults_to_true() {
        let settings =
            HelperSettings::from_str_as("connection:\n  username: a@b.com\n", FileType::Yaml)
                .unwrap();
        assert!(settings.ssl_verify);

        let settings = HelperSettings::from_str_as("ssl_verify: ~\n", FileType::Yaml).unwrap();
        assert!(settings.ssl_verify);
        assert!(settings.connection.is_none());
    }

    #[test]
    fn test_ssl_verify_string_forms() {
        for (text, expected) in [("YES", true), ("'no'", false), ("\"True\"", true), ("false", false)] {
            let settings =
                HelperSettings::from_str_as(&format!("ssl_verify: {text}\n"), FileType::Yaml)
                    .unwrap();
            assert_eq!(settings.ssl_verify, expected, "ssl_verify: {text}");
        }

        assert!(HelperSettings::from_str_as("ssl_verify: maybe\n", FileType::Yaml).is_err());
    }

    #[test]
    fn test_from_file_detects_type() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("helper.yml");
        std::fs::write(&yaml_path, YAML).unwrap();
        let settings = HelperSettings::from_file(&yaml_path, None).unwrap();
        assert_eq!(
            settings.connection_info().client_key.as_deref(),
            Some("consumer-key")
        );

        let json_path = dir.path().join("helper.cfg");
        std::fs::write(&json_path, r#"{"connection": {"username": "a@b.com"}}"#).unwrap();
        let settings = HelperSettings::from_file(&json_path, None).unwrap();
        assert_eq!(settings.connection_info().username.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_from_file_explicit_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("helper.txt");
        std::fs::write(&path, "ssl_verify: yes\n").unwrap();

        let settings = HelperSettings::from_file(&path, Some(FileType::Yaml)).unwrap();
        assert!(settings.ssl_verify);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("helper.txt");
        std::fs::write(&path, "ssl_verify: yes\n").unwrap();

        let err = HelperSettings::from_file(&path, None).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnknownFileType(_)));

        let err = HelperSettings::from_file(dir.path().join("missing.yml"), None).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Io(_)));
    }
}
