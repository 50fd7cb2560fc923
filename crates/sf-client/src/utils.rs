//! Small string, URL and file helpers shared by the API crates.

use std::path::Path;

use rand::distr::Alphanumeric;
use rand::Rng;
use tracing::warn;

use crate::error::{Error, ErrorKind, Result};

/// Form-encode a string: reserved bytes are percent-encoded and spaces become `+`.
///
/// ```rust
/// use forcelink_client::utils::url_encode;
///
/// assert_eq!(url_encode("Title = 'Reset'"), "Title+%3D+%27Reset%27");
/// ```
pub fn url_encode(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Reverse [`url_encode`]: `+` becomes a space and percent escapes are decoded.
///
/// Fails with `InvalidArgument` if the decoded bytes are not UTF-8.
pub fn url_decode(encoded: &str) -> Result<String> {
    let spaced = encoded.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| Error::with_source(ErrorKind::InvalidArgument(e.to_string()), e))
}

/// A random alphanumeric string of `length` characters appended to `prefix`.
pub fn random_string(length: usize, prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + length);
    out.push_str(prefix);
    out.extend(
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from),
    );
    out
}

/// The `refid` query parameter of a rich-text image URL.
///
/// Works with absolute URLs and with the instance-relative
/// `/servlet/rtaImage?...` form.
pub fn image_ref_id(image_url: &str) -> Option<String> {
    let (_, query) = image_url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "refid")
        .map(|(_, value)| value.into_owned())
}

/// Structured configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Json,
    Yaml,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Json => f.write_str("json"),
            FileType::Yaml => f.write_str("yaml"),
        }
    }
}

impl std::str::FromStr for FileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(FileType::Json),
            "yaml" | "yml" => Ok(FileType::Yaml),
            other => Err(Error::invalid_argument(format!("unknown file type: {other}"))),
        }
    }
}

/// Work out whether a file holds JSON or YAML.
///
/// The extension decides when it is `.json`, `.yml` or `.yaml`. Otherwise
/// the first non-comment line containing `{` marks the file as JSON.
/// `Ok(None)` means the type could not be determined; a missing file is an
/// `Io` error.
pub fn get_file_type(path: impl AsRef<Path>) -> Result<Option<FileType>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::new(ErrorKind::Io(format!(
            "unable to locate the file: {}",
            path.display()
        ))));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => return Ok(Some(FileType::Json)),
        Some("yml") | Some("yaml") => return Ok(Some(FileType::Yaml)),
        _ => {}
    }

    warn!(path = %path.display(), "unable to recognize the file type by its extension");
    let contents = std::fs::read_to_string(path)?;
    let looks_like_json = contents
        .lines()
        .filter(|line| !line.starts_with('#'))
        .any(|line| line.contains('{'));

    Ok(looks_like_json.then_some(FileType::Json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_url_encode_uses_plus_for_spaces() {
        assert_eq!(url_encode("SELECT Id FROM Account"), "SELECT+Id+FROM+Account");
        assert_eq!(url_encode("a&b=c/d"), "a%26b%3Dc%2Fd");
        assert_eq!(url_encode("plain"), "plain");
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode("SELECT+Id+FROM+Account").unwrap(), "SELECT Id FROM Account");
        assert_eq!(url_decode("a%26b%3Dc%2Fd").unwrap(), "a&b=c/d");
        assert_eq!(url_decode("100%25").unwrap(), "100%");
        assert!(url_decode("%FF%FE").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_url_round_trip_with_unicode() {
        let raw = "Café crème & co";
        assert_eq!(url_decode(&url_encode(raw)).unwrap(), raw);
    }

    #[test]
    fn test_random_string() {
        let value = random_string(10, "image_");
        assert!(value.starts_with("image_"));
        assert_eq!(value.len(), 16);
        assert!(value["image_".len()..].chars().all(|c| c.is_ascii_alphanumeric()));

        assert_eq!(random_string(0, "x"), "x");
        assert_ne!(random_string(32, ""), random_string(32, ""));
    }

    #[test]
    fn test_image_ref_id() {
        let url = "https://example.my.salesforce.com/servlet/rtaImage?eid=ka4PO0000002hby&feoid=00N5e00000Ppb8A&refid=0EM5e000000h2lr";
        assert_eq!(image_ref_id(url).as_deref(), Some("0EM5e000000h2lr"));

        let relative = "/servlet/rtaImage?refid=0EM5e000000h2lr#top";
        assert_eq!(image_ref_id(relative).as_deref(), Some("0EM5e000000h2lr"));

        assert_eq!(image_ref_id("https://example.com/image.png"), None);
        assert_eq!(image_ref_id("https://example.com/i?eid=1"), None);
    }

    #[test]
    fn test_file_type_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("helper.json");
        let yaml = dir.path().join("helper.yml");
        std::fs::write(&json, "{}").unwrap();
        std::fs::write(&yaml, "connection: {}").unwrap();

        assert_eq!(get_file_type(&json).unwrap(), Some(FileType::Json));
        assert_eq!(get_file_type(&yaml).unwrap(), Some(FileType::Yaml));
    }

    #[test]
    fn test_file_type_from_contents() {
        let mut json = tempfile::NamedTempFile::new().unwrap();
        writeln!(json, "# leading comment with {{ brace").unwrap();
        writeln!(json, "{{\"connection\": {{}}}}").unwrap();
        assert_eq!(get_file_type(json.path()).unwrap(), Some(FileType::Json));

        let mut unknown = tempfile::NamedTempFile::new().unwrap();
        writeln!(unknown, "# only a comment {{").unwrap();
        writeln!(unknown, "connection:").unwrap();
        assert_eq!(get_file_type(unknown.path()).unwrap(), None);
    }

    #[test]
    fn test_file_type_missing_file() {
        let err = get_file_type("/definitely/not/here.yml").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Io(_)));
    }

    #[test]
    fn test_file_type_from_str() {
        assert_eq!("YAML".parse::<FileType>().unwrap(), FileType::Yaml);
        assert_eq!("json".parse::<FileType>().unwrap(), FileType::Json);
        assert!("toml".parse::<FileType>().is_err());
        assert_eq!(FileType::Yaml.to_string(), "yaml");
    }
}
