//! Salesforce record ID normalization.
//!
//! Salesforce issues record IDs in two forms:
//! - a 15-character, case-sensitive legacy form
//! - an 18-character, case-insensitive canonical form
//!
//! The canonical form is the 15-character body followed by a 3-character
//! checksum suffix. Each suffix character encodes which letters of one
//! 5-character chunk of the body were uppercase, so the original casing can
//! be recovered even after a case-insensitive system lowercases the ID.
//!
//! ```rust
//! use forcelink_client::id;
//!
//! assert_eq!(id::normalize("ka4PO0000002hby").unwrap(), "ka4PO0000002hbyYAA");
//! assert_eq!(id::normalize("ka4PO0000002hbyYAA").unwrap(), "ka4PO0000002hbyYAA");
//! assert!(id::normalize("short").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Length of the case-sensitive legacy form.
pub const SHORT_ID_LEN: usize = 15;

/// Length of the case-insensitive canonical form.
pub const FULL_ID_LEN: usize = 18;

const CHUNK_LEN: usize = 5;
const SUFFIX_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ012345";

/// Normalize a record ID to its 18-character form.
///
/// An 18-character ID is returned unchanged. A 15-character ID gets its
/// checksum suffix appended. Any other length fails with
/// [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument).
///
/// Characters are not checked against the Salesforce alphabet; anything that
/// is not an ASCII uppercase letter contributes a zero bit.
pub fn normalize(id: &str) -> Result<String> {
    match id.chars().count() {
        FULL_ID_LEN => Ok(id.to_string()),
        SHORT_ID_LEN => {
            let mut full = String::with_capacity(id.len() + 3);
            full.push_str(id);
            full.push_str(&suffix_for(id));
            Ok(full)
        }
        len => Err(Error::invalid_argument(format!(
            "record ID must be {} or {} characters long, got {}",
            SHORT_ID_LEN, FULL_ID_LEN, len
        ))),
    }
}

/// Normalize a record ID held in a dynamic JSON value.
///
/// Non-string values fail with `InvalidArgument`, the same as a string of
/// the wrong length.
pub fn normalize_value(value: &serde_json::Value) -> Result<String> {
    match value {
        serde_json::Value::String(id) => normalize(id),
        other => Err(Error::invalid_argument(format!(
            "record ID must be a string, got {}",
            json_type_name(other)
        ))),
    }
}

/// Compute the 3-character checksum suffix of a 15-character ID body.
pub fn checksum_suffix(body: &str) -> Result<String> {
    let len = body.chars().count();
    if len != SHORT_ID_LEN {
        return Err(Error::invalid_argument(format!(
            "checksum requires a {}-character ID body, got {}",
            SHORT_ID_LEN, len
        )));
    }
    Ok(suffix_for(body))
}

/// Caller guarantees `body` is exactly 15 characters.
fn suffix_for(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();
    chars
        .chunks(CHUNK_LEN)
        .map(|chunk| {
            let mask = chunk
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_ascii_uppercase())
                .fold(0usize, |mask, (i, _)| mask | (1 << i));
            SUFFIX_ALPHABET[mask] as char
        })
        .collect()
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// A record ID held in canonical 18-character form.
///
/// Two `RecordId`s are equal when their 18-character forms match ignoring
/// case, which is how Salesforce itself compares them.
#[derive(Clone, Eq)]
pub struct RecordId(String);

impl RecordId {
    /// Parse and normalize a 15- or 18-character record ID.
    pub fn parse(id: &str) -> Result<Self> {
        normalize(id).map(Self)
    }

    /// The 18-character form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The case-sensitive 15-character body.
    pub fn to_15_char(&self) -> String {
        self.0.chars().take(SHORT_ID_LEN).collect()
    }

    /// The three-character key prefix identifying the sObject type.
    pub fn key_prefix(&self) -> String {
        self.0.chars().take(3).collect()
    }

    /// Consume into the 18-character string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl std::hash::Hash for RecordId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordId").field(&self.0).finish()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RecordId::parse(&raw).map_err(serde::de::Error::custom)
    }
}
