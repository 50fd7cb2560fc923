//! Chatter message bodies.
//!
//! A post or comment body is a list of message segments. Plain text needs
//! only a single `Text` segment, which [`Message::Text`] builds for you.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One segment of a Chatter message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MessageSegment {
    Text {
        text: String,
    },
    /// @-mention of a user or group by ID.
    Mention {
        id: String,
    },
    /// A hashtag, without the leading `#`.
    Hashtag {
        tag: String,
    },
    Link {
        url: String,
    },
    /// Opens a rich-text markup span such as `Paragraph` or `Bold`.
    MarkupBegin {
        #[serde(rename = "markupType")]
        markup_type: String,
    },
    MarkupEnd {
        #[serde(rename = "markupType")]
        markup_type: String,
    },
    /// An image already uploaded as a file.
    InlineImage {
        #[serde(rename = "fileId")]
        file_id: String,
        #[serde(rename = "altText", skip_serializing_if = "Option::is_none")]
        alt_text: Option<String>,
    },
}

impl MessageSegment {
    pub fn text(text: impl Into<String>) -> Self {
        MessageSegment::Text { text: text.into() }
    }

    pub fn mention(id: impl Into<String>) -> Self {
        MessageSegment::Mention { id: id.into() }
    }
}

/// The body of a feed item or comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Plain text, sent as a single `Text` segment.
    Text(String),
    /// Caller-built segments, sent as given.
    Segments(Vec<MessageSegment>),
}

impl Message {
    /// The segments to send. Empty text or an empty segment list fails
    /// with `MissingRequiredData`.
    pub fn into_segments(self) -> Result<Vec<MessageSegment>> {
        match self {
            Message::Text(text) if text.is_empty() => Err(Error::missing(
                "message text or message segments are required",
            )),
            Message::Text(text) => Ok(vec![MessageSegment::Text { text }]),
            Message::Segments(segments) if segments.is_empty() => Err(Error::missing(
                "message text or message segments are required",
            )),
            Message::Segments(segments) => Ok(segments),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<Vec<MessageSegment>> for Message {
    fn from(segments: Vec<MessageSegment>) -> Self {
        Message::Segments(segments)
    }
}

/// Wire form of a message body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    #[serde(rename = "messageSegments")]
    pub message_segments: Vec<MessageSegment>,
}
