//! Feed response types.
//!
//! Output message segments carry many more fields than the input ones,
//! so they are kept as raw JSON here.

use serde::{Deserialize, Serialize};

/// A page of feed elements.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedElementPage {
    #[serde(default)]
    pub elements: Vec<FeedElement>,
    #[serde(rename = "currentPageUrl")]
    pub current_page_url: Option<String>,
    #[serde(rename = "nextPageUrl")]
    pub next_page_url: Option<String>,
    #[serde(rename = "updatesUrl")]
    pub updates_url: Option<String>,
}

/// A feed element such as a feed item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedElement {
    pub id: String,
    #[serde(rename = "feedElementType")]
    pub feed_element_type: Option<String>,
    #[serde(rename = "createdDate")]
    pub created_date: Option<String>,
    pub body: Option<FeedBody>,
    pub actor: Option<serde_json::Value>,
    pub url: Option<String>,
}

/// A comment on a feed element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Comment {
    pub id: String,
    #[serde(rename = "createdDate")]
    pub created_date: Option<String>,
    pub body: Option<FeedBody>,
    pub user: Option<serde_json::Value>,
    pub url: Option<String>,
}

/// A rendered message body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedBody {
    pub text: Option<String>,
    #[serde(rename = "messageSegments", default)]
    pub message_segments: Vec<serde_json::Value>,
}
