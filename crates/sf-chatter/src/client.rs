//! Chatter (Connect REST API) client.
//!
//! Every call accepts an optional Experience Cloud site ID; when given, the
//! request is routed through `connect/communities/{site_id}`.

use serde::Serialize;
use tracing::instrument;

use forcelink_auth::Credentials;
use forcelink_client::security::url as url_security;
use forcelink_client::{ClientConfig, RequestMethod, SalesforceClient};

use crate::error::{Error, ErrorKind, Result};
use crate::feed::{Comment, FeedElement, FeedElementPage};
use crate::message::{Message, MessageBody};

/// Alias the Connect API accepts for the context user.
const CONTEXT_USER: &str = "me";

#[derive(Serialize)]
struct FeedItemInput<'a> {
    body: MessageBody,
    #[serde(rename = "feedElementType")]
    feed_element_type: &'static str,
    #[serde(rename = "subjectId")]
    subject_id: &'a str,
    #[serde(rename = "createdById", skip_serializing_if = "Option::is_none")]
    created_by_id: Option<&'a str>,
}

#[derive(Serialize)]
struct CommentInput<'a> {
    body: MessageBody,
    #[serde(rename = "createdById", skip_serializing_if = "Option::is_none")]
    created_by_id: Option<&'a str>,
}

/// Salesforce Chatter client.
///
/// # Example
///
/// ```rust,ignore
/// use forcelink_chatter::{ChatterClient, Message};
///
/// let chatter = ChatterClient::new("https://myorg.my.salesforce.com", "token")?;
/// let feed = chatter.my_news_feed(None).await?;
/// chatter
///     .post_feed_item("0F9xx0000000001CAA", Message::from("Release notes are out"), None, None)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ChatterClient {
    client: SalesforceClient,
}

impl ChatterClient {
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let client = SalesforceClient::new(instance_url, access_token)?;
        Ok(Self { client })
    }

    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = SalesforceClient::with_config(instance_url, access_token, config)?;
        Ok(Self { client })
    }

    /// Create a client from issued credentials, keeping their API version.
    pub fn from_credentials(credentials: &impl Credentials) -> Result<Self> {
        let client = SalesforceClient::new(credentials.instance_url(), credentials.access_token())?
            .with_api_version(credentials.api_version());
        Ok(Self { client })
    }

    pub fn from_client(client: SalesforceClient) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &SalesforceClient {
        &self.client
    }

    pub fn instance_url(&self) -> &str {
        self.client.instance_url()
    }

    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    /// Set the API version. A leading `v` is accepted.
    pub fn with_api_version(mut self, version: impl AsRef<str>) -> Self {
        self.client = self.client.with_api_version(version);
        self
    }

    /// REST URL for a Chatter path, scoped to a site when one is given.
    fn chatter_url(&self, site_id: Option<&str>, path: &str) -> Result<String> {
        let path = match site_id {
            Some(site_id) => {
                check_id("site", site_id)?;
                format!("connect/communities/{}/chatter/{}", site_id, path)
            }
            None => format!("chatter/{}", path),
        };
        Ok(self.client.rest_url(&path))
    }

    /// The context user's news feed.
    #[instrument(skip(self))]
    pub async fn my_news_feed(&self, site_id: Option<&str>) -> Result<FeedElementPage> {
        let url = self.chatter_url(site_id, "feeds/news/me/feed-elements")?;
        self.client.get_json(&url).await.map_err(Into::into)
    }

    /// A user's profile feed. `user_id` may be `me`.
    #[instrument(skip(self))]
    pub async fn user_news_feed(
        &self,
        user_id: &str,
        site_id: Option<&str>,
    ) -> Result<FeedElementPage> {
        check_subject("user", user_id)?;
        let url = self.chatter_url(
            site_id,
            &format!("feeds/user-profile/{}/feed-elements", user_id),
        )?;
        self.client.get_json(&url).await.map_err(Into::into)
    }

    /// A group's record feed.
    #[instrument(skip(self))]
    pub async fn group_feed(&self, group_id: &str, site_id: Option<&str>) -> Result<FeedElementPage> {
        check_id("group", group_id)?;
        let url = self.chatter_url(site_id, &format!("feeds/record/{}/feed-elements", group_id))?;
        self.client.get_json(&url).await.map_err(Into::into)
    }

    /// Post a feed item to a user, group or record feed.
    ///
    /// `created_by_id` posts on behalf of another user, which needs the
    /// "Insert System Field Values for Chatter Feeds" permission.
    #[instrument(skip(self, message))]
    pub async fn post_feed_item(
        &self,
        subject_id: &str,
        message: impl Into<Message>,
        site_id: Option<&str>,
        created_by_id: Option<&str>,
    ) -> Result<FeedElement> {
        check_subject("subject", subject_id)?;
        if let Some(id) = created_by_id {
            check_id("creator", id)?;
        }
        let input = FeedItemInput {
            body: MessageBody {
                message_segments: message.into().into_segments()?,
            },
            feed_element_type: "FeedItem",
            subject_id,
            created_by_id,
        };
        let url = self.chatter_url(site_id, "feed-elements")?;
        let response = self
            .client
            .send_with_payload(
                RequestMethod::Post,
                &url,
                &input,
                &[("feedElementType", "FeedItem"), ("subjectId", subject_id)],
            )
            .await?;
        serde_json::from_value(response).map_err(Into::into)
    }

    /// Comment on a feed element.
    #[instrument(skip(self, message))]
    pub async fn post_comment(
        &self,
        feed_element_id: &str,
        message: impl Into<Message>,
        site_id: Option<&str>,
        created_by_id: Option<&str>,
    ) -> Result<Comment> {
        check_id("feed element", feed_element_id)?;
        if let Some(id) = created_by_id {
            check_id("creator", id)?;
        }
        let input = CommentInput {
            body: MessageBody {
                message_segments: message.into().into_segments()?,
            },
            created_by_id,
        };
        let url = self.chatter_url(
            site_id,
            &format!("feed-elements/{}/capabilities/comments/items", feed_element_id),
        )?;
        let response = self
            .client
            .send_with_payload(RequestMethod::Post, &url, &input, &[])
            .await?;
        serde_json::from_value(response).map_err(Into::into)
    }
}

fn check_id(what: &str, id: &str) -> Result<()> {
    if url_security::is_valid_salesforce_id(id) {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::Salesforce {
            error_code: "INVALID_ID".to_string(),
            message: format!("Invalid {} ID format", what),
        }))
    }
}

fn check_subject(what: &str, id: &str) -> Result<()> {
    if id == CONTEXT_USER {
        Ok(())
    } else {
        check_id(what, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageSegment;
    use forcelink_auth::SalesforceCredentials;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GROUP_ID: &str = "0F9xx0000000001CAA";
    const SITE_ID: &str = "0DBxx0000000001GAA";
    const USER_ID: &str = "005xx000001SwiUAAS";
    const FEED_ELEMENT_ID: &str = "0D5xx0000000001CAA";

    fn feed_page() -> serde_json::Value {
        json!({
            "elements": [{
                "id": FEED_ELEMENT_ID,
                "feedElementType": "FeedItem",
                "body": {"text": "Hello", "messageSegments": []}
            }],
            "currentPageUrl": null,
            "nextPageUrl": null
        })
    }

    #[test]
    fn test_chatter_url_routing() {
        let chatter = ChatterClient::new("https://na1.salesforce.com", "token").unwrap();
        assert_eq!(
            chatter.chatter_url(None, "feed-elements").unwrap(),
            "https://na1.salesforce.com/services/data/v55.0/chatter/feed-elements"
        );
        assert_eq!(
            chatter.chatter_url(Some(SITE_ID), "feed-elements").unwrap(),
            format!(
                "https://na1.salesforce.com/services/data/v55.0/connect/communities/{SITE_ID}/chatter/feed-elements"
            )
        );
        assert!(chatter.chatter_url(Some("../x"), "feed-elements").is_err());
    }

    #[test]
    fn test_from_credentials() {
        let creds = SalesforceCredentials::new("https://na1.salesforce.com", "token", "v58.0");
        let chatter = ChatterClient::from_credentials(&creds).unwrap();
        assert_eq!(chatter.api_version(), "58.0");
    }

    #[tokio::test]
    async fn test_feeds_wiremock() {
        let mock_server = MockServer::start().await;

        for feed_path in [
            "/services/data/v55.0/chatter/feeds/news/me/feed-elements".to_string(),
            format!("/services/data/v55.0/chatter/feeds/user-profile/{USER_ID}/feed-elements"),
            format!(
                "/services/data/v55.0/connect/communities/{SITE_ID}/chatter/feeds/record/{GROUP_ID}/feed-elements"
            ),
        ] {
            Mock::given(method("GET"))
                .and(path(feed_path))
                .respond_with(ResponseTemplate::new(200).set_body_json(feed_page()))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let chatter = ChatterClient::new(mock_server.uri(), "test-token").unwrap();

        let mine = chatter.my_news_feed(None).await.unwrap();
        assert_eq!(mine.elements[0].id, FEED_ELEMENT_ID);

        chatter.user_news_feed(USER_ID, None).await.unwrap();
        chatter.group_feed(GROUP_ID, Some(SITE_ID)).await.unwrap();
    }

    #[tokio::test]
    async fn test_post_feed_item_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v55.0/chatter/feed-elements"))
            .and(query_param("feedElementType", "FeedItem"))
            .and(query_param("subjectId", GROUP_ID))
            .and(body_json(json!({
                "body": {"messageSegments": [{"type": "Text", "text": "Release notes are out"}]},
                "feedElementType": "FeedItem",
                "subjectId": GROUP_ID
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": FEED_ELEMENT_ID,
                "feedElementType": "FeedItem"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let chatter = ChatterClient::new(mock_server.uri(), "test-token").unwrap();
        let item = chatter
            .post_feed_item(GROUP_ID, "Release notes are out", None, None)
            .await
            .unwrap();
        assert_eq!(item.id, FEED_ELEMENT_ID);
    }

    #[tokio::test]
    async fn test_post_comment_with_segments_and_creator() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!(
                "/services/data/v55.0/connect/communities/{SITE_ID}/chatter/feed-elements/{FEED_ELEMENT_ID}/capabilities/comments/items"
            )))
            .and(body_json(json!({
                "body": {"messageSegments": [
                    {"type": "Mention", "id": USER_ID},
                    {"type": "Text", "text": " thanks!"}
                ]},
                "createdById": USER_ID
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "0D7xx0000000001CAA",
                "body": {"text": "@Ada thanks!", "messageSegments": []}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let chatter = ChatterClient::new(mock_server.uri(), "test-token").unwrap();
        let comment = chatter
            .post_comment(
                FEED_ELEMENT_ID,
                vec![
                    MessageSegment::mention(USER_ID),
                    MessageSegment::text(" thanks!"),
                ],
                Some(SITE_ID),
                Some(USER_ID),
            )
            .await
            .unwrap();
        assert_eq!(
            comment.body.and_then(|b| b.text).as_deref(),
            Some("@Ada thanks!")
        );
    }

    #[tokio::test]
    async fn test_post_requires_message_and_valid_ids() {
        let chatter = ChatterClient::new("https://test.salesforce.com", "token").unwrap();

        let err = chatter
            .post_feed_item(GROUP_ID, "", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MissingRequiredData(_)));

        let err = chatter
            .post_comment("not-an-id", "hi", None, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("INVALID_ID"));

        let err = chatter.group_feed("me", None).await.unwrap_err();
        assert!(err.to_string().contains("INVALID_ID"));
    }
}
