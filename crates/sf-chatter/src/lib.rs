//! # forcelink-chatter
//!
//! Salesforce Chatter client built on the Connect REST API.
//!
//! ## Features
//!
//! - **Feeds** - News, user profile and group feeds
//! - **Posting** - Feed items and comments, as plain text or message segments
//! - **Sites** - Optional Experience Cloud site routing on every call
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_chatter::{ChatterClient, Message, MessageSegment};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcelink_chatter::Error> {
//!     let chatter = ChatterClient::new("https://myorg.my.salesforce.com", "token")?;
//!
//!     let item = chatter
//!         .post_feed_item("0F9xx0000000001CAA", "Release notes are out", None, None)
//!         .await?;
//!
//!     chatter
//!         .post_comment(
//!             &item.id,
//!             Message::Segments(vec![
//!                 MessageSegment::mention("005xx000001SwiUAAS"),
//!                 MessageSegment::text(" please review"),
//!             ]),
//!             None,
//!             None,
//!         )
//!         .await?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod feed;
mod message;

pub use client::ChatterClient;
pub use error::{Error, ErrorKind, Result};
pub use feed::{Comment, FeedBody, FeedElement, FeedElementPage};
pub use message::{Message, MessageBody, MessageSegment};
