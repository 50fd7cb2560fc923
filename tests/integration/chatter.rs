//! Chatter integration tests.

use super::common::{connect, unique_suffix};
use forcelink::MessageSegment;

#[tokio::test]
#[ignore]
async fn test_chatter_post_and_comment_on_own_feed() {
    let sf = connect().await;
    let chatter = sf.chatter();

    let text = format!("forcelink integration post {}", unique_suffix());
    let item = chatter
        .post_feed_item("me", text.as_str(), None, None)
        .await
        .expect("post feed item");

    let comment = chatter
        .post_comment(&item.id, vec![MessageSegment::text("comment")], None, None)
        .await
        .expect("post comment");
    assert!(!comment.id.is_empty());

    let feed = chatter.my_news_feed(None).await.expect("news feed");
    assert!(feed.elements.iter().any(|e| e.id == item.id));

    sf.rest()
        .delete("FeedItem", &item.id)
        .await
        .expect("delete feed item");
}

#[tokio::test]
#[ignore]
async fn test_chatter_user_feed() {
    let sf = connect().await;
    sf.chatter()
        .user_news_feed("me", None)
        .await
        .expect("user profile feed");
}
