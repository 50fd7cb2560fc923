//! Post to a Chatter feed and comment on the new item.
//!
//!   cargo run --example chatter_post -- <group or user id> "Message text"

use forcelink::{ConnectionInfo, Message, MessageSegment, Salesforce};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let subject = args.next().unwrap_or_else(|| "me".to_string());
    let text = args
        .next()
        .unwrap_or_else(|| "Hello from forcelink".to_string());

    let sf = Salesforce::connect(ConnectionInfo::from_env()?).await?;
    let chatter = sf.chatter();

    let item = chatter
        .post_feed_item(&subject, Message::Text(text), None, None)
        .await?;
    println!("Posted feed item {}", item.id);

    let comment = chatter
        .post_comment(
            &item.id,
            Message::Segments(vec![
                MessageSegment::MarkupBegin {
                    markup_type: "Bold".to_string(),
                },
                MessageSegment::text("Posted by forcelink"),
                MessageSegment::MarkupEnd {
                    markup_type: "Bold".to_string(),
                },
            ]),
            None,
            None,
        )
        .await?;
    println!("Commented {}", comment.id);

    let feed = chatter.my_news_feed(None).await?;
    for element in feed.elements.iter().take(5) {
        let text = element
            .body
            .as_ref()
            .and_then(|b| b.text.as_deref())
            .unwrap_or("");
        println!("{}  {}", element.id, text);
    }

    Ok(())
}
