//! List Knowledge articles, then draft and publish a new one.
//!
//!   cargo run --example knowledge_articles -- "Article title"

use anyhow::Context;
use forcelink::rest::ArticleListOptions;
use forcelink::{ConnectionInfo, Salesforce};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let title = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "forcelink demo article".to_string());

    let sf = Salesforce::connect(ConnectionInfo::from_env()?).await?;
    let rest = sf.rest();

    let options = ArticleListOptions::default()
        .with_sort("LastPublishedDate")
        .with_order("desc")
        .with_page_size(10);
    for article in rest.articles_list(&options).await?.articles {
        println!(
            "{}  {}",
            article.article_number,
            article.title.as_deref().unwrap_or("(untitled)")
        );
    }

    if let Some(existing) = rest.check_for_existing_article(&title, None).await? {
        println!("'{}' already exists as {}", title, existing.article_number);
        return Ok(());
    }

    let url_name: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let draft_id = rest
        .create_article(None, &json!({"Title": title, "UrlName": url_name}))
        .await
        .context("creating draft")?;
    println!("Created draft {draft_id}");

    rest.publish_article(&draft_id, None)
        .await
        .context("publishing draft")?;
    println!("Published {}", rest.article_url(&draft_id, None).await?);

    Ok(())
}
