//! Knowledge integration tests. The org must have Lightning Knowledge enabled.

use super::common::connect;
use forcelink::rest::ArticleListOptions;

#[tokio::test]
#[ignore]
async fn test_knowledge_settings_and_list() {
    let sf = connect().await;
    let rest = sf.rest();

    let settings = rest.knowledge_settings().await.expect("knowledge settings");
    assert!(settings.knowledge_enabled);

    let articles = rest
        .articles_list(&ArticleListOptions::default().with_page_size(5))
        .await
        .expect("article list");
    assert!(articles.articles.len() <= 5);

    if let Some(article) = articles.articles.first() {
        let details = rest
            .support_article_details(&article.id)
            .await
            .expect("article details");
        assert_eq!(details["id"], article.id.as_str());
    }
}

#[tokio::test]
#[ignore]
async fn test_knowledge_data_categories() {
    let sf = connect().await;
    let groups = sf
        .rest()
        .data_category_groups(None)
        .await
        .expect("data category groups");
    let _ = groups.category_groups.len();
}
