//! Knowledge Management types for the Salesforce REST API.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The article version sObject used when none is given.
pub const DEFAULT_ARTICLE_SOBJECT: &str = "Knowledge__kav";

/// Sort fields accepted by the article list endpoint.
pub const ARTICLE_SORT_FIELDS: [&str; 4] = ["LastPublishedDate", "CreatedDate", "Title", "ViewScore"];

/// Largest page the article list endpoint returns.
pub const MAX_ARTICLE_PAGE_SIZE: u32 = 100;

/// Knowledge management settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KnowledgeSettings {
    #[serde(rename = "defaultLanguage", default)]
    pub default_language: String,
    #[serde(rename = "knowledgeEnabled", default)]
    pub knowledge_enabled: bool,
    #[serde(default)]
    pub languages: Vec<serde_json::Value>,
}

/// Response from knowledge articles endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KnowledgeArticlesResponse {
    #[serde(default)]
    pub articles: Vec<KnowledgeArticle>,
    #[serde(rename = "currentPageUrl")]
    pub current_page_url: Option<String>,
    #[serde(rename = "nextPageUrl")]
    pub next_page_url: Option<String>,
    #[serde(rename = "pageNumber", default)]
    pub page_number: i32,
}

/// A knowledge article summary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KnowledgeArticle {
    pub id: String,
    #[serde(rename = "articleNumber", default)]
    pub article_number: String,
    pub title: Option<String>,
    #[serde(rename = "urlName")]
    pub url_name: Option<String>,
    pub summary: Option<String>,
    #[serde(rename = "lastPublishedDate")]
    pub last_published_date: Option<String>,
    #[serde(rename = "viewScore")]
    pub view_score: Option<f64>,
}

/// Filters and paging for [`articles_list`](crate::SalesforceRestClient::articles_list).
///
/// Out-of-range values are corrected rather than rejected: an unknown sort
/// or order is dropped, the page size is capped at 100 and page numbers
/// below 1 become 1. Each correction is logged at `warn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleListOptions {
    pub query: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page_size: u32,
    pub page_number: i64,
}

impl Default for ArticleListOptions {
    fn default() -> Self {
        Self {
            query: None,
            sort: None,
            order: None,
            page_size: 20,
            page_number: 1,
        }
    }
}

impl ArticleListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// One of `LastPublishedDate`, `CreatedDate`, `Title` or `ViewScore`.
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// `ASC` or `DESC`, in any case.
    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page_number(mut self, page_number: i64) -> Self {
        self.page_number = page_number;
        self
    }

    /// The query parameters to send, after correction.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);

        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            params.push(("q", query.to_string()));
        }

        match self.sort.as_deref() {
            Some(sort) if ARTICLE_SORT_FIELDS.contains(&sort) => {
                params.push(("sort", sort.to_string()));
            }
            Some(sort) => warn!(sort, "ignoring invalid article sort field"),
            None => {}
        }

        if let Some(order) = self.order.as_deref() {
            let upper = order.to_ascii_uppercase();
            if upper == "ASC" || upper == "DESC" {
                params.push(("order", upper));
            } else {
                warn!(order, "ignoring invalid article sort order");
            }
        }

        let page_size = if self.page_size > MAX_ARTICLE_PAGE_SIZE {
            warn!(
                page_size = self.page_size,
                "article page size exceeds the maximum, using {}", MAX_ARTICLE_PAGE_SIZE
            );
            MAX_ARTICLE_PAGE_SIZE
        } else {
            self.page_size
        };
        params.push(("pageSize", page_size.to_string()));

        let page_number = if self.page_number < 1 {
            warn!(page_number = self.page_number, "invalid article page number, using 1");
            1
        } else {
            self.page_number
        };
        params.push(("pageNumber", page_number.to_string()));

        params
    }
}

/// An article found by title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExistingArticle {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "ArticleNumber")]
    pub article_number: String,
}

/// Publication state of one article version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleVersion {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "PublishStatus")]
    pub publish_status: String,
    #[serde(rename = "VersionNumber")]
    pub version_number: u32,
    #[serde(rename = "KnowledgeArticleId")]
    pub knowledge_article_id: String,
}

/// Outcome of publishing one version in a batch.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub version_id: String,
    /// `None` on success, otherwise the error text.
    pub error: Option<String>,
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Response from data category groups endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataCategoryGroupsResponse {
    #[serde(rename = "categoryGroups", default)]
    pub category_groups: Vec<DataCategoryGroup>,
}

/// A data category group.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataCategoryGroup {
    pub name: String,
    pub label: String,
    #[serde(rename = "objectUsage")]
    pub object_usage: Option<String>,
    #[serde(rename = "topCategoriesUrl")]
    pub top_categories_url: Option<String>,
}

/// Response from data categories endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataCategoriesResponse {
    #[serde(default)]
    pub categories: Vec<DataCategory>,
}

/// A data category and its children.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataCategory {
    pub name: String,
    pub label: String,
    pub url: Option<String>,
    #[serde(rename = "childCategories", default)]
    pub child_categories: Vec<DataCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(options: &ArticleListOptions) -> Vec<(&'static str, String)> {
        options.to_params()
    }

    #[test]
    fn test_default_list_params() {
        assert_eq!(
            params(&ArticleListOptions::new()),
            vec![("pageSize", "20".to_string()), ("pageNumber", "1".to_string())]
        );
    }

    #[test]
    fn test_list_params_pass_valid_values() {
        let options = ArticleListOptions::new()
            .with_query("password reset")
            .with_sort("Title")
            .with_order("desc")
            .with_page_size(50)
            .with_page_number(3);
        assert_eq!(
            params(&options),
            vec![
                ("q", "password reset".to_string()),
                ("sort", "Title".to_string()),
                ("order", "DESC".to_string()),
                ("pageSize", "50".to_string()),
                ("pageNumber", "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_params_correct_invalid_values() {
        let options = ArticleListOptions::new()
            .with_sort("title")
            .with_order("sideways")
            .with_page_size(500)
            .with_page_number(-4);
        assert_eq!(
            params(&options),
            vec![("pageSize", "100".to_string()), ("pageNumber", "1".to_string())]
        );

        let options = ArticleListOptions::new().with_page_number(0);
        assert!(params(&options).contains(&("pageNumber", "1".to_string())));
    }

    #[test]
    fn test_knowledge_articles_response_deserialize() {
        let json = json!({
            "articles": [{
                "id": "kA0xx0000000001",
                "articleNumber": "000001",
                "title": "How to Reset Password",
                "urlName": "how-to-reset-password",
                "summary": "Instructions for resetting your password",
                "viewScore": 87.5
            }],
            "currentPageUrl": "/services/data/v55.0/support/knowledgeArticles?pageNumber=1",
            "nextPageUrl": null,
            "pageNumber": 1
        });
        let response: KnowledgeArticlesResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.articles.len(), 1);
        assert_eq!(response.articles[0].article_number, "000001");
        assert_eq!(response.articles[0].view_score, Some(87.5));
        assert!(response.next_page_url.is_none());
    }

    #[test]
    fn test_article_version_deserialize() {
        let json = json!({
            "attributes": {"type": "Knowledge__kav"},
            "Id": "ka4PO0000002hbyYAA",
            "PublishStatus": "Draft",
            "VersionNumber": 3,
            "KnowledgeArticleId": "kA0PO0000001abcKAA"
        });
        let version: ArticleVersion = serde_json::from_value(json).unwrap();
        assert_eq!(version.publish_status, "Draft");
        assert_eq!(version.version_number, 3);
    }

    #[test]
    fn test_data_categories_response_deserialize() {
        let json = json!({
            "categories": [{
                "name": "Software",
                "label": "Software",
                "url": "/support/dataCategoryGroups/Products/dataCategories/Software",
                "childCategories": [{
                    "name": "CRM",
                    "label": "CRM",
                    "url": null,
                    "childCategories": []
                }]
            }]
        });
        let response: DataCategoriesResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.categories.len(), 1);
        assert_eq!(response.categories[0].child_categories.len(), 1);
    }
}
