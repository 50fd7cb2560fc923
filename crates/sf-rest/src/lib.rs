//! # forcelink-rest
//!
//! Salesforce REST API client.
//!
//! ## Features
//!
//! - **Discovery** - API versions, REST resources, limits
//! - **Describe** - Global and per-sObject metadata
//! - **SObject CRUD** - Create, read, update and delete single records
//! - **SOQL Query** - First-page queries, with optional quote replacement
//! - **SOSL Search** - Raw SOSL and escaped full-text search
//! - **Knowledge** - Article lookup, drafts, publishing, archiving, data categories
//! - **Images** - Authenticated download of rich-text images
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_rest::{ArticleListOptions, SalesforceRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcelink_rest::Error> {
//!     let client = SalesforceRestClient::new(
//!         "https://myorg.my.salesforce.com",
//!         "access_token_here",
//!     )?;
//!
//!     let articles = client
//!         .articles_list(&ArticleListOptions::new().with_sort("Title"))
//!         .await?;
//!
//!     if let Some(existing) = client.check_for_existing_article("Reset your password", None).await? {
//!         println!("already published as {}", existing.article_number);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod describe;
mod error;
pub mod knowledge;
mod sobject;

pub use client::{ApiVersion, RestResources, SalesforceRestClient, SearchResult};

pub use describe::{
    ChildRelationship, DescribeGlobalResult, DescribeSObjectResult, FieldDescribe,
    PicklistValue, RecordTypeInfo, SObjectBasicInfo,
};

pub use error::{Error, ErrorKind, Result};

pub use knowledge::{
    ArticleListOptions, ArticleVersion, DataCategoriesResponse, DataCategory, DataCategoryGroup,
    DataCategoryGroupsResponse, ExistingArticle, KnowledgeArticle, KnowledgeArticlesResponse,
    KnowledgeSettings, PublishOutcome,
};

pub use sobject::{CreateResult, SalesforceError};

pub use forcelink_client::QueryResult;
