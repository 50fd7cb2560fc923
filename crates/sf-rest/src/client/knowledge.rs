use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use forcelink_client::security::soql;
use forcelink_client::QueryResult;

use super::{check_field, check_id, check_sobject};
use crate::error::{Error, ErrorKind, Result};
use crate::knowledge::{
    ArticleListOptions, ArticleVersion, DataCategoriesResponse, DataCategoryGroupsResponse,
    ExistingArticle, KnowledgeArticlesResponse, KnowledgeSettings, PublishOutcome,
    DEFAULT_ARTICLE_SOBJECT,
};

const ARTICLE_LANGUAGE: &str = "en-US";
const MASTER_VERSIONS: &str = "knowledgeManagement/articleVersions/masterVersions";
const DATA_CATEGORY_SELECTION: &str = "Knowledge__DataCategorySelection";

/// Article numbers are zero-padded to this width.
const ARTICLE_NUMBER_WIDTH: usize = 9;

#[derive(Deserialize)]
struct IdOnly {
    #[serde(rename = "Id")]
    id: String,
    #[serde(default)]
    attributes: Option<RecordAttributes>,
}

#[derive(Deserialize)]
struct RecordAttributes {
    url: Option<String>,
}

#[derive(Deserialize)]
struct MasterVersion {
    id: String,
}

#[derive(Serialize)]
struct PublishRequest<'a> {
    #[serde(rename = "publishStatus")]
    publish_status: &'a str,
    #[serde(rename = "versionNumber", skip_serializing_if = "Option::is_none")]
    version_number: Option<u32>,
}

fn article_sobject(sobject: Option<&str>) -> Result<&str> {
    let sobject = sobject.unwrap_or(DEFAULT_ARTICLE_SOBJECT);
    check_sobject(sobject)?;
    Ok(sobject)
}

/// The WHERE clause matching an article number as typed by a user.
///
/// Short numbers match the zero-padded stored value by suffix.
fn article_number_filter(number: &str) -> Result<String> {
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(Error::invalid(
            "INVALID_ARTICLE_NUMBER",
            "Article numbers must be alphanumeric",
        ));
    }
    if number.len() < ARTICLE_NUMBER_WIDTH {
        Ok(format!("ArticleNumber LIKE '%0{}'", number))
    } else {
        Ok(format!("ArticleNumber = '{}'", number))
    }
}

impl super::SalesforceRestClient {
    /// Get knowledge management settings.
    #[instrument(skip(self))]
    pub async fn knowledge_settings(&self) -> Result<KnowledgeSettings> {
        self.client
            .rest_get("knowledgeManagement/settings")
            .await
            .map_err(Into::into)
    }

    /// List published knowledge articles.
    ///
    /// See [`ArticleListOptions`] for how out-of-range options are corrected.
    #[instrument(skip(self))]
    pub async fn articles_list(
        &self,
        options: &ArticleListOptions,
    ) -> Result<KnowledgeArticlesResponse> {
        let url = self.client.rest_url("support/knowledgeArticles");
        let request = self
            .client
            .get(&url)
            .accept_language(ARTICLE_LANGUAGE)
            .query_pairs(options.to_params());
        let response = self.client.execute(request).await?;
        response.json().await.map_err(Into::into)
    }

    /// Get data category groups, optionally filtered by SObject type.
    #[instrument(skip(self))]
    pub async fn data_category_groups(
        &self,
        sobject: Option<&str>,
    ) -> Result<DataCategoryGroupsResponse> {
        let path = "support/dataCategoryGroups";
        match sobject {
            Some(s) => {
                check_sobject(s)?;
                self.client
                    .rest_get_with_query(path, &[("sObjectType", s)])
                    .await
                    .map_err(Into::into)
            }
            None => self.client.rest_get(path).await.map_err(Into::into),
        }
    }

    /// Get data categories within a group, optionally filtered by SObject type.
    #[instrument(skip(self))]
    pub async fn data_categories(
        &self,
        group: &str,
        sobject: Option<&str>,
    ) -> Result<DataCategoriesResponse> {
        if !soql::is_safe_field_name(group) {
            return Err(Error::invalid(
                "INVALID_GROUP",
                "Invalid data category group name",
            ));
        }
        let path = format!("support/dataCategoryGroups/{}/dataCategories", group);
        match sobject {
            Some(s) => {
                check_sobject(s)?;
                self.client
                    .rest_get_with_query(&path, &[("sObjectType", s)])
                    .await
                    .map_err(Into::into)
            }
            None => self.client.rest_get(&path).await.map_err(Into::into),
        }
    }

    /// The full article version record (`Knowledge__kav` unless `sobject` is given).
    #[instrument(skip(self))]
    pub async fn article_details(&self, article_id: &str, sobject: Option<&str>) -> Result<Value> {
        let sobject = article_sobject(sobject)?;
        self.get(sobject, article_id, None).await
    }

    /// The article as served by the Knowledge support endpoint.
    #[instrument(skip(self))]
    pub async fn support_article_details(&self, article_id: &str) -> Result<Value> {
        check_id(article_id)?;
        let url = self
            .client
            .rest_url(&format!("support/knowledgeArticles/{}", article_id));
        let request = self.client.get(&url).accept_language(ARTICLE_LANGUAGE);
        let response = self.client.execute(request).await?;
        response.json().await.map_err(Into::into)
    }

    /// Look for an article with exactly this title.
    #[instrument(skip(self))]
    pub async fn check_for_existing_article(
        &self,
        title: &str,
        sobject: Option<&str>,
    ) -> Result<Option<ExistingArticle>> {
        let sobject = article_sobject(sobject)?;
        let query = format!(
            "SELECT Id,ArticleNumber FROM {} WHERE Title = '{}'",
            sobject,
            soql::escape_string(title)
        );
        let result: QueryResult<ExistingArticle> = self.soql_query(&query, false).await?;
        Ok(result.records.into_iter().next())
    }

    /// The article version ID for an article number.
    ///
    /// Numbers shorter than nine characters are matched against the
    /// zero-padded stored form, so `1234` finds `000001234`.
    #[instrument(skip(self))]
    pub async fn article_id_from_number(
        &self,
        article_number: &str,
        sobject: Option<&str>,
    ) -> Result<Option<String>> {
        Ok(self
            .article_by_number(article_number, sobject)
            .await?
            .map(|record| record.id))
    }

    /// The record URI (`attributes.url`) for an article number.
    #[instrument(skip(self))]
    pub async fn article_uri_from_number(
        &self,
        article_number: &str,
        sobject: Option<&str>,
    ) -> Result<Option<String>> {
        Ok(self
            .article_by_number(article_number, sobject)
            .await?
            .and_then(|record| record.attributes)
            .and_then(|attributes| attributes.url))
    }

    async fn article_by_number(
        &self,
        article_number: &str,
        sobject: Option<&str>,
    ) -> Result<Option<IdOnly>> {
        let sobject = article_sobject(sobject)?;
        let query = format!(
            "SELECT Id FROM {} WHERE {}",
            sobject,
            article_number_filter(article_number)?
        );
        let result: QueryResult<IdOnly> = self.query(&query).await?;
        let record = result.records.into_iter().next();
        if record.is_none() {
            info!(article_number, "no article found for article number");
        }
        Ok(record)
    }

    /// The `ValidationStatus` of an article version.
    #[instrument(skip(self))]
    pub async fn article_validation_status(
        &self,
        article_id: &str,
        sobject: Option<&str>,
    ) -> Result<String> {
        self.article_field(article_id, sobject, "ValidationStatus")
            .await
    }

    /// The `UrlName` of an article version.
    #[instrument(skip(self))]
    pub async fn article_url(&self, article_id: &str, sobject: Option<&str>) -> Result<String> {
        self.article_field(article_id, sobject, "UrlName").await
    }

    async fn article_field(
        &self,
        article_id: &str,
        sobject: Option<&str>,
        field: &str,
    ) -> Result<String> {
        let sobject = article_sobject(sobject)?;
        check_field(field)?;
        let record: Value = self.get(sobject, article_id, Some(&[field])).await?;
        record
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::new(ErrorKind::MissingRequiredData(format!(
                    "{} has no {} value",
                    article_id, field
                )))
            })
    }

    /// Publication status and version number of an article version.
    #[instrument(skip(self))]
    pub async fn article_version(&self, article_id: &str) -> Result<Option<ArticleVersion>> {
        check_id(article_id)?;
        let query = format!(
            "SELECT Id,PublishStatus,VersionNumber,KnowledgeArticleId FROM {} WHERE Id = '{}'",
            DEFAULT_ARTICLE_SOBJECT, article_id
        );
        let result: QueryResult<ArticleVersion> = self.query(&query).await?;
        Ok(result.records.into_iter().next())
    }

    /// Create a draft article and return its version ID.
    #[instrument(skip(self, fields))]
    pub async fn create_article<T: Serialize>(
        &self,
        sobject: Option<&str>,
        fields: &T,
    ) -> Result<String> {
        let sobject = article_sobject(sobject)?;
        self.create_record(sobject, fields).await
    }

    /// Update fields on a draft article version.
    #[instrument(skip(self, fields))]
    pub async fn update_article<T: Serialize>(
        &self,
        article_id: &str,
        sobject: Option<&str>,
        fields: &T,
    ) -> Result<()> {
        let sobject = article_sobject(sobject)?;
        self.update(sobject, article_id, fields).await
    }

    /// Create a draft from the published version of a knowledge article
    /// (a `kA` ID) and return the draft's version ID.
    #[instrument(skip(self))]
    pub async fn checkout_article(&self, knowledge_article_id: &str) -> Result<String> {
        check_id(knowledge_article_id)?;
        let version: MasterVersion = self
            .client
            .rest_post(MASTER_VERSIONS, &json!({ "articleId": knowledge_article_id }))
            .await?;
        Ok(version.id)
    }

    /// Publish a draft article version.
    ///
    /// `version_number` sets the version the draft is published as; leave it
    /// unset to let Salesforce pick the next one.
    #[instrument(skip(self))]
    pub async fn publish_article(&self, version_id: &str, version_number: Option<u32>) -> Result<()> {
        self.set_publish_status(version_id, "Online", version_number)
            .await
    }

    /// Publish several drafts, one request each. A failure does not stop
    /// the remaining publishes.
    #[instrument(skip(self, version_ids))]
    pub async fn publish_multiple_articles<S: AsRef<str>>(
        &self,
        version_ids: &[S],
    ) -> Vec<PublishOutcome> {
        let mut outcomes = Vec::with_capacity(version_ids.len());
        for version_id in version_ids {
            let version_id = version_id.as_ref();
            let error = match self.publish_article(version_id, None).await {
                Ok(()) => None,
                Err(err) => {
                    warn!(version_id, error = %err, "failed to publish article");
                    Some(err.to_string())
                }
            };
            outcomes.push(PublishOutcome {
                version_id: version_id.to_string(),
                error,
            });
        }
        outcomes
    }

    /// Archive a published article version.
    #[instrument(skip(self))]
    pub async fn archive_article(&self, version_id: &str) -> Result<()> {
        self.set_publish_status(version_id, "Archived", None).await
    }

    async fn set_publish_status(
        &self,
        version_id: &str,
        status: &str,
        version_number: Option<u32>,
    ) -> Result<()> {
        check_id(version_id)?;
        let path = format!("{}/{}", MASTER_VERSIONS, version_id);
        let body = PublishRequest {
            publish_status: status,
            version_number,
        };
        self.client.rest_patch(&path, &body).await.map_err(Into::into)
    }

    /// Attach an article version to a data category and return the
    /// selection record ID.
    #[instrument(skip(self))]
    pub async fn assign_data_category(
        &self,
        article_id: &str,
        group: &str,
        category: &str,
    ) -> Result<String> {
        check_id(article_id)?;
        if !soql::is_safe_field_name(group) || !soql::is_safe_field_name(category) {
            return Err(Error::invalid(
                "INVALID_CATEGORY",
                "Invalid data category group or category name",
            ));
        }
        let selection = json!({
            "ParentId": article_id,
            "DataCategoryGroupName": group,
            "DataCategoryName": category,
        });
        self.create_record(DATA_CATEGORY_SELECTION, &selection).await
    }

    /// Select `fields` from article versions matching a SOQL `filter`.
    ///
    /// Unsafe field names are dropped. The filter is inserted verbatim, so
    /// escape any user input in it with `soql::escape_string`.
    #[instrument(skip(self))]
    pub async fn query_articles<T: DeserializeOwned>(
        &self,
        fields: &[&str],
        filter: &str,
        sobject: Option<&str>,
    ) -> Result<Vec<T>> {
        let sobject = article_sobject(sobject)?;
        let select = soql::build_safe_select(fields).ok_or_else(|| {
            Error::invalid("INVALID_FIELDS", "No valid field names provided")
        })?;
        let query = format!("SELECT {} FROM {} WHERE {}", select, sobject, filter);
        let result: QueryResult<T> = self.query(&query).await?;
        Ok(result.records)
    }
}
