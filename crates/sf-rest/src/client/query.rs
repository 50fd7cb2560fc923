use forcelink_client::QueryResult;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::Result;

impl super::SalesforceRestClient {
    /// Execute a SOQL query. Only the first page is returned; follow
    /// `next_records_url` yourself if `done` is false.
    ///
    /// # Security
    ///
    /// **IMPORTANT**: If you are including user-provided values in the WHERE clause,
    /// you MUST escape them to prevent SOQL injection attacks:
    ///
    /// ```rust,ignore
    /// use forcelink_client::security::soql;
    ///
    /// let safe_value = soql::escape_string(user_input);
    /// let query = format!("SELECT Id FROM Account WHERE Name = '{}'", safe_value);
    /// ```
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        self.client.query(soql).await.map_err(Into::into)
    }

    /// Execute a SOQL query, first turning double quotes into single quotes
    /// when `replace_quotes` is set.
    ///
    /// The same escaping rules as [`query`](Self::query) apply.
    #[instrument(skip(self))]
    pub async fn soql_query<T: DeserializeOwned>(
        &self,
        soql: &str,
        replace_quotes: bool,
    ) -> Result<QueryResult<T>> {
        if replace_quotes {
            self.query(&soql.replace('"', "'")).await
        } else {
            self.query(soql).await
        }
    }
}
