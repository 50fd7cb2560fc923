use serde::de::DeserializeOwned;
use tracing::instrument;

use forcelink_client::security::sosl;

use crate::error::{Error, ErrorKind, Result};

impl super::SalesforceRestClient {
    /// Execute a SOSL search.
    ///
    /// # Security
    ///
    /// **IMPORTANT**: Escape user-provided search terms with
    /// `forcelink_client::security::sosl::escape_search_term()`, or use
    /// [`search_string`](Self::search_string) which does it for you.
    #[instrument(skip(self))]
    pub async fn search<T: DeserializeOwned>(&self, sosl: &str) -> Result<super::SearchResult<T>> {
        self.client
            .rest_get_with_query("search/", &[("q", sosl)])
            .await
            .map_err(Into::into)
    }

    /// Search every field of every searchable object for `term`.
    ///
    /// Runs `FIND {term} IN ALL FIELDS` with the SOSL reserved characters
    /// in `term` escaped. An empty term fails with `MissingRequiredData`.
    #[instrument(skip(self))]
    pub async fn search_string<T: DeserializeOwned>(
        &self,
        term: &str,
    ) -> Result<super::SearchResult<T>> {
        if term.trim().is_empty() {
            return Err(Error::new(ErrorKind::MissingRequiredData(
                "a search term is required".to_string(),
            )));
        }
        let query = format!("FIND {{{}}} IN ALL FIELDS", sosl::escape_search_term(term));
        self.search(&query).await
    }
}
