use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use forcelink_client::security::soql;

use super::{check_id, check_sobject};
use crate::error::{Error, Result};
use crate::sobject::CreateResult;

impl super::SalesforceRestClient {
    /// Create a new record.
    ///
    /// A create answered with `success: false` fails with `CREATE_FAILED`
    /// and the joined error messages.
    #[instrument(skip(self, record))]
    pub async fn create<T: Serialize>(&self, sobject: &str, record: &T) -> Result<CreateResult> {
        check_sobject(sobject)?;
        let path = format!("sobjects/{}", sobject);
        let result: CreateResult = self.client.rest_post(&path, record).await?;

        if result.success {
            Ok(result)
        } else {
            Err(Error::invalid("CREATE_FAILED", result.error_messages()))
        }
    }

    /// Create a new record and return only its ID.
    pub async fn create_record<T: Serialize>(&self, sobject: &str, record: &T) -> Result<String> {
        self.create(sobject, record).await.map(|result| result.id)
    }

    /// Get a record by ID.
    ///
    /// Optionally specify which fields to retrieve; unsafe field names are
    /// dropped and an empty remainder fails with `INVALID_FIELDS`.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        sobject: &str,
        id: &str,
        fields: Option<&[&str]>,
    ) -> Result<T> {
        check_sobject(sobject)?;
        check_id(id)?;
        let path = format!("sobjects/{}/{}", sobject, id);
        match fields {
            Some(fields) => {
                let safe_fields: Vec<&str> =
                    soql::filter_safe_fields(fields.iter().copied()).collect();
                if safe_fields.is_empty() {
                    return Err(Error::invalid(
                        "INVALID_FIELDS",
                        "No valid field names provided",
                    ));
                }
                let joined = safe_fields.join(",");
                self.client
                    .rest_get_with_query(&path, &[("fields", &joined)])
                    .await
                    .map_err(Into::into)
            }
            None => self.client.rest_get(&path).await.map_err(Into::into),
        }
    }

    /// Update a record.
    #[instrument(skip(self, record))]
    pub async fn update<T: Serialize>(&self, sobject: &str, id: &str, record: &T) -> Result<()> {
        check_sobject(sobject)?;
        check_id(id)?;
        let path = format!("sobjects/{}/{}", sobject, id);
        self.client.rest_patch(&path, record).await.map_err(Into::into)
    }

    /// Delete a record.
    #[instrument(skip(self))]
    pub async fn delete(&self, sobject: &str, id: &str) -> Result<()> {
        check_sobject(sobject)?;
        check_id(id)?;
        let path = format!("sobjects/{}/{}", sobject, id);
        self.client.rest_delete(&path).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::super::SalesforceRestClient;
    use crate::error::ErrorKind;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ARTICLE_ID: &str = "ka4PO0000002hbyYAA";

    #[tokio::test]
    async fn test_create_wiremock() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v55.0/sobjects/Account"))
            .and(body_json(serde_json::json!({"Name": "Acme"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "001xx000003DgAAAS",
                "success": true,
                "errors": []
            })))
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "test-token").unwrap();
        let id = client
            .create_record("Account", &serde_json::json!({"Name": "Acme"}))
            .await
            .expect("create should succeed");
        assert_eq!(id, "001xx000003DgAAAS");
    }

    #[tokio::test]
    async fn test_create_unsuccessful_result() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/data/v55.0/sobjects/Account"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "",
                "success": false,
                "errors": [{"statusCode": "REQUIRED_FIELD_MISSING", "message": "Name is required"}]
            })))
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "test-token").unwrap();
        let err = client
            .create("Account", &serde_json::json!({}))
            .await
            .unwrap_err();
        match err.kind {
            ErrorKind::Salesforce {
                error_code,
                message,
            } => {
                assert_eq!(error_code, "CREATE_FAILED");
                assert_eq!(message, "Name is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_with_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!(
                "/services/data/v55.0/sobjects/Knowledge__kav/{ARTICLE_ID}"
            )))
            .and(query_param("fields", "Title,UrlName"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Id": ARTICLE_ID,
                "Title": "Reset your password",
                "UrlName": "reset-password"
            })))
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "test-token").unwrap();
        let record: serde_json::Value = client
            .get(
                "Knowledge__kav",
                ARTICLE_ID,
                Some(&["Title", "UrlName", "Bad'; DROP"]),
            )
            .await
            .expect("get should succeed");
        assert_eq!(record["UrlName"], "reset-password");
    }

    #[tokio::test]
    async fn test_get_rejects_only_unsafe_fields() {
        let client = SalesforceRestClient::new("https://test.salesforce.com", "token").unwrap();
        let err = client
            .get::<serde_json::Value>("Account", "001xx000003DgAAAS", Some(&["Bad'; DROP"]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("INVALID_FIELDS"));
    }

    #[tokio::test]
    async fn test_update_and_delete_wiremock() {
        let mock_server = MockServer::start().await;
        let record_path = format!("/services/data/v55.0/sobjects/Knowledge__kav/{ARTICLE_ID}");

        Mock::given(method("PATCH"))
            .and(path(record_path.clone()))
            .and(body_json(serde_json::json!({"Title": "New title"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(record_path))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SalesforceRestClient::new(mock_server.uri(), "test-token").unwrap();
        client
            .update(
                "Knowledge__kav",
                ARTICLE_ID,
                &serde_json::json!({"Title": "New title"}),
            )
            .await
            .expect("update should succeed");
        client
            .delete("Knowledge__kav", ARTICLE_ID)
            .await
            .expect("delete should succeed");
    }

    #[tokio::test]
    async fn test_invalid_arguments_fail_before_request() {
        let client = SalesforceRestClient::new("https://test.salesforce.com", "token").unwrap();

        let err = client
            .update("Bad'; DROP--", ARTICLE_ID, &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("INVALID_SOBJECT"));

        let err = client.delete("Account", "../limits").await.unwrap_err();
        assert!(err.to_string().contains("INVALID_ID"));
    }
}
