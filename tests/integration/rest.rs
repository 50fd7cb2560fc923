//! REST API integration tests.

use super::common::{connect, unique_suffix};
use forcelink::client::id;
use serde_json::json;

#[tokio::test]
#[ignore]
async fn test_rest_org_discovery() {
    let sf = connect().await;
    let rest = sf.rest();

    let versions = rest.versions().await.expect("versions should succeed");
    assert!(versions.iter().any(|v| v.version == "55.0"));

    let resources = rest.rest_resources().await.expect("resources should succeed");
    assert!(resources.contains_key("sobjects"));

    let limits = rest.limits().await.expect("limits should succeed");
    assert!(limits.get("DailyApiRequests").is_some());
}

#[tokio::test]
#[ignore]
async fn test_rest_describe() {
    let sf = connect().await;
    let rest = sf.rest();

    let global = rest.describe_global().await.expect("describe global");
    assert!(global.find("account").is_some());

    let account = rest.describe_sobject("Account").await.expect("describe Account");
    assert!(account.field("Name").is_some());
}

#[tokio::test]
#[ignore]
async fn test_rest_crud_round_trip() {
    let sf = connect().await;
    let rest = sf.rest();
    let name = format!("forcelink {}", unique_suffix());

    let account_id = rest
        .create_record("Account", &json!({"Name": name}))
        .await
        .expect("create Account");
    assert_eq!(account_id.len(), 18);

    let short_id: String = account_id.chars().take(15).collect();
    assert_eq!(id::normalize(&short_id).unwrap(), account_id);

    let record: serde_json::Value = rest
        .get("Account", &account_id, Some(&["Id", "Name"][..]))
        .await
        .expect("get Account");
    assert_eq!(record["Name"], name.as_str());

    rest.update("Account", &account_id, &json!({"Description": "updated"}))
        .await
        .expect("update Account");

    let found: forcelink::rest::QueryResult<serde_json::Value> = rest
        .query(&format!(
            "SELECT Id, Description FROM Account WHERE Id = '{}'",
            account_id
        ))
        .await
        .expect("query Account");
    assert_eq!(found.records[0]["Description"], "updated");

    rest.delete("Account", &account_id)
        .await
        .expect("delete Account");
}

#[tokio::test]
#[ignore]
async fn test_rest_search() {
    let sf = connect().await;
    let result: forcelink::rest::SearchResult<serde_json::Value> = sf
        .rest()
        .search_string("forcelink")
        .await
        .expect("search should succeed");
    let _ = result.search_records.len();
}
