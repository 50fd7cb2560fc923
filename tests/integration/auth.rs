//! Password-grant authentication against a live org.

use super::common::connect;
use forcelink::{Credentials, SalesforceCredentials};

#[tokio::test]
#[ignore]
async fn test_auth_password_grant() {
    let sf = connect().await;

    assert!(sf.instance_url().starts_with("https://"));
    let token = sf.token().expect("connect should keep the token response");
    assert_eq!(token.token_type.as_deref(), Some("Bearer"));
    assert!(sf.signature().is_some(), "token response should be signed");

    let creds: SalesforceCredentials = token.to_credentials(sf.api_version());
    assert!(creds.is_valid());
}

#[tokio::test]
#[ignore]
async fn test_auth_bad_password_is_rejected() {
    let info = forcelink::ConnectionInfo::from_env()
        .expect("SF_* variables must be set")
        .with_password("definitely-not-the-password");

    let err = forcelink::Salesforce::connect(info)
        .await
        .expect_err("a wrong password must not authenticate");
    assert!(matches!(err, forcelink::Error::Auth(_)));
}
