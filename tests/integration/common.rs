use forcelink::{ConnectionInfo, Salesforce};

/// Connect to the org named by the `SF_*` environment variables.
///
/// Panics with setup instructions when the variables are missing; live
/// tests never skip silently.
pub async fn connect() -> Salesforce {
    let info = match ConnectionInfo::from_env() {
        Ok(info) => info,
        Err(e) => panic!(
            "\n\nIntegration tests need a real Salesforce org ({e}).\n\
             Export SF_USERNAME, SF_PASSWORD, SF_SECURITY_TOKEN, SF_CLIENT_KEY and\n\
             SF_CLIENT_SECRET (plus SF_BASE_URL for sandboxes or My Domain logins).\n\n"
        ),
    };

    Salesforce::connect(info)
        .await
        .unwrap_or_else(|e| panic!("Failed to connect to Salesforce: {e}"))
}

/// A unique suffix for records created by a test run.
pub fn unique_suffix() -> String {
    forcelink::client::utils::random_string(8, "it_")
}
