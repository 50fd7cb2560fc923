//! Password-grant login and org discovery.
//!
//! Reads the connection from `SF_*` environment variables, or from a helper
//! file when a path is given:
//!
//!   cargo run --example password_login
//!   cargo run --example password_login -- helper.yml

use anyhow::Context;
use forcelink::{ConnectionInfo, Salesforce};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let sf = match std::env::args().nth(1) {
        Some(path) => Salesforce::from_helper_file(&path)
            .await
            .with_context(|| format!("connecting with helper file {path}"))?,
        None => {
            let info = ConnectionInfo::from_env().context("reading SF_* variables")?;
            Salesforce::connect(info).await.context("connecting")?
        }
    };

    println!("forcelink {}", forcelink::version::full_version());
    println!("Connected to {} (API v{})", sf.instance_url(), sf.api_version());

    let rest = sf.rest();
    let versions = rest.versions().await?;
    if let Some(latest) = versions.last() {
        println!("Latest API version: {} ({})", latest.version, latest.label);
    }

    let limits = rest.limits().await?;
    println!(
        "Daily API requests remaining: {}",
        limits["DailyApiRequests"]["Remaining"]
    );

    let short_id = "001D000000IqhSL";
    println!(
        "{} normalizes to {}",
        short_id,
        forcelink::client::id::normalize(short_id)?
    );

    Ok(())
}
