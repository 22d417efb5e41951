use anyhow::Result;
use reqwest::Client;
use std::time::Duration;

/// Shared reqwest client with the configured request timeout.
pub fn build_client(timeout_secs: u64) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()?)
}
