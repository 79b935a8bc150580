use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub fn build_provider_client() -> Client {
    build_provider_client_with_timeout(DEFAULT_TIMEOUT_SECS)
}

pub fn build_provider_client_with_timeout(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!("falling back to default HTTP client: {err}");
            Client::new()
        })
}
