use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};

/// Builds the HTTP client used for every backend call.
///
/// One client is built per process and shared by clones of the API client,
/// so connections and DNS lookups are pooled.
///
/// # Features
/// - **Timeouts**: whole-request and connect timeouts from `[api]`
/// - **Compression**: gzip, deflate, brotli and zstd responses
/// - **HTTP/2**: adaptive window sizing and keep-alive
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
pub fn build_http_client(config: &ApiConfig) -> AppResult<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(config.timeout))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        // Enable compression (gzip, deflate, brotli, zstd)
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .default_headers(headers)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| AppError::Configuration {
            key: "api".to_string(),
            source: e.into(),
        })
}
