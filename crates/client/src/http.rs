//! HTTP Client Factory
//!
//! Provides the client configuration and a factory function for building
//! reqwest clients shared across all backend calls.

use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for the backend API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    /// Applied to connection establishment only. There is deliberately no
    /// whole-request timeout: a generation stream stays open for as long
    /// as the backend keeps producing chunks.
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("valid default base URL"),
            connect_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }
}

/// Build a `reqwest::Client` for the given configuration.
pub fn build_http_client(config: &ClientConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
        .build()
        .expect("failed to build reqwest client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        let _client = build_http_client(&config);
    }

    #[test]
    fn test_custom_base_url() {
        let config =
            ClientConfig::with_base_url(Url::parse("https://api.example.com").unwrap());
        assert_eq!(config.base_url.host_str(), Some("api.example.com"));
    }
}
