//! Public configuration for the `HuggingFace` client.
//!
//! This module provides a stable public API for configuring the HF client.
//! The internal config is derived from this.

use std::time::Duration;

/// Default hub endpoint.
pub const DEFAULT_HUB_URL: &str = "https://huggingface.co";

/// Configuration for the `HuggingFace` client.
///
/// Tokens are not part of the configuration: every call takes the token to
/// use, since the UI may supply one per request.
///
/// # Example
///
/// ```
/// use workbench_hf::HfClientConfig;
/// use std::time::Duration;
///
/// let config = HfClientConfig::new()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct HfClientConfig {
    /// Hub root URL; API and download paths are appended to it
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Timeout for metadata requests and for connecting
    pub(crate) timeout: Duration,
}

impl Default for HfClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HUB_URL.to_string(),
            user_agent: concat!("workbench-hf/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HfClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hub root URL.
    ///
    /// Defaults to `https://huggingface.co`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the metadata request timeout.
    ///
    /// File transfers are only bounded by the connect timeout. Defaults to
    /// 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HfClientConfig::new();
        assert_eq!(config.base_url, "https://huggingface.co");
        assert!(config.user_agent.contains("workbench-hf"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_pattern() {
        let config = HfClientConfig::new()
            .with_base_url("http://localhost:9000")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
