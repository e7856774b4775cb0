//! # Crawler Configuration Module
//!
//! Configuration for the page fetcher: the request timeout applied to every
//! attempt, redirect policy and the browser-like headers sent with each
//! request. Uses a builder pattern for flexible configuration.

use std::time::Duration;

/// Browser user agent sent by default
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Accept header sent by default
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

/// Configuration for the page fetcher
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Timeout in milliseconds for a single request attempt
    pub request_timeout_ms: u64,

    /// Maximum number of redirects to follow
    pub max_redirects: usize,

    /// User agent to use for requests
    pub user_agent: String,

    /// Accept header to use for requests
    pub accept: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10_000,
            max_redirects: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the timeout for a single request attempt
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the maximum number of redirects to follow
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.config.max_redirects = max_redirects;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the Accept header to use for requests
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.config.accept = accept.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }

    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CrawlerConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.max_redirects, 5);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_builder() {
        let config = CrawlerConfig::builder()
            .request_timeout(Duration::from_millis(250))
            .max_redirects(0)
            .user_agent("quizforge-test")
            .build();

        assert_eq!(config.request_timeout_ms, 250);
        assert_eq!(config.max_redirects, 0);
        assert_eq!(config.user_agent, "quizforge-test");
        assert_eq!(config.accept, DEFAULT_ACCEPT);
    }
}
