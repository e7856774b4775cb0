//! # Pipeline Configuration Module
//!
//! Resilience policy of the batch orchestrator: how often a fetch is
//! attempted, how long to wait between attempts and between pages, when to
//! checkpoint, and when to give up on a broken source.
//!
//! ## Key Components
//!
//! - `PipelineConfig`: complete policy for one batch run
//! - `PipelineConfigBuilder`: builder pattern implementation for easier configuration

use std::time::Duration;

/// Configuration for a batch run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fetch attempts per page, including the first
    pub retry_budget: u32,

    /// Extra wait between two failed attempts of the same page
    pub retry_delay: Duration,

    /// Pause after every attempt, successful or not
    pub politeness_delay: Duration,

    /// Successful recordings between two checkpoints
    pub checkpoint_interval: usize,

    /// Consecutive failed pages that stop the batch
    pub circuit_breaker_threshold: u32,

    /// Per-request network timeout
    pub request_timeout: Duration,

    /// Whether AI insights are requested
    pub insight_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retry_budget: 3,
            retry_delay: Duration::from_secs(2),
            politeness_delay: Duration::from_secs(2),
            checkpoint_interval: 10,
            circuit_breaker_threshold: 5,
            request_timeout: Duration::from_secs(10),
            insight_enabled: true,
        }
    }
}

impl PipelineConfig {
    /// Create a new builder
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }

    /// Policy with every delay removed
    pub fn without_delays(mut self) -> Self {
        self.retry_delay = Duration::ZERO;
        self.politeness_delay = Duration::ZERO;
        self
    }
}

/// Builder for PipelineConfig
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Set the number of fetch attempts per page; at least one is always made
    pub fn retry_budget(mut self, retry_budget: u32) -> Self {
        self.config.retry_budget = retry_budget.max(1);
        self
    }

    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.config.retry_delay = retry_delay;
        self
    }

    pub fn politeness_delay(mut self, politeness_delay: Duration) -> Self {
        self.config.politeness_delay = politeness_delay;
        self
    }

    /// Set the checkpoint interval; zero disables intermediate checkpoints
    pub fn checkpoint_interval(mut self, checkpoint_interval: usize) -> Self {
        self.config.checkpoint_interval = checkpoint_interval;
        self
    }

    /// Set the circuit breaker threshold; zero disables the breaker
    pub fn circuit_breaker_threshold(mut self, threshold: u32) -> Self {
        self.config.circuit_breaker_threshold = threshold;
        self
    }

    pub fn request_timeout(mut self, request_timeout: Duration) -> Self {
        self.config.request_timeout = request_timeout;
        self
    }

    pub fn insight_enabled(mut self, insight_enabled: bool) -> Self {
        self.config.insight_enabled = insight_enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let config = PipelineConfig::default();
        assert_eq!(config.retry_budget, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
        assert_eq!(config.politeness_delay, Duration::from_secs(2));
        assert_eq!(config.checkpoint_interval, 10);
        assert_eq!(config.circuit_breaker_threshold, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.insight_enabled);
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::builder()
            .retry_budget(0)
            .checkpoint_interval(25)
            .circuit_breaker_threshold(2)
            .insight_enabled(false)
            .build()
            .without_delays();

        assert_eq!(config.retry_budget, 1);
        assert_eq!(config.checkpoint_interval, 25);
        assert_eq!(config.circuit_breaker_threshold, 2);
        assert!(!config.insight_enabled);
        assert_eq!(config.retry_delay, Duration::ZERO);
        assert_eq!(config.politeness_delay, Duration::ZERO);
    }
}
