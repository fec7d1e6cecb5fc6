//! Configuration for the dashboard

use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default analytics backend URL
const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Configuration for the dashboard core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashConfig {
    /// Base URL of the analytics backend
    pub api_base: String,

    /// History window requested for the primary OHLCV fetch
    pub period: String,

    /// Bar interval requested for the primary OHLCV fetch
    pub interval: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Delay between simulated keystrokes in the automation sequence
    pub type_delay: Duration,

    /// Pause between automation phases (clear, highlight, dispatch)
    pub pause_delay: Duration,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            period: "6mo".to_string(),
            interval: "1d".to_string(),
            request_timeout: Duration::from_secs(30),
            type_delay: Duration::from_millis(120),
            pause_delay: Duration::from_millis(400),
        }
    }
}

impl DashConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashConfigBuilder {
        DashConfigBuilder::default()
    }

    /// Override the API base from the STOCKLENS_API_BASE environment variable
    pub fn with_env_api_base(mut self) -> Self {
        if let Ok(base) = std::env::var("STOCKLENS_API_BASE") {
            self.api_base = base;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(DashError::Config("api_base must not be empty".to_string()));
        }

        if self.period.trim().is_empty() || self.interval.trim().is_empty() {
            return Err(DashError::Config(
                "period and interval must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for DashConfig
#[derive(Debug, Default)]
pub struct DashConfigBuilder {
    api_base: Option<String>,
    period: Option<String>,
    interval: Option<String>,
    request_timeout: Option<Duration>,
    type_delay: Option<Duration>,
    pause_delay: Option<Duration>,
}

impl DashConfigBuilder {
    /// Set the analytics backend base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set the OHLCV history window
    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    /// Set the OHLCV bar interval
    pub fn interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the simulated keystroke delay
    pub fn type_delay(mut self, duration: Duration) -> Self {
        self.type_delay = Some(duration);
        self
    }

    /// Set the pause between automation phases
    pub fn pause_delay(mut self, duration: Duration) -> Self {
        self.pause_delay = Some(duration);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashConfig> {
        let defaults = DashConfig::default();

        let config = DashConfig {
            api_base: self.api_base.unwrap_or(defaults.api_base),
            period: self.period.unwrap_or(defaults.period),
            interval: self.interval.unwrap_or(defaults.interval),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            type_delay: self.type_delay.unwrap_or(defaults.type_delay),
            pause_delay: self.pause_delay.unwrap_or(defaults.pause_delay),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashConfig::default();
        assert_eq!(config.period, "6mo");
        assert_eq!(config.interval, "1d");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = DashConfig::builder()
            .api_base("http://api.example.test")
            .period("1y")
            .type_delay(Duration::from_millis(10))
            .build()
            .unwrap();

        assert_eq!(config.api_base, "http://api.example.test");
        assert_eq!(config.period, "1y");
        assert_eq!(config.type_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_validation_empty_api_base() {
        let config = DashConfig {
            api_base: "  ".to_string(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }
}
