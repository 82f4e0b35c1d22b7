//! Routing behaviour and retry configuration.

use chrono::NaiveTime;
use domain::Timezone;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Routing behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingAppConfig {
    /// IANA zone for the default trip date and display timestamps
    #[serde(default)]
    pub timezone: Timezone,

    /// Trip time used when a request has none, `HH:MM:SS`
    #[serde(default = "default_time")]
    pub default_time: String,

    /// Reject out-of-range coordinates with a 400
    #[serde(default)]
    pub strict_coordinates: bool,
}

fn default_time() -> String {
    "08:00:00".to_string()
}

impl Default for RoutingAppConfig {
    fn default() -> Self {
        Self {
            timezone: Timezone::default(),
            default_time: default_time(),
            strict_coordinates: false,
        }
    }
}

impl RoutingAppConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if `default_time` is not `HH:MM:SS`.
    pub fn validate(&self) -> Result<(), String> {
        NaiveTime::parse_from_str(&self.default_time, "%H:%M:%S")
            .map(|_| ())
            .map_err(|e| format!("default_time must be HH:MM:SS: {e}"))
    }
}

/// Retry configuration for upstream calls
///
/// `max_retries` defaults to 0 so each request reaches the planner at
/// most once unless retries are configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryAppConfig {
    /// Initial delay before first retry in milliseconds (default: 100ms)
    #[serde(default = "default_retry_initial_delay")]
    pub initial_delay_ms: u64,

    /// Maximum delay between retries in milliseconds (default: 2000ms)
    #[serde(default = "default_retry_max_delay")]
    pub max_delay_ms: u64,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_retry_multiplier")]
    pub multiplier: f64,

    /// Maximum number of retry attempts (default: 0)
    #[serde(default)]
    pub max_retries: u32,

    /// Add jitter to each delay
    #[serde(default = "default_true")]
    pub jitter_enabled: bool,

    /// Maximum jitter factor (0.0 to 1.0)
    #[serde(default = "default_retry_jitter_factor")]
    pub jitter_factor: f64,
}

const fn default_retry_initial_delay() -> u64 {
    100
}

const fn default_retry_max_delay() -> u64 {
    2_000
}

const fn default_retry_multiplier() -> f64 {
    2.0
}

const fn default_retry_jitter_factor() -> f64 {
    0.1
}

impl Default for RetryAppConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_retry_initial_delay(),
            max_delay_ms: default_retry_max_delay(),
            multiplier: default_retry_multiplier(),
            max_retries: 0,
            jitter_enabled: true,
            jitter_factor: default_retry_jitter_factor(),
        }
    }
}

impl RetryAppConfig {
    /// Convert to `retry::RetryConfig` for use with retry operations
    #[must_use]
    pub const fn to_retry_config(&self) -> crate::retry::RetryConfig {
        crate::retry::RetryConfig {
            initial_delay_ms: self.initial_delay_ms,
            max_delay_ms: self.max_delay_ms,
            multiplier: self.multiplier,
            max_retries: self.max_retries,
            jitter_enabled: self.jitter_enabled,
            jitter_factor: self.jitter_factor,
        }
    }
}
