//! Upstream planner configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the OpenTripPlanner connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpConfig {
    /// Base URL of the OTP server (without the `/otp` path)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Router identifier used in `/otp/routers/{router_id}`
    #[serde(default = "default_router_id")]
    pub router_id: String,

    /// Timeout for full route planning, in seconds
    #[serde(default = "default_plan_timeout_secs")]
    pub plan_timeout_secs: u64,

    /// Timeout for quick time estimates, in seconds
    #[serde(default = "default_estimate_timeout_secs")]
    pub estimate_timeout_secs: u64,

    /// Timeout for the liveness probe, in seconds
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,

    /// Number of itineraries requested per plan call
    #[serde(default = "default_num_itineraries")]
    pub num_itineraries: u8,

    /// Locale passed to the planner for step descriptions
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_base_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_router_id() -> String {
    "default".to_string()
}

const fn default_plan_timeout_secs() -> u64 {
    10
}

const fn default_estimate_timeout_secs() -> u64 {
    5
}

const fn default_health_timeout_secs() -> u64 {
    3
}

const fn default_num_itineraries() -> u8 {
    1
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            router_id: default_router_id(),
            plan_timeout_secs: default_plan_timeout_secs(),
            estimate_timeout_secs: default_estimate_timeout_secs(),
            health_timeout_secs: default_health_timeout_secs(),
            num_itineraries: default_num_itineraries(),
            locale: default_locale(),
        }
    }
}

impl OtpConfig {
    /// Create a configuration pointing at a mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            plan_timeout_secs: 2,
            estimate_timeout_secs: 1,
            health_timeout_secs: 1,
            ..Default::default()
        }
    }

    /// Full URL of the plan endpoint
    #[must_use]
    pub fn plan_url(&self) -> String {
        format!("{}/plan", self.router_url())
    }

    /// Full URL of the router-descriptor endpoint
    #[must_use]
    pub fn router_url(&self) -> String {
        format!(
            "{}/otp/routers/{}",
            self.base_url.trim_end_matches('/'),
            self.router_id
        )
    }

    /// Timeout for `/plan` calls
    #[must_use]
    pub const fn plan_timeout(&self) -> Duration {
        Duration::from_secs(self.plan_timeout_secs)
    }

    /// Timeout for `/time` calls
    #[must_use]
    pub const fn estimate_timeout(&self) -> Duration {
        Duration::from_secs(self.estimate_timeout_secs)
    }

    /// Timeout for the health probe
    #[must_use]
    pub const fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("base_url must start with http:// or https://".to_string());
        }

        if self.router_id.trim().is_empty() {
            return Err("router_id must not be empty".to_string());
        }

        if self.plan_timeout_secs == 0
            || self.estimate_timeout_secs == 0
            || self.health_timeout_secs == 0
        {
            return Err("timeouts must be greater than 0".to_string());
        }

        if self.num_itineraries == 0 {
            return Err("num_itineraries must be greater than 0".to_string());
        }

        Ok(())
    }
}
