//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `routing`: timezone, default trip time, coordinate strictness, retry
//!
//! The upstream planner section reuses [`OtpConfig`] from the integration
//! crate.

mod routing;
mod server;

use application::RoutingSettings;
use integration_otp::OtpConfig;
use serde::{Deserialize, Serialize};

pub use routing::{RetryAppConfig, RoutingAppConfig};
pub use server::{LogFormat, ServerConfig};

/// Legacy variable that overrides `otp.base_url`
pub const OTP_URL_ENV: &str = "OTP_URL";

/// Prefix of structured environment overrides
pub const ENV_PREFIX: &str = "TREKROUTE";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream planner configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Routing behaviour
    #[serde(default)]
    pub routing: RoutingAppConfig,

    /// Retry configuration for upstream calls (optional)
    #[serde(default)]
    pub retry: Option<RetryAppConfig>,
}

impl AppConfig {
    /// Load configuration from `config.toml` and the environment
    ///
    /// Precedence, lowest first: built-in defaults, `config.toml` in the
    /// working directory, `TREKROUTE_*` variables, then `OTP_URL`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(
            config::File::with_name("config").required(false),
            Self::environment(),
            std::env::var(OTP_URL_ENV).ok(),
        )
    }

    /// Environment source for `TREKROUTE_<SECTION>__<KEY>` variables
    ///
    /// Sections are separated by a double underscore so keys that contain
    /// one stay addressable, e.g. `TREKROUTE_ROUTING__STRICT_COORDINATES`.
    #[must_use]
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Load configuration from explicit file and environment sources
    pub fn load_from<S>(
        file: S,
        env: config::Environment,
        otp_url: Option<String>,
    ) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("otp.base_url", "http://localhost:8082")?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., TREKROUTE_SERVER__PORT)
            .add_source(env)
            .set_override_option("otp.base_url", otp_url.filter(|url| !url.is_empty()))?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first problem found, prefixed with its section name.
    pub fn validate(&self) -> Result<(), String> {
        self.otp.validate().map_err(|e| format!("otp: {e}"))?;
        self.routing.validate().map_err(|e| format!("routing: {e}"))?;
        Ok(())
    }

    /// Settings for the routing service
    #[must_use]
    pub fn routing_settings(&self) -> RoutingSettings {
        RoutingSettings {
            timezone: self.routing.timezone,
            default_time: self.routing.default_time.clone(),
            strict_coordinates: self.routing.strict_coordinates,
            plan_timeout: self.otp.plan_timeout(),
            estimate_timeout: self.otp.estimate_timeout(),
            health_timeout: self.otp.health_timeout(),
            router_id: self.otp.router_id.clone(),
        }
    }

    /// Retry policy for upstream calls
    #[must_use]
    pub fn retry_config(&self) -> crate::retry::RetryConfig {
        self.retry
            .as_ref()
            .map_or_else(crate::retry::RetryConfig::default, RetryAppConfig::to_retry_config)
    }
}
