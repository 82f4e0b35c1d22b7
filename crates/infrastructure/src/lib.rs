//! Infrastructure layer - Adapters for external systems
//!
//! Implements the planner port over OpenTripPlanner and provides the
//! ambient pieces the binaries share: configuration loading, tracing
//! setup and retry with backoff.

pub mod adapters;
pub mod config;
pub mod retry;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, LogFormat, OTP_URL_ENV, RetryAppConfig, RoutingAppConfig, ServerConfig,
};
pub use retry::{RetryConfig, RetryResult, Retryable, retry, with_retry};
pub use telemetry::{DEFAULT_LOG_FILTER, TelemetryError, init_tracing};
