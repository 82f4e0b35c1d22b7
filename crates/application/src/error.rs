//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Caller input is missing or unusable
    #[error("{0}")]
    InvalidInput(String),

    /// The planner has no itinerary between the two points
    #[error("No route found between these locations")]
    RouteNotFound,

    /// The planner is not reachable (connection refused)
    #[error("Upstream planner unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The planner answered HTTP 404
    #[error("Upstream planner returned 404 Not Found")]
    UpstreamNotFound,

    /// Any other upstream failure
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Log category tag for this error
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Domain(_) | Self::InvalidInput(_) => "invalid_input",
            Self::RouteNotFound | Self::UpstreamNotFound => "route_not_found",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::ExternalService(_) | Self::Configuration(_) => "upstream_failure",
        }
    }

    /// Message suitable for a `details` field
    ///
    /// Strips the variant prefix so callers see the upstream message as-is.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::UpstreamUnavailable(msg)
            | Self::ExternalService(msg)
            | Self::Configuration(msg)
            | Self::InvalidInput(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
