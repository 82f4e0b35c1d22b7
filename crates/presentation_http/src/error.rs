//! API error handling
//!
//! Every failure becomes a JSON body `{error, code, details?}` with a
//! status reflecting its category. The mapping from application errors
//! differs per operation, so handlers pick the matching constructor.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reported when the planner refuses connections
pub const PLANNER_NOT_RUNNING: &str = "OpenTripPlanner is not running";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required input missing or out of range
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Body is not JSON of the expected shape
    #[error("Invalid body: {0}")]
    InvalidBody(String),

    /// Body exceeds the configured limit
    #[error("Payload too large")]
    PayloadTooLarge,

    /// No itinerary between the requested points
    #[error("Not found: {0}")]
    NotFound(String),

    /// The planner cannot be reached
    #[error("Service unavailable: {error}")]
    ServiceUnavailable {
        /// Summary
        error: String,
        /// What is unavailable
        details: String,
    },

    /// Any other failure
    #[error("Internal error: {error}")]
    Internal {
        /// Summary
        error: String,
        /// Underlying message, if any
        details: Option<String>,
    },
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Map a `/plan` failure
    ///
    /// An upstream 404 reads the same as an empty plan, and a refused
    /// connection gets its own 503.
    #[must_use]
    pub fn from_plan_error(err: ApplicationError) -> Self {
        match err {
            ApplicationError::UpstreamUnavailable(_) => Self::ServiceUnavailable {
                error: "Route planning service unavailable".to_string(),
                details: PLANNER_NOT_RUNNING.to_string(),
            },
            ApplicationError::RouteNotFound | ApplicationError::UpstreamNotFound => {
                Self::NotFound(ApplicationError::RouteNotFound.to_string())
            },
            other => Self::from_input_error(other).unwrap_or_else(|other| Self::Internal {
                error: "Failed to plan route".to_string(),
                details: Some(other.detail()),
            }),
        }
    }

    /// Map a `/time` failure
    ///
    /// Every upstream failure is a 500; only an empty plan is a 404.
    #[must_use]
    pub fn from_estimate_error(err: ApplicationError) -> Self {
        match err {
            ApplicationError::RouteNotFound => {
                Self::NotFound(ApplicationError::RouteNotFound.to_string())
            },
            other => Self::from_input_error(other).unwrap_or_else(|other| Self::Internal {
                error: "Failed to estimate time".to_string(),
                details: Some(other.detail()),
            }),
        }
    }

    /// Input errors map the same way for every operation
    fn from_input_error(err: ApplicationError) -> Result<Self, ApplicationError> {
        match err {
            ApplicationError::InvalidInput(msg) => Ok(Self::BadRequest(msg)),
            ApplicationError::Domain(e) => Ok(Self::BadRequest(e.to_string())),
            other => Err(other),
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "invalid_input",
            Self::InvalidBody(_) => "invalid_body",
            Self::PayloadTooLarge => "payload_too_large",
            Self::NotFound(_) => "route_not_found",
            Self::ServiceUnavailable { .. } => "upstream_unavailable",
            Self::Internal { .. } => "upstream_failure",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();

        let body = match self {
            Self::BadRequest(error) | Self::NotFound(error) => ErrorResponse {
                error,
                code,
                details: None,
            },
            Self::InvalidBody(details) => ErrorResponse {
                error: "Request body must be JSON with {lat, lon} coordinates".to_string(),
                code,
                details: Some(details),
            },
            Self::PayloadTooLarge => ErrorResponse {
                error: "Request body too large".to_string(),
                code,
                details: None,
            },
            Self::ServiceUnavailable { error, details } => ErrorResponse {
                error,
                code,
                details: Some(details),
            },
            Self::Internal { error, details } => ErrorResponse {
                error,
                code,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
