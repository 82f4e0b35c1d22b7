//! OpenTripPlanner HTTP client
//!
//! Issues exactly one request per call with a caller-supplied timeout.
//! Retry policy, if any, belongs to the caller.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, TravelMode};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::OtpConfig;
use crate::error::OtpError;
use crate::models::PlanResponse;

/// Date/time constraints for a full plan request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Trip date, `YYYY-MM-DD`
    pub date: String,
    /// Trip time, `HH:MM:SS`
    pub time: String,
    /// Whether `time` is the arrival time rather than departure
    pub arrive_by: bool,
}

/// Parameters for a `/plan` call
#[derive(Debug, Clone, PartialEq)]
pub struct PlanParams {
    /// Origin
    pub from: Coordinate,
    /// Destination
    pub to: Coordinate,
    /// Travel mode
    pub mode: TravelMode,
    /// Date/time constraints; `None` lets the planner use its own defaults
    pub schedule: Option<Schedule>,
}

impl PlanParams {
    /// Full plan request with explicit date/time
    #[must_use]
    pub const fn full(
        from: Coordinate,
        to: Coordinate,
        mode: TravelMode,
        schedule: Schedule,
    ) -> Self {
        Self {
            from,
            to,
            mode,
            schedule: Some(schedule),
        }
    }

    /// Reduced request for quick estimates
    #[must_use]
    pub const fn estimate(from: Coordinate, to: Coordinate, mode: TravelMode) -> Self {
        Self {
            from,
            to,
            mode,
            schedule: None,
        }
    }

    /// Build the upstream query string pairs
    ///
    /// Full requests carry `date`, `time`, `arriveBy` and `locale`;
    /// estimates send only places, mode and the itinerary count.
    #[must_use]
    pub fn to_query(&self, config: &OtpConfig) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("fromPlace", self.from.to_place_param()),
            ("toPlace", self.to.to_place_param()),
            ("mode", self.mode.to_string()),
        ];

        if let Some(schedule) = &self.schedule {
            params.push(("date", schedule.date.clone()));
            params.push(("time", schedule.time.clone()));
            params.push(("arriveBy", schedule.arrive_by.to_string()));
            params.push(("numItineraries", config.num_itineraries.to_string()));
            params.push(("locale", config.locale.clone()));
        } else {
            params.push(("numItineraries", "1".to_string()));
        }

        params
    }
}

/// Trait for upstream planner clients
#[async_trait]
pub trait OtpClient: Send + Sync {
    /// Request itineraries between two points
    async fn plan(&self, params: &PlanParams, timeout: Duration) -> Result<PlanResponse, OtpError>;

    /// Fetch the router descriptor; succeeds on any 2xx response
    async fn router_info(&self, timeout: Duration) -> Result<(), OtpError>;
}

/// reqwest-based OpenTripPlanner client
#[derive(Debug, Clone)]
pub struct HttpOtpClient {
    client: Client,
    config: OtpConfig,
}

impl HttpOtpClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OtpConfig) -> Result<Self, OtpError> {
        config.validate().map_err(OtpError::ConfigurationError)?;

        let client = Client::builder()
            .user_agent(concat!("Trekroute/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OtpError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &OtpConfig {
        &self.config
    }

    /// Parse a `/plan` body
    fn parse_plan_response(body: &str) -> Result<PlanResponse, OtpError> {
        serde_json::from_str(body).map_err(|e| OtpError::ParseError(e.to_string()))
    }

    /// Pull a message out of an upstream error body, if it has one
    fn extract_error_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .pointer("/error/message")
            .or_else(|| value.pointer("/error/msg"))
            .or_else(|| value.get("message"))
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
    }
}

#[async_trait]
impl OtpClient for HttpOtpClient {
    #[instrument(skip(self, params), fields(from = %params.from.to_place_param(), to = %params.to.to_place_param(), mode = %params.mode))]
    async fn plan(&self, params: &PlanParams, timeout: Duration) -> Result<PlanResponse, OtpError> {
        let url = self.config.plan_url();
        let query = params.to_query(&self.config);

        debug!(?url, timeout_ms = duration_ms(timeout), "Requesting plan");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_send_error(&e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| map_body_error(&e, timeout))?;

        if status == StatusCode::NOT_FOUND {
            return Err(OtpError::NotFound);
        }

        if !status.is_success() {
            let message =
                Self::extract_error_message(&body).unwrap_or_else(|| format!("HTTP {status}"));
            warn!(status = status.as_u16(), %message, "Planner returned an error status");
            return Err(OtpError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let result = Self::parse_plan_response(&body)?;

        let count = result
            .plan
            .as_ref()
            .map_or(0, |plan| plan.itineraries.len());
        debug!(count, "Itineraries received");

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn router_info(&self, timeout: Duration) -> Result<(), OtpError> {
        let url = self.config.router_url();

        let response = self
            .client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_send_error(&e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OtpError::RequestFailed {
                status: status.as_u16(),
                message: format!("HTTP {status}"),
            });
        }

        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn duration_ms(timeout: Duration) -> u64 {
    timeout.as_millis() as u64
}

/// Classify a failure to obtain a response
fn map_send_error(err: &reqwest::Error, timeout: Duration) -> OtpError {
    if err.is_timeout() {
        OtpError::Timeout {
            timeout_ms: duration_ms(timeout),
        }
    } else if is_connection_refused(err) {
        OtpError::ConnectionRefused(err.to_string())
    } else {
        OtpError::ConnectionFailed(err.to_string())
    }
}

/// Classify a failure while reading the response body
fn map_body_error(err: &reqwest::Error, timeout: Duration) -> OtpError {
    if err.is_timeout() {
        OtpError::Timeout {
            timeout_ms: duration_ms(timeout),
        }
    } else {
        OtpError::ParseError(err.to_string())
    }
}

/// Walk the source chain looking for an `ECONNREFUSED` I/O error
fn is_connection_refused(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::ConnectionRefused)
        {
            return true;
        }
        current = e.source();
    }
    false
}
