//! OpenTripPlanner adapter - Implements RoutePlannerPort using integration_otp

use std::sync::Arc;
use std::time::Duration;

use application::error::ApplicationError;
use application::ports::{PlannerRequest, RoutePlannerPort};
use async_trait::async_trait;
use domain::{Itinerary, ItineraryLeg, Place};
use integration_otp::{
    HttpOtpClient, OtpClient, OtpConfig, OtpError, OtpItinerary, OtpLeg, OtpPlace, PlanParams,
    Schedule,
};
use tracing::{debug, instrument};

use crate::retry::{RetryConfig, retry};

/// Adapter for an OpenTripPlanner router
pub struct OtpPlannerAdapter {
    client: Arc<dyn OtpClient>,
    retry: RetryConfig,
}

impl std::fmt::Debug for OtpPlannerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpPlannerAdapter")
            .field("client", &"OtpClient")
            .field("max_retries", &self.retry.max_retries)
            .finish()
    }
}

impl OtpPlannerAdapter {
    /// Wrap an existing client
    #[must_use]
    pub fn new(client: Arc<dyn OtpClient>) -> Self {
        Self {
            client,
            retry: RetryConfig::default(),
        }
    }

    /// Build an HTTP client from configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the configuration is invalid.
    pub fn from_config(config: &OtpConfig) -> Result<Self, ApplicationError> {
        let client = HttpOtpClient::new(config).map_err(map_otp_error)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Use a retry policy for upstream calls
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn to_params(request: &PlannerRequest) -> PlanParams {
        match &request.schedule {
            Some(schedule) => PlanParams::full(
                request.from,
                request.to,
                request.mode.clone(),
                Schedule {
                    date: schedule.date.clone(),
                    time: schedule.time.clone(),
                    arrive_by: schedule.arrive_by,
                },
            ),
            None => PlanParams::estimate(request.from, request.to, request.mode.clone()),
        }
    }
}

#[async_trait]
impl RoutePlannerPort for OtpPlannerAdapter {
    #[instrument(skip(self, request), fields(mode = %request.mode))]
    async fn first_itinerary(
        &self,
        request: &PlannerRequest,
    ) -> Result<Option<Itinerary>, ApplicationError> {
        let params = Self::to_params(request);

        let response = retry(&self.retry, || self.client.plan(&params, request.timeout))
            .await
            .map_err(map_otp_error)?;

        if let Some(planner_error) = &response.error {
            debug!(
                id = ?planner_error.id,
                message = ?planner_error.message,
                "Planner reported no plan"
            );
        }

        Ok(response.into_first_itinerary().map(convert_itinerary))
    }

    #[instrument(skip(self))]
    async fn probe(&self, timeout: Duration) -> Result<(), ApplicationError> {
        retry(&self.retry, || self.client.router_info(timeout))
            .await
            .map_err(map_otp_error)
    }
}

/// Map client errors onto the categories the routing service understands
fn map_otp_error(err: OtpError) -> ApplicationError {
    match err {
        OtpError::ConnectionRefused(msg) => ApplicationError::UpstreamUnavailable(msg),
        OtpError::NotFound => ApplicationError::UpstreamNotFound,
        OtpError::RequestFailed { message, .. } => ApplicationError::ExternalService(message),
        OtpError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        other @ (OtpError::ConnectionFailed(_)
        | OtpError::ParseError(_)
        | OtpError::Timeout { .. }) => ApplicationError::ExternalService(other.to_string()),
    }
}

fn convert_itinerary(itinerary: OtpItinerary) -> Itinerary {
    Itinerary {
        duration_secs: itinerary.duration,
        walk_distance_m: itinerary.walk_distance,
        transit_distance_m: itinerary.transit_distance,
        start_time_ms: itinerary.start_time,
        end_time_ms: itinerary.end_time,
        legs: itinerary.legs.into_iter().map(convert_leg).collect(),
    }
}

fn convert_leg(leg: OtpLeg) -> ItineraryLeg {
    ItineraryLeg {
        mode: leg.mode.unwrap_or_default(),
        from: convert_place(leg.from),
        to: convert_place(leg.to),
        distance_m: leg.distance,
        duration_secs: leg.duration,
        steps: leg.steps,
    }
}

fn convert_place(place: OtpPlace) -> Place {
    Place {
        name: place.name,
        lat: place.lat,
        lon: place.lon,
    }
}
