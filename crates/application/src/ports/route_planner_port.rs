//! Route planner port
//!
//! The seam between the routing use cases and whatever trip planner
//! answers them. Adapters in the infrastructure layer implement this port
//! over the OpenTripPlanner HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, Itinerary, TravelMode};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Date/time constraints for a full plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSchedule {
    /// Trip date, `YYYY-MM-DD`
    pub date: String,
    /// Trip time, `HH:MM:SS`
    pub time: String,
    /// Whether `time` is the arrival time
    pub arrive_by: bool,
}

/// A single request to the planner
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerRequest {
    /// Origin
    pub from: Coordinate,
    /// Destination
    pub to: Coordinate,
    /// Travel mode
    pub mode: TravelMode,
    /// Schedule for full plans; `None` for quick estimates
    pub schedule: Option<TripSchedule>,
    /// Upper bound on the upstream call
    pub timeout: Duration,
}

/// Port for trip planners
///
/// Implementations must map an unreachable planner to
/// [`ApplicationError::UpstreamUnavailable`] and an upstream HTTP 404 to
/// [`ApplicationError::UpstreamNotFound`]; everything else is
/// [`ApplicationError::ExternalService`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutePlannerPort: Send + Sync {
    /// Plan a trip and return the first itinerary, if any
    async fn first_itinerary(
        &self,
        request: &PlannerRequest,
    ) -> Result<Option<Itinerary>, ApplicationError>;

    /// Check that the planner is reachable and its router is loaded
    async fn probe(&self, timeout: Duration) -> Result<(), ApplicationError>;
}
