//! Routing service
//!
//! Implements the three proxy operations on top of a [`RoutePlannerPort`]:
//! full route planning, quick travel-time estimates and a planner liveness
//! probe. Input problems are rejected before the planner is called, and
//! every failure is logged with its category before it is returned.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{
    Coordinate, RoutePlanRequest, RouteSummary, TimeEstimateRequest, Timezone, TravelEstimate,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{PlannerRequest, RoutePlannerPort, TripSchedule};

/// Message returned when either endpoint is missing
const MISSING_COORDINATES: &str = "from and to coordinates are required";

/// Knobs for [`RoutingService`]
#[derive(Debug, Clone)]
pub struct RoutingSettings {
    /// Zone used for the default trip date and for display timestamps
    pub timezone: Timezone,
    /// Trip time used when the caller sends none, `HH:MM:SS`
    pub default_time: String,
    /// Reject out-of-range coordinates before calling the planner
    pub strict_coordinates: bool,
    /// Upstream budget for `/plan`
    pub plan_timeout: Duration,
    /// Upstream budget for `/time`
    pub estimate_timeout: Duration,
    /// Upstream budget for `/health`
    pub health_timeout: Duration,
    /// Router name reported by the health check
    pub router_id: String,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            timezone: Timezone::default(),
            default_time: "08:00:00".to_string(),
            strict_coordinates: false,
            plan_timeout: Duration::from_secs(10),
            estimate_timeout: Duration::from_secs(5),
            health_timeout: Duration::from_secs(3),
            router_id: "default".to_string(),
        }
    }
}

/// Result of a planner liveness probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerHealth {
    /// Whether the planner answered
    pub connected: bool,
    /// Router that was probed
    pub router: String,
    /// Failure message when not connected
    pub error: Option<String>,
}

/// Route planning use cases
pub struct RoutingService {
    planner: Arc<dyn RoutePlannerPort>,
    settings: RoutingSettings,
    clock: fn() -> DateTime<Utc>,
}

impl std::fmt::Debug for RoutingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl RoutingService {
    /// Create a new routing service
    #[must_use]
    pub fn new(planner: Arc<dyn RoutePlannerPort>, settings: RoutingSettings) -> Self {
        Self {
            planner,
            settings,
            clock: Utc::now,
        }
    }

    /// Replace the clock used for the default trip date
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Current settings
    #[must_use]
    pub const fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    /// Plan a route and return its simplified summary
    ///
    /// # Errors
    ///
    /// - `InvalidInput` / `Domain` when an endpoint is missing or invalid
    /// - `RouteNotFound` when the planner has no itinerary or answers 404
    /// - `UpstreamUnavailable` when the planner refuses the connection
    /// - `ExternalService` for any other upstream failure
    #[instrument(skip(self, request))]
    pub async fn plan_route(
        &self,
        request: RoutePlanRequest,
    ) -> Result<RouteSummary, ApplicationError> {
        let (from, to) = self.require_endpoints(request.from, request.to)?;

        info!(from = %from.to_place_param(), to = %to.to_place_param(), "Planning route");

        let schedule = TripSchedule {
            date: request.date.unwrap_or_else(|| self.today()),
            time: request
                .time
                .unwrap_or_else(|| self.settings.default_time.clone()),
            arrive_by: request.arrive_by.unwrap_or(false),
        };

        let planner_request = PlannerRequest {
            from,
            to,
            mode: request.mode.unwrap_or_default(),
            schedule: Some(schedule),
            timeout: self.settings.plan_timeout,
        };

        match self.planner.first_itinerary(&planner_request).await {
            Ok(Some(itinerary)) => {
                debug!(legs = itinerary.legs.len(), "Route planned");
                Ok(RouteSummary::from_itinerary(
                    &itinerary,
                    &self.settings.timezone,
                ))
            },
            Ok(None) | Err(ApplicationError::UpstreamNotFound) => {
                Err(log_failure(ApplicationError::RouteNotFound))
            },
            Err(e) => Err(log_failure(e)),
        }
    }

    /// Quick travel-time estimate between two points
    ///
    /// The planner is asked without a schedule so it applies its own
    /// date/time defaults.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` / `Domain` when an endpoint is missing or invalid
    /// - `RouteNotFound` when the planner has no itinerary
    /// - `ExternalService` for every upstream failure, including a refused
    ///   connection and an upstream 404
    #[instrument(skip(self, request))]
    pub async fn estimate_time(
        &self,
        request: TimeEstimateRequest,
    ) -> Result<TravelEstimate, ApplicationError> {
        let (from, to) = self.require_endpoints(request.from, request.to)?;

        let planner_request = PlannerRequest {
            from,
            to,
            mode: request.mode.unwrap_or_default(),
            schedule: None,
            timeout: self.settings.estimate_timeout,
        };

        match self.planner.first_itinerary(&planner_request).await {
            Ok(Some(itinerary)) => Ok(TravelEstimate::from(&itinerary)),
            Ok(None) => Err(log_failure(ApplicationError::RouteNotFound)),
            Err(e) => Err(log_failure(ApplicationError::ExternalService(e.detail()))),
        }
    }

    /// Probe the planner
    ///
    /// Never fails; an unreachable planner is reported in the result.
    #[instrument(skip(self))]
    pub async fn check_health(&self) -> PlannerHealth {
        let router = self.settings.router_id.clone();

        match self.planner.probe(self.settings.health_timeout).await {
            Ok(()) => PlannerHealth {
                connected: true,
                router,
                error: None,
            },
            Err(e) => {
                warn!(category = e.category(), error = %e, "Planner health check failed");
                PlannerHealth {
                    connected: false,
                    router,
                    error: Some(e.detail()),
                }
            },
        }
    }

    /// Both endpoints, validated when strict mode is on
    fn require_endpoints(
        &self,
        from: Option<Coordinate>,
        to: Option<Coordinate>,
    ) -> Result<(Coordinate, Coordinate), ApplicationError> {
        let (Some(from), Some(to)) = (from, to) else {
            return Err(log_failure(ApplicationError::InvalidInput(
                MISSING_COORDINATES.to_string(),
            )));
        };

        if !self.settings.strict_coordinates {
            return Ok((from, to));
        }

        let validate = |c: Coordinate| c.validated().map_err(|e| log_failure(e.into()));
        Ok((validate(from)?, validate(to)?))
    }

    /// Trip date in the configured zone, `YYYY-MM-DD`
    fn today(&self) -> String {
        self.settings
            .timezone
            .date_at((self.clock)())
            .format("%Y-%m-%d")
            .to_string()
    }
}

/// Log an error with its category and hand it back
fn log_failure(err: ApplicationError) -> ApplicationError {
    match &err {
        ApplicationError::InvalidInput(_)
        | ApplicationError::Domain(_)
        | ApplicationError::RouteNotFound
        | ApplicationError::UpstreamNotFound => {
            warn!(category = err.category(), error = %err, "Routing request failed");
        },
        ApplicationError::UpstreamUnavailable(_)
        | ApplicationError::ExternalService(_)
        | ApplicationError::Configuration(_) => {
            error!(category = err.category(), error = %err, "Routing request failed");
        },
    }
    err
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use domain::{Itinerary, ItineraryLeg, Place, TravelMode};

    use super::*;
    use crate::ports::MockRoutePlannerPort;

    fn bengaluru() -> Coordinate {
        Coordinate::new(12.9716, 77.5946)
    }

    fn chennai() -> Coordinate {
        Coordinate::new(13.0827, 80.2707)
    }

    fn reference_itinerary() -> Itinerary {
        Itinerary {
            duration_secs: 18_000.0,
            walk_distance_m: 1_200.0,
            transit_distance_m: Some(45_000.0),
            start_time_ms: 1_700_000_000_000,
            end_time_ms: 1_700_018_000_000,
            legs: vec![ItineraryLeg {
                mode: "CAR".to_string(),
                from: Place {
                    name: Some("MG Road".to_string()),
                    lat: 12.9716,
                    lon: 77.5946,
                },
                to: Place {
                    name: Some("Marina Beach".to_string()),
                    lat: 13.0827,
                    lon: 80.2707,
                },
                distance_m: 46_200.0,
                duration_secs: 18_000.0,
                steps: None,
            }],
        }
    }

    // 2026-10-19T20:00:00Z is already 2026-10-20 in Kolkata
    fn late_evening_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 20, 0, 0).unwrap()
    }

    fn service(mock: MockRoutePlannerPort) -> RoutingService {
        RoutingService::new(Arc::new(mock), RoutingSettings::default())
    }

    #[tokio::test]
    async fn test_plan_route_reference_scenario() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary()
            .times(1)
            .returning(|_| Ok(Some(reference_itinerary())));

        let summary = service(mock)
            .plan_route(RoutePlanRequest::between(bengaluru(), chennai()))
            .await
            .unwrap();

        assert!((summary.duration - 18_000.0).abs() < f64::EPSILON);
        assert_eq!(summary.duration_minutes, 300);
        assert!((summary.distance - 46_200.0).abs() < f64::EPSILON);
        assert!((summary.distance_km - 46.2).abs() < f64::EPSILON);
        assert_eq!(summary.start_time, "15/11/2023, 3:43:20 am");
        assert_eq!(summary.legs.len(), 1);
        assert_eq!(summary.legs[0].mode, "CAR");
    }

    #[tokio::test]
    async fn test_plan_route_applies_defaults() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary()
            .withf(|req| {
                req.mode == TravelMode::Car
                    && req.timeout == Duration::from_secs(10)
                    && req.schedule
                        == Some(TripSchedule {
                            date: "2026-10-20".to_string(),
                            time: "08:00:00".to_string(),
                            arrive_by: false,
                        })
            })
            .times(1)
            .returning(|_| Ok(Some(reference_itinerary())));

        let result = service(mock)
            .with_clock(late_evening_utc)
            .plan_route(RoutePlanRequest::between(bengaluru(), chennai()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_plan_route_forwards_caller_schedule() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary()
            .withf(|req| {
                req.mode == TravelMode::Walk
                    && req.schedule.as_ref().is_some_and(|s| {
                        s.date == "2026-12-25" && s.time == "17:45:00" && s.arrive_by
                    })
            })
            .times(1)
            .returning(|_| Ok(Some(reference_itinerary())));

        let request = RoutePlanRequest {
            mode: Some(TravelMode::Walk),
            date: Some("2026-12-25".to_string()),
            time: Some("17:45:00".to_string()),
            arrive_by: Some(true),
            ..RoutePlanRequest::between(bengaluru(), chennai())
        };

        assert!(service(mock).plan_route(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_plan_route_missing_coordinates_skips_planner() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary().times(0);

        let service = service(mock);
        let request = RoutePlanRequest {
            from: Some(bengaluru()),
            ..RoutePlanRequest::default()
        };

        let err = service.plan_route(request).await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(ref m) if m == MISSING_COORDINATES));
    }

    #[tokio::test]
    async fn test_plan_route_no_itinerary() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary().returning(|_| Ok(None));

        let err = service(mock)
            .plan_route(RoutePlanRequest::between(bengaluru(), chennai()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::RouteNotFound));
    }

    #[tokio::test]
    async fn test_plan_route_upstream_404_is_route_not_found() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary()
            .returning(|_| Err(ApplicationError::UpstreamNotFound));

        let err = service(mock)
            .plan_route(RoutePlanRequest::between(bengaluru(), chennai()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::RouteNotFound));
    }

    #[tokio::test]
    async fn test_plan_route_unavailable_passes_through() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary()
            .returning(|_| Err(ApplicationError::UpstreamUnavailable("refused".into())));

        let err = service(mock)
            .plan_route(RoutePlanRequest::between(bengaluru(), chennai()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_plan_route_strict_rejects_out_of_range() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary().times(0);

        let settings = RoutingSettings {
            strict_coordinates: true,
            ..RoutingSettings::default()
        };
        let service = RoutingService::new(Arc::new(mock), settings);

        let err = service
            .plan_route(RoutePlanRequest::between(
                Coordinate::new(95.0, 0.0),
                chennai(),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[tokio::test]
    async fn test_plan_route_permissive_forwards_out_of_range() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary()
            .times(1)
            .returning(|_| Ok(None));

        let err = service(mock)
            .plan_route(RoutePlanRequest::between(
                Coordinate::new(95.0, 0.0),
                chennai(),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::RouteNotFound));
    }

    #[tokio::test]
    async fn test_estimate_time_reference_scenario() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary()
            .withf(|req| req.schedule.is_none() && req.timeout == Duration::from_secs(5))
            .times(1)
            .returning(|_| Ok(Some(reference_itinerary())));

        let request = TimeEstimateRequest {
            from: Some(bengaluru()),
            to: Some(chennai()),
            mode: None,
        };
        let estimate = service(mock).estimate_time(request).await.unwrap();

        assert_eq!(estimate.time_minutes, 300);
        assert!((estimate.distance_km - 46.2).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_estimate_time_missing_coordinates_skips_planner() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary().times(0);

        let err = service(mock)
            .estimate_time(TimeEstimateRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_estimate_time_folds_upstream_errors() {
        for upstream in [
            ApplicationError::UpstreamUnavailable("connect ECONNREFUSED".into()),
            ApplicationError::UpstreamNotFound,
            ApplicationError::ExternalService("Request timed out after 5000 ms".into()),
        ] {
            let expected = upstream.detail();
            let mut mock = MockRoutePlannerPort::new();
            let mut slot = Some(upstream);
            mock.expect_first_itinerary()
                .times(1)
                .returning(move |_| Err(slot.take().unwrap()));

            let request = TimeEstimateRequest {
                from: Some(bengaluru()),
                to: Some(chennai()),
                mode: Some(TravelMode::Walk),
            };
            match service(mock).estimate_time(request).await {
                Err(ApplicationError::ExternalService(detail)) => assert_eq!(detail, expected),
                other => unreachable!("unexpected result: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_estimate_time_no_itinerary() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_first_itinerary().returning(|_| Ok(None));

        let request = TimeEstimateRequest {
            from: Some(bengaluru()),
            to: Some(chennai()),
            mode: None,
        };
        let err = service(mock).estimate_time(request).await.unwrap_err();
        assert!(matches!(err, ApplicationError::RouteNotFound));
    }

    #[tokio::test]
    async fn test_check_health_connected() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_probe()
            .withf(|timeout| *timeout == Duration::from_secs(3))
            .returning(|_| Ok(()));

        let health = service(mock).check_health().await;
        assert!(health.connected);
        assert_eq!(health.router, "default");
        assert!(health.error.is_none());
    }

    #[tokio::test]
    async fn test_check_health_disconnected() {
        let mut mock = MockRoutePlannerPort::new();
        mock.expect_probe()
            .returning(|_| Err(ApplicationError::UpstreamUnavailable("connection refused".into())));

        let health = service(mock).check_health().await;
        assert!(!health.connected);
        assert_eq!(health.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_debug_hides_planner() {
        let service = service(MockRoutePlannerPort::new());
        let debug = format!("{service:?}");
        assert!(debug.contains("RoutingService"));
        assert!(debug.contains("default_time"));
    }
}
