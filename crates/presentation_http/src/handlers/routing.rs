//! Route planning handlers

use axum::{Json, extract::State};
use domain::{RoutePlanRequest, RouteSummary, TimeEstimateRequest, TravelEstimate};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, middleware::JsonBody, state::AppState};

/// `POST /plan` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRouteResponse {
    /// Always `true`
    pub success: bool,
    /// The simplified first itinerary
    pub route: RouteSummary,
}

/// `POST /time` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateTimeResponse {
    /// Always `true`
    pub success: bool,
    /// `timeMinutes` and `distanceKm`
    #[serde(flatten)]
    pub estimate: TravelEstimate,
}

/// Plan a route between two coordinates
pub async fn plan_route(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RoutePlanRequest>,
) -> Result<Json<PlanRouteResponse>, ApiError> {
    let route = state
        .routing_service
        .plan_route(request)
        .await
        .map_err(ApiError::from_plan_error)?;

    Ok(Json(PlanRouteResponse {
        success: true,
        route,
    }))
}

/// Estimate travel time between two coordinates
pub async fn estimate_time(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<TimeEstimateRequest>,
) -> Result<Json<EstimateTimeResponse>, ApiError> {
    let estimate = state
        .routing_service
        .estimate_time(request)
        .await
        .map_err(ApiError::from_estimate_error)?;

    Ok(Json(EstimateTimeResponse {
        success: true,
        estimate,
    }))
}
