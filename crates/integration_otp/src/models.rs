//! Upstream planner data models
//!
//! Typed representations of the OTP `/plan` response. Only the fields the
//! proxy reads are modelled; everything else in the body is ignored.

use serde::{Deserialize, Serialize};

/// Top-level `/plan` response body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanResponse {
    /// The computed plan, absent when the planner could not route
    #[serde(default)]
    pub plan: Option<Plan>,
    /// Planner-level error (OTP reports "no path" this way with HTTP 200)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<PlannerError>,
}

impl PlanResponse {
    /// The first itinerary, if the plan has any
    #[must_use]
    pub fn first_itinerary(&self) -> Option<&OtpItinerary> {
        self.plan.as_ref().and_then(|plan| plan.itineraries.first())
    }

    /// Consume the response and take the first itinerary
    #[must_use]
    pub fn into_first_itinerary(self) -> Option<OtpItinerary> {
        self.plan
            .and_then(|plan| plan.itineraries.into_iter().next())
    }
}

/// A set of itineraries between two places
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Itineraries, best first
    #[serde(default)]
    pub itineraries: Vec<OtpItinerary>,
}

/// Planner error object
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlannerError {
    /// Numeric error id
    #[serde(default)]
    pub id: Option<i64>,
    /// Human-readable message
    #[serde(default)]
    pub msg: Option<String>,
    /// Machine-readable message key (e.g. `PATH_NOT_FOUND`)
    #[serde(default)]
    pub message: Option<String>,
}

/// One itinerary as sent by the planner
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OtpItinerary {
    /// Total duration in seconds
    #[serde(default)]
    pub duration: f64,
    /// Walking distance in meters
    #[serde(default)]
    pub walk_distance: f64,
    /// Transit distance in meters
    #[serde(default)]
    pub transit_distance: Option<f64>,
    /// Departure, epoch millis
    #[serde(default)]
    pub start_time: i64,
    /// Arrival, epoch millis
    #[serde(default)]
    pub end_time: i64,
    /// Legs in travel order
    #[serde(default)]
    pub legs: Vec<OtpLeg>,
}

/// One leg of an itinerary
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OtpLeg {
    /// Mode string (`CAR`, `WALK`, `BUS`, ...)
    #[serde(default)]
    pub mode: Option<String>,
    /// Start of the leg
    #[serde(default)]
    pub from: OtpPlace,
    /// End of the leg
    #[serde(default)]
    pub to: OtpPlace,
    /// Length in meters
    #[serde(default)]
    pub distance: f64,
    /// Duration in seconds
    #[serde(default)]
    pub duration: f64,
    /// Turn-by-turn steps, kept opaque
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<serde_json::Value>>,
}

/// A named point
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OtpPlace {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Latitude
    #[serde(default)]
    pub lat: f64,
    /// Longitude
    #[serde(default)]
    pub lon: f64,
}
