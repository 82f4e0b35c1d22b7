//! Itinerary computed by the upstream planner
//!
//! This is the boundary model: upstream fields that may be absent have
//! already been defaulted by the adapter that produced it, so consumers
//! read plain values.

use serde::{Deserialize, Serialize};

/// A named point at either end of a leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name, if the upstream supplied one
    pub name: Option<String>,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

/// One mode-homogeneous segment of an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryLeg {
    /// Upstream mode string (e.g. `CAR`, `WALK`), passed through verbatim
    pub mode: String,
    /// Start of the leg
    pub from: Place,
    /// End of the leg
    pub to: Place,
    /// Length in meters
    pub distance_m: f64,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Turn-by-turn steps, opaque to the proxy
    pub steps: Option<Vec<serde_json::Value>>,
}

/// One route option returned by the upstream planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Total duration in seconds
    pub duration_secs: f64,
    /// Distance covered on foot, in meters
    pub walk_distance_m: f64,
    /// Distance covered on transit/vehicle, in meters
    pub transit_distance_m: Option<f64>,
    /// Departure as epoch milliseconds
    pub start_time_ms: i64,
    /// Arrival as epoch milliseconds
    pub end_time_ms: i64,
    /// Segments in travel order
    pub legs: Vec<ItineraryLeg>,
}

impl Itinerary {
    /// Total distance: walking plus transit, with missing transit as zero
    #[must_use]
    pub fn total_distance_m(&self) -> f64 {
        self.walk_distance_m + self.transit_distance_m.unwrap_or(0.0)
    }
}
