//! Inbound request shapes for route planning
//!
//! Both coordinates are optional at this level so a missing endpoint can
//! be reported as a client error rather than a decoding failure.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Coordinate, TravelMode};

/// Body of `POST /plan`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanRequest {
    /// Origin
    #[serde(default)]
    pub from: Option<Coordinate>,
    /// Destination
    #[serde(default)]
    pub to: Option<Coordinate>,
    /// Travel mode, `CAR` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TravelMode>,
    /// Trip date `YYYY-MM-DD`, today when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Trip time `HH:MM:SS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Treat `time` as the arrival time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrive_by: Option<bool>,
}

impl RoutePlanRequest {
    /// A request between two points with every other field defaulted
    #[must_use]
    pub fn between(from: Coordinate, to: Coordinate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }
}

/// Body of `POST /time`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeEstimateRequest {
    /// Origin
    #[serde(default)]
    pub from: Option<Coordinate>,
    /// Destination
    #[serde(default)]
    pub to: Option<Coordinate>,
    /// Travel mode, `CAR` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TravelMode>,
}
