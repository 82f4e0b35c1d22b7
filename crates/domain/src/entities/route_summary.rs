//! UI-ready projections of an itinerary
//!
//! [`RouteSummary`] is what `/plan` returns, [`TravelEstimate`] is what
//! `/time` returns. Both are recomputed on every call and carry no
//! identity.
//!
//! # Examples
//!
//! ```
//! use domain::{distance_km, duration_minutes};
//!
//! assert_eq!(duration_minutes(18_000.0), 300);
//! assert_eq!(duration_minutes(89.6), 1);
//! assert!((distance_km(46_200.0) - 46.2).abs() < f64::EPSILON);
//! ```

use serde::{Deserialize, Serialize};

use super::itinerary::{Itinerary, ItineraryLeg, Place};
use crate::value_objects::Timezone;

/// Seconds to whole minutes, rounding half up
///
/// The upstream value is rounded exactly once, here; negative or NaN
/// durations count as zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn duration_minutes(duration_secs: f64) -> u64 {
    (duration_secs.max(0.0) / 60.0).round() as u64
}

/// Meters to kilometers, rounded to one decimal place (half up)
#[must_use]
pub fn distance_km(distance_m: f64) -> f64 {
    (distance_m / 100.0).round() / 10.0
}

/// Simplified leg as returned to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Upstream mode string
    pub mode: String,
    /// Start of the leg
    pub from: Place,
    /// End of the leg
    pub to: Place,
    /// Length in meters
    pub distance: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Upstream steps, present only when the upstream sent them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<serde_json::Value>>,
}

impl From<&ItineraryLeg> for RouteLeg {
    fn from(leg: &ItineraryLeg) -> Self {
        Self {
            mode: leg.mode.clone(),
            from: leg.from.clone(),
            to: leg.to.clone(),
            distance: leg.distance_m,
            duration: leg.duration_secs,
            steps: leg.steps.clone(),
        }
    }
}

/// Simplified itinerary returned by `/plan`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// Total duration in seconds, as sent by the upstream
    pub duration: f64,
    /// `duration` in minutes, rounded
    pub duration_minutes: u64,
    /// Walk plus transit distance in meters
    pub distance: f64,
    /// `distance` in kilometers, one decimal
    pub distance_km: f64,
    /// Departure, formatted for display
    pub start_time: String,
    /// Arrival, formatted for display
    pub end_time: String,
    /// Simplified legs in travel order
    pub legs: Vec<RouteLeg>,
}

impl RouteSummary {
    /// Project an itinerary, rendering timestamps in `timezone`
    #[must_use]
    pub fn from_itinerary(itinerary: &Itinerary, timezone: &Timezone) -> Self {
        let distance = itinerary.total_distance_m();
        Self {
            duration: itinerary.duration_secs,
            duration_minutes: duration_minutes(itinerary.duration_secs),
            distance,
            distance_km: distance_km(distance),
            start_time: timezone.format_epoch_millis(itinerary.start_time_ms),
            end_time: timezone.format_epoch_millis(itinerary.end_time_ms),
            legs: itinerary.legs.iter().map(RouteLeg::from).collect(),
        }
    }
}

/// Quick time/distance estimate returned by `/time`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelEstimate {
    /// Duration in minutes, rounded
    pub time_minutes: u64,
    /// Distance in kilometers, one decimal
    pub distance_km: f64,
}

impl From<&Itinerary> for TravelEstimate {
    fn from(itinerary: &Itinerary) -> Self {
        Self {
            time_minutes: duration_minutes(itinerary.duration_secs),
            distance_km: distance_km(itinerary.total_distance_m()),
        }
    }
}
