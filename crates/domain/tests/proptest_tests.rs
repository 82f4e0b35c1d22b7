//! Property-based tests for the itinerary projections
//!
//! These tests use proptest to verify the derivation formulas across many
//! random itineraries.

use domain::{
    Coordinate, Itinerary, ItineraryLeg, Place, RouteSummary, Timezone, TravelEstimate,
    TravelMode, distance_km, duration_minutes,
};
use proptest::prelude::*;

fn itinerary(duration: f64, walk: f64, transit: Option<f64>, start: i64) -> Itinerary {
    Itinerary {
        duration_secs: duration,
        walk_distance_m: walk,
        transit_distance_m: transit,
        start_time_ms: start,
        end_time_ms: start + 60_000,
        legs: vec![ItineraryLeg {
            mode: "CAR".to_string(),
            from: Place {
                name: None,
                lat: 12.9716,
                lon: 77.5946,
            },
            to: Place {
                name: Some("Chennai".to_string()),
                lat: 13.0827,
                lon: 80.2707,
            },
            distance_m: walk + transit.unwrap_or(0.0),
            duration_secs: 0.0,
            steps: None,
        }],
    }
}

// ============================================================================
// Derivation Property Tests
// ============================================================================

mod derivation_tests {
    use super::*;

    proptest! {
        #[test]
        fn distance_km_matches_rounded_total(
            walk in 0.0f64..50_000.0,
            transit in proptest::option::of(0.0f64..500_000.0),
            duration in 0.0f64..200_000.0,
        ) {
            let it = itinerary(duration, walk, transit, 1_700_000_000_000);
            let summary = RouteSummary::from_itinerary(&it, &Timezone::kolkata());
            let expected = ((walk + transit.unwrap_or(0.0)) / 100.0).round() / 10.0;
            prop_assert_eq!(summary.distance_km, expected);
            prop_assert_eq!(summary.distance, walk + transit.unwrap_or(0.0));
        }

        #[test]
        fn duration_minutes_matches_rounded_seconds(duration in 0.0f64..10_000_000.0) {
            let it = itinerary(duration, 0.0, None, 0);
            let summary = RouteSummary::from_itinerary(&it, &Timezone::utc());
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let expected = (duration / 60.0).round() as u64;
            prop_assert_eq!(duration_minutes(duration), expected);
            prop_assert_eq!(summary.duration_minutes, expected);
            prop_assert_eq!(summary.duration, duration);
        }

        #[test]
        fn distance_km_has_at_most_one_decimal(distance in 0.0f64..10_000_000.0) {
            let km = distance_km(distance);
            let scaled = km * 10.0;
            prop_assert!((scaled - scaled.round()).abs() < 1e-6);
        }

        #[test]
        fn estimate_and_summary_agree(
            walk in 0.0f64..50_000.0,
            transit in proptest::option::of(0.0f64..500_000.0),
            duration in 0.0f64..200_000.0,
        ) {
            let it = itinerary(duration, walk, transit, 0);
            let summary = RouteSummary::from_itinerary(&it, &Timezone::utc());
            let estimate = TravelEstimate::from(&it);
            prop_assert_eq!(summary.duration_minutes, estimate.time_minutes);
            prop_assert_eq!(summary.distance_km, estimate.distance_km);
        }

        #[test]
        fn projection_is_deterministic(
            walk in 0.0f64..50_000.0,
            duration in 0.0f64..200_000.0,
            start in 0i64..4_000_000_000_000,
        ) {
            let it = itinerary(duration, walk, None, start);
            let first = serde_json::to_string(&RouteSummary::from_itinerary(&it, &Timezone::kolkata())).unwrap();
            let second = serde_json::to_string(&RouteSummary::from_itinerary(&it, &Timezone::kolkata())).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}

// ============================================================================
// Value Object Property Tests
// ============================================================================

mod value_object_tests {
    use super::*;

    proptest! {
        #[test]
        fn in_range_coordinates_validate(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(Coordinate::new(lat, lon).validated().is_ok());
        }

        #[test]
        fn out_of_range_latitude_rejected(
            lat in prop_oneof![(-1000.0f64..-90.1f64), (90.1f64..1000.0f64)],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(Coordinate::new(lat, lon).validated().is_err());
        }

        #[test]
        fn place_param_round_trips_through_parse(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let param = Coordinate::new(lat, lon).to_place_param();
            let (a, b) = param.split_once(',').unwrap();
            prop_assert_eq!(a.parse::<f64>().unwrap(), lat);
            prop_assert_eq!(b.parse::<f64>().unwrap(), lon);
        }

        #[test]
        fn any_mode_string_survives(mode in "[A-Z_]{1,12}") {
            let parsed = TravelMode::from(mode.as_str());
            prop_assert_eq!(parsed.as_str(), mode.as_str());
        }
    }
}
