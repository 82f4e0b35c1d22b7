//! Domain entities - itineraries, requests and the projections derived from them

mod itinerary;
mod route_request;
mod route_summary;

pub use itinerary::{Itinerary, ItineraryLeg, Place};
pub use route_request::{RoutePlanRequest, TimeEstimateRequest};
pub use route_summary::{RouteLeg, RouteSummary, TravelEstimate, distance_km, duration_minutes};
