//! Application services - use case implementations

mod routing_service;

pub use routing_service::{PlannerHealth, RoutingService, RoutingSettings};
