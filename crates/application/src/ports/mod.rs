//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod route_planner_port;

#[cfg(test)]
pub use route_planner_port::MockRoutePlannerPort;
pub use route_planner_port::{PlannerRequest, RoutePlannerPort, TripSchedule};
