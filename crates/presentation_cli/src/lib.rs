//! Trekroute consumer client
//!
//! Thin wrapper over the proxy's HTTP surface. Callers only ever see a
//! `success` flag; transport and decode failures are logged and folded in.

pub mod cli;
pub mod client;

pub use cli::{Cli, Commands, parse_coordinate, plan_request};
pub use client::{ClientError, EstimateTimeResult, PlanRouteResult, RoutingApiClient};
