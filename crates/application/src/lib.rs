//! Application layer - Use cases and orchestration
//!
//! Validates routing requests, drives the upstream planner through the
//! [`RoutePlannerPort`] seam and maps its failures onto the categories the
//! HTTP layer reports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
