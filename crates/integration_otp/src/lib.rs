//! OpenTripPlanner integration for Trekroute
//!
//! Talks to an [OpenTripPlanner](https://www.opentripplanner.org) instance
//! over its REST API: `GET /otp/routers/{id}/plan` for itineraries and
//! `GET /otp/routers/{id}` as a liveness probe.
//!
//! # Architecture
//!
//! [`OtpClient`] defines the interface, implemented by [`HttpOtpClient`].
//! Query construction lives in [`PlanParams`]; the typed upstream models
//! in [`models`](crate::PlanResponse) keep every field the proxy does not
//! strictly need optional so upstream additions never break decoding.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use domain::{Coordinate, TravelMode};
//! use integration_otp::{HttpOtpClient, OtpClient, OtpConfig, PlanParams};
//!
//! let config = OtpConfig::default();
//! let client = HttpOtpClient::new(&config)?;
//!
//! let params = PlanParams::estimate(
//!     Coordinate::new(12.9716, 77.5946), // Bengaluru
//!     Coordinate::new(13.0827, 80.2707), // Chennai
//!     TravelMode::Car,
//! );
//! let response = client.plan(&params, Duration::from_secs(5)).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{HttpOtpClient, OtpClient, PlanParams, Schedule};
pub use config::OtpConfig;
pub use error::OtpError;
pub use models::{OtpItinerary, OtpLeg, OtpPlace, Plan, PlanResponse, PlannerError};
