//! Geographic coordinate value object
//!
//! Coordinates are accepted as-is by default: range checking is left to
//! the upstream planner unless a caller opts into [`Coordinate::validated`].
//!
//! # Examples
//!
//! ```
//! use domain::Coordinate;
//!
//! let bengaluru = Coordinate::new(12.9716, 77.5946);
//! assert_eq!(bengaluru.to_place_param(), "12.9716,77.5946");
//!
//! assert!(Coordinate::new(91.0, 0.0).validated().is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinate {
    /// Latitude in degrees
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    /// Longitude in degrees
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate without range validation
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Return the coordinate if it lies within lat ±90 / lon ±180
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` naming the offending fields.
    pub fn validated(self) -> Result<Self, DomainError> {
        self.validate().map_err(|e| {
            let errors = e.field_errors();
            let mut fields: Vec<&str> = errors.keys().map(AsRef::as_ref).collect();
            fields.sort_unstable();
            let problems: Vec<String> = fields
                .into_iter()
                .map(|field| self.describe_out_of_range(field))
                .collect();
            DomainError::InvalidCoordinates(problems.join(", "))
        })?;
        Ok(self)
    }

    /// Name one offending field together with its own allowed range
    fn describe_out_of_range(self, field: &str) -> String {
        match field {
            "lat" => format!("latitude {} must be between -90 and 90", self.lat),
            "lon" => format!("longitude {} must be between -180 and 180", self.lon),
            other => format!("{other} is out of range"),
        }
    }

    /// Render as the `"lat,lon"` place string the upstream planner expects
    #[must_use]
    pub fn to_place_param(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}
