//! Travel mode requested from the upstream planner

use std::fmt;

use serde::{Deserialize, Serialize};

/// Travel mode forwarded to the upstream planner
///
/// `CAR` and `WALK` are the modes the application uses. Any other string
/// is carried through unchanged and left for the upstream to accept or
/// reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TravelMode {
    /// Driving
    #[default]
    Car,
    /// Walking
    Walk,
    /// Any other upstream mode string, verbatim
    Other(String),
}

impl TravelMode {
    /// The wire representation of this mode
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Car => "CAR",
            Self::Walk => "WALK",
            Self::Other(mode) => mode,
        }
    }
}

impl From<String> for TravelMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CAR" => Self::Car,
            "WALK" => Self::Walk,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for TravelMode {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<TravelMode> for String {
    fn from(mode: TravelMode) -> Self {
        match mode {
            TravelMode::Other(mode) => mode,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
