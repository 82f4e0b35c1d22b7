//! Timezone value object

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated IANA timezone
///
/// Used to compute the default trip date and to render itinerary
/// timestamps for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timezone(Tz);

impl Timezone {
    /// Parse an IANA timezone name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is unknown.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        Tz::from_str(name)
            .map(Self)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// Get the IANA name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0.name()
    }

    /// Calendar date at `now` in this timezone
    #[must_use]
    pub fn date_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.0).date_naive()
    }

    /// Render epoch milliseconds as `d/m/yyyy, h:mm:ss am|pm`
    ///
    /// Returns an empty string for timestamps chrono cannot represent.
    #[must_use]
    pub fn format_epoch_millis(&self, millis: i64) -> String {
        self.0
            .timestamp_millis_opt(millis)
            .single()
            .map(|dt| dt.format("%-d/%-m/%Y, %-I:%M:%S %P").to_string())
            .unwrap_or_default()
    }

    /// India Standard Time
    #[must_use]
    pub const fn kolkata() -> Self {
        Self(Tz::Asia__Kolkata)
    }

    /// UTC
    #[must_use]
    pub const fn utc() -> Self {
        Self(Tz::UTC)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::kolkata()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Timezone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timezone> for String {
    fn from(tz: Timezone) -> Self {
        tz.as_str().to_string()
    }
}
