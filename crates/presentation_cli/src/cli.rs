//! Command-line definitions

use clap::{Parser, Subcommand};
use domain::{Coordinate, RoutePlanRequest, TravelMode};

/// Trekroute CLI
#[derive(Debug, Parser)]
#[command(name = "trekroute-cli")]
#[command(author, version, about = "Trekroute routing proxy CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Proxy base URL
    #[arg(
        short,
        long,
        global = true,
        env = "TREKROUTE_URL",
        default_value = "http://localhost:3001"
    )]
    pub url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Plan a route and print the simplified itinerary
    ///
    /// Example: trekroute-cli plan --from 12.9716,77.5946 --to 13.0827,80.2707
    Plan {
        /// Origin as LAT,LON
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        from: Coordinate,

        /// Destination as LAT,LON
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        to: Coordinate,

        /// Travel mode (CAR, WALK, or any planner mode string)
        #[arg(long)]
        mode: Option<String>,

        /// Trip date, YYYY-MM-DD (server default: today)
        #[arg(long)]
        date: Option<String>,

        /// Trip time, HH:MM:SS (server default applies when omitted)
        #[arg(long)]
        time: Option<String>,

        /// Treat --time as the arrival time
        #[arg(long)]
        arrive_by: bool,
    },

    /// Estimate travel time between two points
    Time {
        /// Origin as LAT,LON
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        from: Coordinate,

        /// Destination as LAT,LON
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        to: Coordinate,

        /// Travel mode
        #[arg(long)]
        mode: Option<String>,
    },

    /// Check whether the proxy can reach its planner
    Health,
}

/// Build the `/plan` body from parsed `plan` arguments
#[must_use]
pub fn plan_request(
    from: Coordinate,
    to: Coordinate,
    mode: Option<String>,
    date: Option<String>,
    time: Option<String>,
    arrive_by: bool,
) -> RoutePlanRequest {
    RoutePlanRequest {
        mode: mode.map(TravelMode::from),
        date,
        time,
        arrive_by: arrive_by.then_some(true),
        ..RoutePlanRequest::between(from, to)
    }
}

/// Parse `LAT,LON` into a coordinate
///
/// # Errors
///
/// Returns a message when the value is not two comma-separated finite numbers.
pub fn parse_coordinate(value: &str) -> Result<Coordinate, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{value}'"))?;

    let lat = parse_component(lat, "latitude")?;
    let lon = parse_component(lon, "longitude")?;
    Ok(Coordinate::new(lat, lon))
}

fn parse_component(raw: &str, name: &str) -> Result<f64, String> {
    let number: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid {name} '{}'", raw.trim()))?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(format!("{name} must be finite"))
    }
}
