//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod timezone;
mod travel_mode;

pub use coordinate::Coordinate;
pub use timezone::Timezone;
pub use travel_mode::TravelMode;
