//! Domain layer for Trekroute
//!
//! Contains the values that cross the routing proxy boundary: coordinates,
//! travel modes, upstream itineraries and the simplified route summaries
//! derived from them. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
