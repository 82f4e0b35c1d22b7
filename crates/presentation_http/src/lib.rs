//! Trekroute HTTP presentation layer
//!
//! Exposes the routing proxy as `POST /plan`, `POST /time` and
//! `GET /health`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{JsonBody, RequestId, RequestIdLayer};
pub use routes::{create_router, with_middleware};
pub use state::AppState;
