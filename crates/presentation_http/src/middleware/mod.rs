//! HTTP middleware and extractors

pub mod json;
pub mod request_id;

pub use json::JsonBody;
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer, RequestIdService};
