//! Application state shared across handlers

use std::sync::Arc;

use application::RoutingService;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Routing use cases
    pub routing_service: Arc<RoutingService>,
}

impl AppState {
    /// Wrap a routing service
    #[must_use]
    pub fn new(routing_service: RoutingService) -> Self {
        Self {
            routing_service: Arc::new(routing_service),
        }
    }
}
