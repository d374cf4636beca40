//! # Web API Application State
//!
//! Shared state handed to every handler. The placement service arrives fully
//! wired; handlers never construct collaborators themselves.

use std::sync::Arc;

use crate::orchestration::OrderPlacementService;

/// Shared state for web handlers
#[derive(Clone)]
pub struct AppState {
    pub order_placement: Arc<OrderPlacementService>,
}

impl AppState {
    pub fn new(order_placement: Arc<OrderPlacementService>) -> Self {
        Self { order_placement }
    }
}
