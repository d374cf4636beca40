//! # Web API Module
//!
//! Axum presentation layer over the order placement workflow.
//!
//! ## Architecture
//!
//! Handlers stay thin: parse, validate, delegate to the placement service,
//! envelope the outcome. Status codes and body shapes are fixed contracts:
//!
//! - `POST /api/order` → 201 envelope on success; 400/409/503/500 error
//!   envelopes from the shared taxonomy
//! - `GET /health` → bare liveness payload

pub mod handlers;
pub mod response_types;
pub mod state;

pub use response_types::{ApiError, ApiResponse, ApiResult, FieldError, OrderResponse};
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;

/// Build the application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/order", post(handlers::orders::create))
        .with_state(state)
}
