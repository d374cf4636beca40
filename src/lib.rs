#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Order Core Rust
//!
//! Resilient order placement service: inventory-checked order creation with
//! asynchronous placement events.
//!
//! ## Overview
//!
//! Placing an order coordinates three effects: an availability check against
//! the external inventory service, a transactional insert of the order row,
//! and the publication of an `OrderPlacedEvent` on a pgmq-backed channel.
//! The inventory dependency is wrapped in a circuit breaker with bounded
//! retries and per-attempt timeouts, so a failing upstream degrades into
//! fast, typed rejections instead of piled-up latency.
//!
//! ## Architecture
//!
//! The orchestrator owns sequencing and the error taxonomy; every effectful
//! collaborator sits behind a trait (`AvailabilityChecker`, `OrderStore`,
//! `EventPublisher`) and is injected at construction. The web layer is a
//! thin Axum adapter that maps the taxonomy onto fixed HTTP contracts.
//!
//! ## Module Organization
//!
//! - [`config`] - YAML configuration with environment overrides
//! - [`events`] - Placement events and their fire-and-forget publisher
//! - [`inventory`] - Availability checking (wire client + resilience policy)
//! - [`logging`] - Tracing bootstrap
//! - [`messaging`] - pgmq queue client
//! - [`models`] - Database-backed domain types
//! - [`orchestration`] - The placement workflow coordinator
//! - [`resilience`] - Circuit breaker core and registry
//! - [`store`] - Durable order persistence
//! - [`web`] - Axum handlers, envelope, and router
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use order_core::config::OrderServiceConfig;
//!
//! let config = OrderServiceConfig::default();
//! println!(
//!     "inventory base url: {}",
//!     config.inventory.base_url
//! );
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests (integration suites run against local stubs)
//! ```

pub mod config;
pub mod events;
pub mod inventory;
pub mod logging;
pub mod messaging;
pub mod models;
pub mod orchestration;
pub mod resilience;
pub mod store;
pub mod web;

pub use config::{ConfigManager, OrderServiceConfig};
pub use models::{NewOrder, Order, OrderRequest, UserDetails};
pub use orchestration::{OrderPlacementError, OrderPlacementService};
