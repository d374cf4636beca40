//! # Orchestration Module
//!
//! Coordination core for the order placement workflow.
//!
//! ## Architecture
//!
//! The orchestrator owns sequencing and the error taxonomy; everything
//! effectful sits behind a trait:
//!
//! - **AvailabilityChecker**: answers "is this SKU in stock" as a typed
//!   result, with retries and circuit breaking handled below the trait
//! - **OrderStore**: performs the single durable insert
//! - **EventPublisher**: emits the post-commit `OrderPlacedEvent` without
//!   blocking the workflow
//!
//! `OrderPlacementService` composes the three and converts every failure
//! into an `OrderPlacementError`, so callers see one taxonomy regardless of
//! which collaborator failed.

pub mod errors;
pub mod order_placement;

// Re-export key types for convenience
pub use errors::OrderPlacementError;
pub use order_placement::OrderPlacementService;
