//! # Data Models
//!
//! Database-backed domain types. Each model owns its SQL and maps rows with
//! `sqlx::FromRow`; services above this layer never write queries directly.

pub mod order;

// Re-export core models for easy access
pub use order::{NewOrder, Order, OrderRequest, UserDetails};
