//! # Resilience Module
//!
//! Fault tolerance for calls into unreliable dependencies. The inventory
//! service is remote and independently deployed; circuit breakers here keep
//! its slowness or outages from cascading into the order placement path.
//!
//! ## Architecture
//!
//! - **Circuit Breakers**: Prevent cascade failures by isolating failing components
//! - **Sliding Failure Window**: Only recent failures count toward opening
//! - **Single-Probe Recovery**: Half-open admits exactly one test call at a time
//! - **Metrics Collection**: Track failure rates and state transitions
//!
//! ## Usage
//!
//! ```rust,no_run
//! use order_core::resilience::{CircuitBreaker, CircuitBreakerConfig};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CircuitBreakerConfig {
//!     failure_threshold: 5,
//!     failure_window: Duration::from_secs(30),
//!     cooldown: Duration::from_secs(10),
//! };
//!
//! let circuit_breaker = CircuitBreaker::new("inventory".to_string(), config);
//!
//! let result = circuit_breaker.call(|| async {
//!     // Remote call here
//!     Ok::<&str, Box<dyn std::error::Error>>("success")
//! }).await?;
//! # Ok(())
//! # }
//! ```

pub mod circuit_breaker;
pub mod config;
pub mod manager;
pub mod metrics;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerError, CircuitState};
pub use config::CircuitBreakerConfig;
pub use manager::CircuitBreakerManager;
pub use metrics::CircuitBreakerMetrics;
