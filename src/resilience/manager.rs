//! Circuit breaker registry.
//!
//! One manager per process owns every named circuit breaker so that all
//! callers hitting the same dependency share failure history and state.
//! Breakers are created lazily from configuration on first access.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::config::CircuitBreakerSettings;
use crate::resilience::CircuitBreaker;

/// Process-wide registry of circuit breakers keyed by component name
#[derive(Debug)]
pub struct CircuitBreakerManager {
    /// Source settings used to configure breakers on first access
    settings: CircuitBreakerSettings,

    /// Named breakers; shared so every caller sees the same state
    breakers: RwLock<HashMap<String, Arc<CircuitBreaker>>>,
}

impl CircuitBreakerManager {
    /// Build a manager from YAML-derived circuit breaker settings
    pub fn from_config(settings: &CircuitBreakerSettings) -> Self {
        Self {
            settings: settings.clone(),
            breakers: RwLock::new(HashMap::new()),
        }
    }

    /// Whether circuit breaking is enabled globally
    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Get the circuit breaker for a component, creating it from
    /// configuration on first access
    pub async fn get_circuit_breaker(&self, component_name: &str) -> Arc<CircuitBreaker> {
        {
            let breakers = self.breakers.read().await;
            if let Some(breaker) = breakers.get(component_name) {
                return breaker.clone();
            }
        }

        let mut breakers = self.breakers.write().await;
        // Another caller may have created it while we waited for the lock
        if let Some(breaker) = breakers.get(component_name) {
            return breaker.clone();
        }

        let config = self
            .settings
            .config_for_component(component_name)
            .to_resilience_config();

        debug!(
            component = %component_name,
            failure_threshold = config.failure_threshold,
            "Creating circuit breaker from configuration"
        );

        let breaker = Arc::new(CircuitBreaker::new(component_name.to_string(), config));
        breakers.insert(component_name.to_string(), breaker.clone());
        breaker
    }
}
