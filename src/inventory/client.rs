//! # Inventory Wire Client
//!
//! HTTP client for the inventory service's availability endpoint. Performs
//! exactly one request per call and classifies what came back; retry and
//! circuit breaker policy live in `ProtectedInventoryClient`.
//!
//! The availability endpoint is `GET /api/inventory?skuCode=..&quantity=..`
//! and answers with the service's standard response envelope; the verdict is
//! the boolean `data` field. The upstream's own degraded-mode fallback
//! responds with an empty `data`, which callers must treat as "no answer"
//! rather than "not in stock".

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigurationError, InventoryClientConfig};

/// Failure of a single availability request
#[derive(Debug, Error)]
pub enum InventoryApiError {
    #[error("inventory request timed out")]
    Timeout,

    #[error("failed to connect to inventory service: {0}")]
    Connection(String),

    #[error("inventory request failed: {0}")]
    Transport(String),

    #[error("inventory service returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[error("inventory response could not be decoded: {0}")]
    MalformedBody(String),
}

impl InventoryApiError {
    /// Whether retrying the request could plausibly produce a different
    /// outcome. Client-error statuses are terminal; everything else is a
    /// transient fault.
    pub fn is_transient(&self) -> bool {
        match self {
            InventoryApiError::Timeout
            | InventoryApiError::Connection(_)
            | InventoryApiError::Transport(_)
            | InventoryApiError::MalformedBody(_) => true,
            InventoryApiError::UpstreamStatus { status } => *status >= 500,
        }
    }
}

/// The subset of the inventory service's response envelope this client reads
#[derive(Debug, Deserialize)]
struct AvailabilityEnvelope {
    #[serde(default)]
    data: Option<bool>,
}

/// HTTP client for the inventory availability endpoint
#[derive(Clone)]
pub struct InventoryServiceClient {
    client: Client,
    base_url: Url,
}

impl std::fmt::Debug for InventoryServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryServiceClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl InventoryServiceClient {
    /// Create a new inventory client with per-attempt timeouts from
    /// configuration
    pub fn new(config: &InventoryClientConfig) -> Result<Self, ConfigurationError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ConfigurationError::invalid_value(
                "inventory.base_url",
                &config.base_url,
                format!("not a valid URL: {e}"),
            )
        })?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(format!("order-service/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ConfigurationError::invalid_value(
                    "inventory",
                    "client",
                    format!("failed to create HTTP client: {e}"),
                )
            })?;

        Ok(Self { client, base_url })
    }

    /// Perform one availability request.
    ///
    /// `Ok(Some(verdict))` is the service's answer; `Ok(None)` is a success
    /// response without a verdict (the upstream fallback envelope).
    pub async fn fetch_availability(
        &self,
        sku_code: &str,
        quantity: i32,
    ) -> Result<Option<bool>, InventoryApiError> {
        let mut url = self
            .base_url
            .join("/api/inventory")
            .map_err(|e| InventoryApiError::Transport(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("skuCode", sku_code)
            .append_pair("quantity", &quantity.to_string());

        debug!(
            url = %url,
            sku_code = %sku_code,
            quantity = quantity,
            "Checking inventory availability"
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(InventoryApiError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let envelope: AvailabilityEnvelope = response
            .json()
            .await
            .map_err(|e| InventoryApiError::MalformedBody(e.to_string()))?;

        Ok(envelope.data)
    }
}

fn classify_transport_error(error: reqwest::Error) -> InventoryApiError {
    if error.is_timeout() {
        InventoryApiError::Timeout
    } else if error.is_connect() {
        InventoryApiError::Connection(error.to_string())
    } else {
        InventoryApiError::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_terminal() {
        assert!(!InventoryApiError::UpstreamStatus { status: 404 }.is_transient());
        assert!(!InventoryApiError::UpstreamStatus { status: 400 }.is_transient());
    }

    #[test]
    fn server_errors_and_transport_faults_are_transient() {
        assert!(InventoryApiError::UpstreamStatus { status: 500 }.is_transient());
        assert!(InventoryApiError::UpstreamStatus { status: 503 }.is_transient());
        assert!(InventoryApiError::Timeout.is_transient());
        assert!(InventoryApiError::Connection("refused".to_string()).is_transient());
        assert!(InventoryApiError::MalformedBody("not json".to_string()).is_transient());
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let mut config = crate::config::OrderServiceConfig::default().inventory;
        config.base_url = "not a url".to_string();
        let result = InventoryServiceClient::new(&config);
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidValue { .. })
        ));
    }
}
