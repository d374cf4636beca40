//! # Protected Inventory Client Tests
//!
//! Runs the full availability stack (wire client, retry policy, circuit
//! breaker) against a local stub of the inventory service. The stub records
//! every request so the tests can assert exactly how many attempts reached
//! the wire.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use order_core::config::{
    CircuitBreakerComponentConfig, CircuitBreakerSettings, InventoryClientConfig,
};
use order_core::inventory::{
    AvailabilityChecker, IndeterminateCause, InventoryCheckResult, ProtectedInventoryClient,
};
use order_core::resilience::CircuitBreakerManager;

/// What the stub inventory service does with each request
#[derive(Clone, Copy)]
enum StubBehavior {
    /// Respond 200 with the given verdict; `None` omits the `data` field
    /// the way the upstream's own degraded-mode fallback does
    Answer(Option<bool>),
    /// Respond with a fixed status code and no body
    Status(u16),
    /// Respond 500 to the first N requests, then 200 in stock
    ErrorsThenStock(usize),
    /// Sleep past the client's request timeout before answering
    Delay(Duration),
}

#[derive(Clone)]
struct StubState {
    behavior: StubBehavior,
    hits: Arc<AtomicUsize>,
    last_query: Arc<parking_lot::Mutex<Option<(String, String)>>>,
}

async fn availability_stub(
    State(stub): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let attempt = stub.hits.fetch_add(1, Ordering::SeqCst);
    *stub.last_query.lock() = Some((
        params.get("skuCode").cloned().unwrap_or_default(),
        params.get("quantity").cloned().unwrap_or_default(),
    ));

    match stub.behavior {
        StubBehavior::Answer(verdict) => {
            let mut body = serde_json::json!({
                "timestamp": "2026-01-01T00:00:00Z",
                "status": 200,
                "path": "/api/inventory",
            });
            if let Some(verdict) = verdict {
                body["data"] = serde_json::Value::Bool(verdict);
            }
            Json(body).into_response()
        }
        StubBehavior::Status(code) => StatusCode::from_u16(code)
            .expect("stub status code")
            .into_response(),
        StubBehavior::ErrorsThenStock(failures) => {
            if attempt < failures {
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            } else {
                Json(serde_json::json!({ "data": true })).into_response()
            }
        }
        StubBehavior::Delay(pause) => {
            tokio::time::sleep(pause).await;
            Json(serde_json::json!({ "data": true })).into_response()
        }
    }
}

/// Start a stub inventory service on a random loopback port
async fn spawn_stub(behavior: StubBehavior) -> (StubState, String) {
    let stub = StubState {
        behavior,
        hits: Arc::new(AtomicUsize::new(0)),
        last_query: Arc::new(parking_lot::Mutex::new(None)),
    };

    let app = Router::new()
        .route("/api/inventory", get(availability_stub))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr: SocketAddr = listener.local_addr().expect("stub listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    (stub, format!("http://{addr}"))
}

/// Client config with timings small enough to keep tests fast
fn fast_client_config(base_url: &str, max_attempts: u32) -> InventoryClientConfig {
    InventoryClientConfig {
        base_url: base_url.to_string(),
        connect_timeout_ms: 200,
        request_timeout_ms: 150,
        max_attempts,
        retry_delay_ms: 10,
        max_retry_delay_ms: 40,
    }
}

fn breaker_settings(enabled: bool, failure_threshold: usize) -> CircuitBreakerSettings {
    CircuitBreakerSettings {
        enabled,
        default_config: CircuitBreakerComponentConfig {
            failure_threshold,
            failure_window_seconds: 30,
            cooldown_seconds: 30,
        },
        component_configs: HashMap::new(),
    }
}

fn protected_client(
    base_url: &str,
    max_attempts: u32,
    settings: CircuitBreakerSettings,
) -> ProtectedInventoryClient {
    let manager = Arc::new(CircuitBreakerManager::from_config(&settings));
    ProtectedInventoryClient::new(&fast_client_config(base_url, max_attempts), manager)
        .expect("client should build")
}

#[tokio::test]
async fn test_in_stock_answer_maps_to_available() {
    let (stub, base_url) = spawn_stub(StubBehavior::Answer(Some(true))).await;
    let client = protected_client(&base_url, 3, breaker_settings(true, 50));

    let result = client.check_availability("iphone_15", 10).await;

    assert_eq!(result, InventoryCheckResult::Available);
    assert_eq!(stub.hits.load(Ordering::SeqCst), 1);
    assert_eq!(
        stub.last_query.lock().clone(),
        Some(("iphone_15".to_string(), "10".to_string()))
    );
}

#[tokio::test]
async fn test_out_of_stock_answer_is_terminal() {
    let (stub, base_url) = spawn_stub(StubBehavior::Answer(Some(false))).await;
    let client = protected_client(&base_url, 3, breaker_settings(true, 50));

    let result = client.check_availability("iphone_15", 10).await;

    assert_eq!(
        result,
        InventoryCheckResult::Unavailable {
            sku_code: "iphone_15".to_string()
        }
    );
    // A healthy "no" is never retried
    assert_eq!(stub.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_verdict_is_indeterminate_without_retry() {
    let (stub, base_url) = spawn_stub(StubBehavior::Answer(None)).await;
    let client = protected_client(&base_url, 3, breaker_settings(true, 50));

    let result = client.check_availability("iphone_15", 10).await;

    assert_eq!(
        result,
        InventoryCheckResult::Indeterminate {
            cause: IndeterminateCause::MissingBody
        }
    );
    assert_eq!(stub.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_transient_errors_are_retried_until_the_answer_arrives() {
    let (stub, base_url) = spawn_stub(StubBehavior::ErrorsThenStock(2)).await;
    let client = protected_client(&base_url, 3, breaker_settings(true, 50));

    let result = client.check_availability("iphone_15", 10).await;

    assert_eq!(result, InventoryCheckResult::Available);
    assert_eq!(stub.hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_server_errors_retry_until_attempts_are_exhausted() {
    let (stub, base_url) = spawn_stub(StubBehavior::Status(500)).await;
    let client = protected_client(&base_url, 3, breaker_settings(true, 50));

    match client.check_availability("iphone_15", 10).await {
        InventoryCheckResult::Indeterminate {
            cause: IndeterminateCause::RetriesExhausted {
                attempts,
                last_error,
            },
        } => {
            assert_eq!(attempts, 3);
            assert!(
                last_error.contains("HTTP 500"),
                "unexpected last error: {last_error}"
            );
        }
        other => panic!("expected exhausted retries, got {other:?}"),
    }

    assert_eq!(stub.hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_client_error_status_is_not_retried() {
    let (stub, base_url) = spawn_stub(StubBehavior::Status(404)).await;
    let client = protected_client(&base_url, 3, breaker_settings(true, 50));

    let result = client.check_availability("iphone_15", 10).await;

    assert_eq!(
        result,
        InventoryCheckResult::Indeterminate {
            cause: IndeterminateCause::UpstreamRejected { status: 404 }
        }
    );
    assert_eq!(stub.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_open_circuit_short_circuits_without_touching_the_wire() {
    let (stub, base_url) = spawn_stub(StubBehavior::Status(500)).await;
    // One attempt per check so each check records exactly one breaker failure
    let client = protected_client(&base_url, 1, breaker_settings(true, 2));

    for _ in 0..2 {
        let result = client.check_availability("iphone_15", 10).await;
        assert!(matches!(
            result,
            InventoryCheckResult::Indeterminate {
                cause: IndeterminateCause::RetriesExhausted { .. }
            }
        ));
    }

    // The two failures opened the circuit; the next check never reaches
    // the stub
    let result = client.check_availability("iphone_15", 10).await;
    assert_eq!(
        result,
        InventoryCheckResult::Indeterminate {
            cause: IndeterminateCause::CircuitOpen
        }
    );
    assert_eq!(stub.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_disabled_breaker_never_short_circuits() {
    let (stub, base_url) = spawn_stub(StubBehavior::Status(500)).await;
    let client = protected_client(&base_url, 1, breaker_settings(false, 1));

    for _ in 0..3 {
        let result = client.check_availability("iphone_15", 10).await;
        assert!(matches!(
            result,
            InventoryCheckResult::Indeterminate {
                cause: IndeterminateCause::RetriesExhausted { .. }
            }
        ));
    }

    // Every check reached the stub despite the failures
    assert_eq!(stub.hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_slow_responses_time_out_and_retry() {
    let (stub, base_url) = spawn_stub(StubBehavior::Delay(Duration::from_millis(600))).await;
    let client = protected_client(&base_url, 2, breaker_settings(true, 50));

    match client.check_availability("iphone_15", 10).await {
        InventoryCheckResult::Indeterminate {
            cause: IndeterminateCause::RetriesExhausted {
                attempts,
                last_error,
            },
        } => {
            assert_eq!(attempts, 2);
            assert!(
                last_error.contains("timed out"),
                "unexpected last error: {last_error}"
            );
        }
        other => panic!("expected exhausted retries, got {other:?}"),
    }

    assert_eq!(stub.hits.load(Ordering::SeqCst), 2);
}
