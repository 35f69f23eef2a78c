//! Inbound RPC boundary for the orders service.
//!
//! Exposes the four order operations behind a message envelope carried
//! over HTTP (`POST /rpc`), with structured logging (tracing) and
//! Prometheus metrics. The envelope itself is transport-agnostic; the
//! dispatcher in [`rpc`] can be driven by any request/response carrier.

pub mod config;
pub mod error;
pub mod rpc;

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use catalog::ProductValidator;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::OrderStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use rpc::{AppState, RpcRequest, RpcResponse};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, V>(state: Arc<AppState<S, V>>, metrics_handle: PrometheusHandle) -> Router
where
    S: OrderStore + 'static,
    V: ProductValidator + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(health))
        .route("/rpc", post(handle_rpc::<S, V>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// POST /rpc — unwrap the envelope, dispatch, re-wrap.
async fn handle_rpc<S, V>(
    State(state): State<Arc<AppState<S, V>>>,
    Json(request): Json<RpcRequest>,
) -> Json<RpcResponse>
where
    S: OrderStore + 'static,
    V: ProductValidator + 'static,
{
    Json(rpc::dispatch(&state, request).await)
}

/// GET /health — liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "service": "orders"}))
}

/// GET /metrics — Prometheus-formatted metrics.
async fn render_metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        handle.render(),
    )
}
