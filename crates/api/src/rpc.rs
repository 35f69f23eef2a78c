//! Message envelope and pattern dispatch for the order operations.
//!
//! Requests arrive as `{"pattern": <name>, "data": <payload>}` and are
//! answered with `{"data": <result>}` or
//! `{"error": {"status": <code>, "message": <text>}}`. Malformed payloads
//! and unknown patterns are rejected with a 400-equivalent error before
//! any store access.

use catalog::ProductValidator;
use common::OrderId;
use domain::{ChangeOrderStatus, CreateOrder, OrderService, OrdersPage};
use order_store::OrderStore;
use serde::{Deserialize, Serialize};

use crate::error::RpcError;

/// Message patterns answered by this service.
pub const CREATE_ORDER: &str = "create_order";
pub const FIND_ALL_ORDERS: &str = "find_all_orders";
pub const FIND_ONE_ORDER: &str = "find_one_order";
pub const CHANGE_ORDER_STATUS: &str = "change_order_status";

/// Shared application state accessible from all handlers.
pub struct AppState<S, V> {
    pub order_service: OrderService<S, V>,
}

impl<S, V> AppState<S, V> {
    pub fn new(order_service: OrderService<S, V>) -> Self {
        Self { order_service }
    }
}

/// An inbound RPC request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    pub pattern: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// An outbound RPC response envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RpcResponse {
    Ok { data: serde_json::Value },
    Err { error: RpcError },
}

impl From<Result<serde_json::Value, RpcError>> for RpcResponse {
    fn from(result: Result<serde_json::Value, RpcError>) -> Self {
        match result {
            Ok(data) => RpcResponse::Ok { data },
            Err(error) => RpcResponse::Err { error },
        }
    }
}

#[derive(Debug, Deserialize)]
struct FindOneOrder {
    id: OrderId,
}

/// Routes a request envelope to the matching order operation.
#[tracing::instrument(skip(state, request), fields(pattern = %request.pattern))]
pub async fn dispatch<S, V>(state: &AppState<S, V>, request: RpcRequest) -> RpcResponse
where
    S: OrderStore,
    V: ProductValidator,
{
    let result = match request.pattern.as_str() {
        CREATE_ORDER => {
            match parse::<CreateOrder>(request.data) {
                Ok(req) => call(state.order_service.create(req).await),
                Err(e) => Err(e),
            }
        }
        FIND_ALL_ORDERS => {
            match parse::<OrdersPage>(request.data) {
                Ok(req) => call(state.order_service.find_all(req).await),
                Err(e) => Err(e),
            }
        }
        FIND_ONE_ORDER => {
            match parse::<FindOneOrder>(request.data) {
                Ok(req) => call(state.order_service.find_one(req.id).await),
                Err(e) => Err(e),
            }
        }
        CHANGE_ORDER_STATUS => {
            match parse::<ChangeOrderStatus>(request.data) {
                Ok(req) => call(state.order_service.change_status(req).await),
                Err(e) => Err(e),
            }
        }
        unknown => Err(RpcError::bad_request(format!(
            "Unknown message pattern '{unknown}'"
        ))),
    };

    RpcResponse::from(result)
}

fn parse<T: serde::de::DeserializeOwned>(data: serde_json::Value) -> Result<T, RpcError> {
    serde_json::from_value(data).map_err(|e| RpcError::bad_request(e.to_string()))
}

fn call<T: Serialize>(result: domain::Result<T>) -> Result<serde_json::Value, RpcError> {
    let value = result.map_err(RpcError::from)?;
    serde_json::to_value(value).map_err(|e| RpcError {
        status: 500,
        message: e.to_string(),
    })
}
