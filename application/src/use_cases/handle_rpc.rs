//! Handle RPC Request use case.
//!
//! Maps JSON-RPC 2.0 requests onto the gateway:
//!
//! | Method        | Params                      | Result                    |
//! |---------------|-----------------------------|---------------------------|
//! | `tools/list`  | none                        | `{"tools": [descriptor]}` |
//! | `tools/call`  | `{name, arguments?}`        | tool result               |
//! | `tools/batch` | `{calls: [{name, ...}]}`    | `{"results": [result]}`   |
//!
//! Requests without an `id` are notifications: they run, but produce no
//! response.

use crate::ports::tool_gateway::ToolGatewayPort;
use atlas_domain::rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use atlas_domain::tool::entities::ToolCall;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

pub const METHOD_LIST: &str = "tools/list";
pub const METHOD_CALL: &str = "tools/call";
pub const METHOD_BATCH: &str = "tools/batch";

#[derive(Debug, Deserialize)]
struct BatchParams {
    calls: Vec<ToolCall>,
}

/// Use case answering one JSON-RPC request at a time.
pub struct HandleRpcRequestUseCase {
    gateway: Arc<dyn ToolGatewayPort>,
}

impl HandleRpcRequestUseCase {
    pub fn new(gateway: Arc<dyn ToolGatewayPort>) -> Self {
        Self { gateway }
    }

    /// Handle one raw line of input.
    ///
    /// Unparseable input is answered with a parse error and a null id.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "Rejected unparseable request");
                return Some(JsonRpcResponse::failure(
                    None,
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::failure(
                None,
                JsonRpcError::invalid_request(e.to_string()),
            )),
        }
    }

    /// Handle a decoded request. Returns `None` for notifications.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();
        let outcome = if request.is_v2() {
            self.dispatch(&request.method, request.params).await
        } else {
            Err(JsonRpcError::invalid_request(format!(
                "unsupported jsonrpc version '{}'",
                request.jsonrpc
            )))
        };

        // Notification
        id.as_ref()?;

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
        debug!(method, "Dispatching request");
        match method {
            METHOD_LIST => Ok(json!({ "tools": self.gateway.all_tools() })),
            METHOD_CALL => {
                let call: ToolCall = parse_params(params)?;
                let result = self.gateway.execute_tool(&call).await.map_err(|e| {
                    warn!(tool = %call.name, error = %e, "Routing failed");
                    JsonRpcError::invalid_params(e.to_string())
                        .with_data(json!({ "name": call.name }))
                })?;
                to_value(&result)
            }
            METHOD_BATCH => {
                let batch: BatchParams = parse_params(params)?;
                let results = self.gateway.execute_tools(&batch.calls).await;
                Ok(json!({ "results": results }))
            }
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }
}

fn parse_params<T: for<'de> Deserialize<'de>>(params: Option<Value>) -> Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("missing params"))?;
    serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal(e.to_string()))
}
