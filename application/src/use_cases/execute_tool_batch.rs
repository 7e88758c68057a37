//! Execute Tool Batch use case.
//!
//! Takes the function calls a model emitted in one turn (arguments still as
//! serialized JSON), runs them through the gateway concurrently, and returns
//! one tool-response message per call, in the same order.

use crate::ports::tool_gateway::ToolGatewayPort;
use atlas_domain::tool::{entities::ToolCall, value_objects::ToolResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// One function call as emitted by a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCallRequest {
    /// Model-assigned call id, echoed back in the response
    #[serde(default)]
    pub id: Option<String>,
    /// Qualified tool name
    pub name: String,
    /// Arguments as a serialized JSON object. An inline object is accepted
    /// too and re-serialized.
    #[serde(default, deserialize_with = "arguments_blob")]
    pub arguments: String,
}

fn arguments_blob<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(blob) => blob,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl FunctionCallRequest {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Tool-response message fed back to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponseMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub content: String,
    pub is_error: bool,
}

impl ToolResponseMessage {
    fn from_result(request: &FunctionCallRequest, result: &ToolResult) -> Self {
        Self {
            id: request.id.clone(),
            name: request.name.clone(),
            content: result.to_message_text(),
            is_error: result.is_error,
        }
    }
}

/// Use case for answering a model's batch of function calls.
pub struct ExecuteToolBatchUseCase {
    gateway: Arc<dyn ToolGatewayPort>,
}

impl ExecuteToolBatchUseCase {
    pub fn new(gateway: Arc<dyn ToolGatewayPort>) -> Self {
        Self { gateway }
    }

    /// Run every request and return index-aligned response messages.
    ///
    /// Requests whose argument blob does not parse get an error message in
    /// their slot; the rest are executed together in a single gateway batch.
    pub async fn execute(&self, requests: &[FunctionCallRequest]) -> Vec<ToolResponseMessage> {
        let mut slots: Vec<Option<ToolResult>> = vec![None; requests.len()];
        let mut calls = Vec::with_capacity(requests.len());
        let mut positions = Vec::with_capacity(requests.len());

        for (index, request) in requests.iter().enumerate() {
            match ToolCall::from_function_call(&request.name, &request.arguments) {
                Ok(call) => {
                    calls.push(call);
                    positions.push(index);
                }
                Err(e) => {
                    debug!(tool = %request.name, error = %e, "Unparseable function call");
                    slots[index] = Some(ToolResult::error(format!(
                        "invalid arguments for '{}': {}",
                        request.name, e
                    )));
                }
            }
        }

        info!(
            requested = requests.len(),
            dispatched = calls.len(),
            "Executing tool batch"
        );

        let results = self.gateway.execute_tools(&calls).await;
        for (index, result) in positions.into_iter().zip(results) {
            slots[index] = Some(result);
        }

        requests
            .iter()
            .zip(slots)
            .map(|(request, slot)| {
                let result = slot.unwrap_or_else(|| ToolResult::error("no result produced"));
                ToolResponseMessage::from_result(request, &result)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::tool_gateway::GatewayError;
    use async_trait::async_trait;
    use atlas_domain::tool::entities::ToolDescriptor;
    use std::sync::Mutex;

    /// Echoes `text` back; fails for tools named `*_fail`.
    #[derive(Default)]
    struct EchoGateway {
        batches: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl ToolGatewayPort for EchoGateway {
        fn all_tools(&self) -> Vec<ToolDescriptor> {
            vec![ToolDescriptor::new("echo_say", "[echo] Say")]
        }

        async fn execute_tool(&self, call: &ToolCall) -> Result<ToolResult, GatewayError> {
            if call.name.ends_with("_fail") {
                return Ok(ToolResult::error("failed on purpose"));
            }
            Ok(ToolResult::text(
                call.get_string("text").unwrap_or("").to_string(),
            ))
        }

        async fn execute_tools(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
            self.batches.lock().unwrap().push(calls.len());
            let mut results = Vec::new();
            for call in calls {
                results.push(
                    self.execute_tool(call)
                        .await
                        .unwrap_or_else(|e| e.to_result()),
                );
            }
            results
        }
    }

    #[tokio::test]
    async fn test_batch_is_index_aligned() {
        let gateway = Arc::new(EchoGateway::default());
        let use_case = ExecuteToolBatchUseCase::new(gateway.clone());

        let requests = vec![
            FunctionCallRequest::new("echo_say", r#"{"text": "one"}"#).with_id("call_1"),
            FunctionCallRequest::new("echo_fail", "{}").with_id("call_2"),
            FunctionCallRequest::new("echo_say", r#"{"text": "three"}"#).with_id("call_3"),
        ];
        let responses = use_case.execute(&requests).await;

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].content, "one");
        assert!(!responses[0].is_error);
        assert!(responses[1].is_error);
        assert_eq!(responses[1].id.as_deref(), Some("call_2"));
        assert_eq!(responses[2].content, "three");
        assert_eq!(*gateway.batches.lock().unwrap(), vec![3]);
    }

    #[tokio::test]
    async fn test_unparseable_arguments_fill_their_slot() {
        let gateway = Arc::new(EchoGateway::default());
        let use_case = ExecuteToolBatchUseCase::new(gateway.clone());

        let requests = vec![
            FunctionCallRequest::new("echo_say", "{not json"),
            FunctionCallRequest::new("echo_say", r#"["a"]"#),
            FunctionCallRequest::new("echo_say", r#"{"text": "ok"}"#),
        ];
        let responses = use_case.execute(&requests).await;

        assert!(responses[0].is_error);
        assert!(responses[0].content.contains("invalid arguments for 'echo_say'"));
        assert!(responses[1].is_error);
        assert!(responses[1].content.contains("array"));
        assert_eq!(responses[2].content, "ok");
        assert_eq!(*gateway.batches.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_empty_arguments_mean_no_arguments() {
        let use_case = ExecuteToolBatchUseCase::new(Arc::new(EchoGateway::default()));
        let responses = use_case
            .execute(&[FunctionCallRequest::new("echo_say", "")])
            .await;

        assert!(!responses[0].is_error);
        assert_eq!(responses[0].content, "");
    }

    #[test]
    fn test_request_accepts_inline_arguments() {
        let request: FunctionCallRequest = serde_json::from_str(
            r#"{"name": "geo_search", "arguments": {"query": "tapas"}}"#,
        )
        .unwrap();
        assert_eq!(request.arguments, r#"{"query":"tapas"}"#);

        let request: FunctionCallRequest =
            serde_json::from_str(r#"{"name": "geo_search", "arguments": null}"#).unwrap();
        assert_eq!(request.arguments, "");
    }

    #[test]
    fn test_request_deserializes_without_id() {
        let request: FunctionCallRequest =
            serde_json::from_str(r#"{"name": "geo_search", "arguments": "{}"}"#).unwrap();
        assert_eq!(request.id, None);
        assert_eq!(request.name, "geo_search");
    }
}
