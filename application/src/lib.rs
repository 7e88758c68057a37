//! Application layer for atlas
//!
//! This crate contains the gateway port, the reusable provider base, use
//! cases and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod provider;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_CALL_TIMEOUT, GatewayConfig};
pub use ports::{
    tool_gateway::{GatewayError, QUALIFIER_SEPARATOR, ToolGatewayPort},
    tool_schema::ToolSchemaPort,
};
pub use provider::{HandlerProvider, ToolHandler, describe_panic};
pub use use_cases::execute_tool_batch::{
    ExecuteToolBatchUseCase, FunctionCallRequest, ToolResponseMessage,
};
pub use use_cases::handle_rpc::HandleRpcRequestUseCase;
