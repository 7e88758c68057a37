//! Domain layer for atlas
//!
//! This crate contains the shared vocabulary of the tool-invocation gateway:
//! protocol types, argument values, input schemas and the provider contract.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Provider**: a self-contained backend exposing one or more named tools
//!   with declared schemas ([`ToolProvider`]).
//! - **Qualified name**: `<provider>_<tool>`, the globally unique name under
//!   which the gateway publishes a provider's tool.
//! - **Tool result**: content blocks plus an error flag; validation and
//!   domain failures travel as data, never as panics.

pub mod rpc;
pub mod tool;

// Re-export commonly used types
pub use rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId};
pub use tool::{
    entities::{CallParseError, FunctionSpec, ToolCall, ToolDescriptor, ToolSpec},
    provider::{ProviderError, ToolProvider},
    schema::{FieldIssue, InputSchema, IssueKind, PropertySchema, SchemaError, SchemaType},
    traits::{DefaultToolValidator, ToolValidator},
    value::{ArgValue, Arguments},
    value_objects::{ContentBlock, ToolError, ToolOutput, ToolResult},
};
