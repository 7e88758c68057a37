//! Tool domain module
//!
//! This module defines the shared vocabulary of the tool-invocation gateway:
//! how an LLM-driven orchestrator discovers and calls heterogeneous backend
//! tools through one uniform interface.
//!
//! # Overview
//!
//! Every tool is described by a [`ToolDescriptor`] (name, description,
//! [`InputSchema`]), invoked via a [`ToolCall`] whose arguments are
//! [`ArgValue`]s, and answered with a [`ToolResult`] (content blocks plus an
//! error flag).
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolDescriptor │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (declaration)  │    │ (invocation) │    │ (outcome)    │
//! └───────┬────────┘    └──────────────┘    └──────────────┘
//!         │
//!         └─ input_schema: {"type": "object", "properties": ..., "required": [...]}
//! ```
//!
//! # Key Types
//!
//! - [`ToolSpec`]: A provider's own catalog, keyed by unqualified name
//! - [`ToolDescriptor`]: Immutable definition of one tool
//! - [`InputSchema`]: JSON-Schema subset used for validation and for the
//!   function-calling projection ([`FunctionSpec`])
//! - [`ToolCall`]: An invocation request with typed arguments
//! - [`ToolResult`] / [`ToolError`]: Outcome and provider-level failures
//! - [`ToolValidator`]: Pure domain trait for argument validation
//! - [`ToolProvider`]: Contract every backend implements
//!
//! # Architecture
//!
//! - **Domain** (this module): Pure definitions, no I/O
//! - **Application** (`ToolGatewayPort`, `HandlerProvider`): ports and the
//!   reusable provider base
//! - **Infrastructure** (`ToolGateway`): routing, concurrent fan-out,
//!   catalog projection

pub mod entities;
pub mod provider;
pub mod schema;
pub mod traits;
pub mod value;
pub mod value_objects;

pub use entities::{CallParseError, FunctionSpec, ToolCall, ToolDescriptor, ToolSpec};
pub use provider::{ProviderError, ToolProvider};
pub use schema::{FieldIssue, InputSchema, IssueKind, PropertySchema, SchemaError, SchemaType};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value::{ArgValue, Arguments};
pub use value_objects::{ContentBlock, ToolError, ToolOutput, ToolResult};
