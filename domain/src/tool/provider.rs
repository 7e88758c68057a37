//! Tool provider abstraction
//!
//! This module defines the [`ToolProvider`] trait, the contract every backend
//! plugged into the gateway must satisfy. A provider owns one coherent domain
//! (location data, persistence, third-party reviews, ...) and is
//! self-registering: it declares its own tool schemas and validates its own
//! preconditions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ToolGateway                            │
//! │  (qualifies names as <provider>_<tool>, routes, fans out)   │
//! └─────────────────────────────────────────────────────────────┘
//!           │                     │                     │
//!           ▼                     ▼                     ▼
//!    ┌────────────┐        ┌────────────┐        ┌────────────┐
//!    │   places   │        │ favorites  │        │  reviews   │
//!    │  provider  │        │  provider  │        │  provider  │
//!    └────────────┘        └────────────┘        └────────────┘
//! ```
//!
//! # Lifecycle
//!
//! 1. The provider is constructed with whatever configuration it needs.
//! 2. [`ToolProvider::initialize`] is called exactly once by the gateway and
//!    registers the provider's descriptors into its internal registry. It
//!    must fail loudly on a malformed descriptor.
//! 3. [`ToolProvider::tools`] and [`ToolProvider::execute_tool`] are then
//!    called concurrently; the descriptor registry is read-only from here on.

use async_trait::async_trait;
use thiserror::Error;

use super::entities::{ToolCall, ToolDescriptor};
use super::schema::SchemaError;
use super::value_objects::{ToolError, ToolResult};

/// Error type for provider initialization
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A declared descriptor is structurally invalid
    #[error("malformed descriptor for tool '{tool}': {source}")]
    MalformedDescriptor {
        tool: String,
        #[source]
        source: SchemaError,
    },

    /// Two descriptors share the same name
    #[error("tool '{0}' is declared more than once")]
    DuplicateTool(String),

    /// Provider backend is not reachable or not configured
    #[error("provider not available: {0}")]
    NotAvailable(String),

    /// Any other initialization failure
    #[error("initialization failed: {0}")]
    InitializationFailed(String),
}

/// Tool provider abstraction - a self-contained backend exposing named tools
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Display name for user-facing output
    fn display_name(&self) -> &str;

    /// Register this provider's tool descriptors.
    ///
    /// Must be idempotent: a second call after success is a no-op.
    async fn initialize(&self) -> Result<(), ProviderError>;

    /// The provider's own (unqualified) catalog.
    ///
    /// Reflects only tools registered by [`initialize`](Self::initialize);
    /// empty before that.
    fn tools(&self) -> Vec<ToolDescriptor>;

    /// Execute a call whose `name` is one of this provider's tools.
    ///
    /// Returns `Err(ToolError::ToolNotFound)` only when the name was never
    /// declared (a routing bug). Validation and domain failures resolve to
    /// `Ok` with an error-flagged [`ToolResult`].
    async fn execute_tool(&self, call: &ToolCall) -> Result<ToolResult, ToolError>;

    /// Check if this provider has a specific tool
    fn has_tool(&self, tool_name: &str) -> bool {
        self.tools().iter().any(|t| t.name == tool_name)
    }
}
