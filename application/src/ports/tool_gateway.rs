//! Tool Gateway port
//!
//! Defines the interface the LLM integration layer uses to discover and call
//! tools across every registered provider.

use async_trait::async_trait;
use atlas_domain::tool::{
    entities::{FunctionSpec, ToolCall, ToolDescriptor},
    value_objects::ToolResult,
};
use thiserror::Error;

/// Separator between provider id and tool name in a qualified name.
pub const QUALIFIER_SEPARATOR: char = '_';

/// Routing errors: the gateway could not resolve a tool name.
///
/// These are distinct from domain failures, which arrive as a
/// [`ToolResult`] with `is_error = true`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The name has no `<provider>_<tool>` shape
    #[error("malformed tool name '{0}': expected '<provider>{sep}<tool>'", sep = QUALIFIER_SEPARATOR)]
    MalformedToolName(String),

    /// No provider registered under the prefix
    #[error("no provider registered for '{provider}' (tool name '{name}')")]
    ProviderNotFound { provider: String, name: String },

    /// The provider exists but never declared the tool
    #[error("provider '{provider}' has no tool '{tool}'")]
    ToolNotFound { provider: String, tool: String },
}

impl GatewayError {
    /// Render this routing failure as an error-flagged tool result, for batch slots.
    pub fn to_result(&self) -> ToolResult {
        ToolResult::error(self.to_string())
    }
}

/// Port for tool discovery and execution
///
/// This port defines how the application layer reaches tools.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolGatewayPort: Send + Sync {
    /// Every tool of every provider, with qualified names and `[provider]`
    /// prefixed descriptions.
    fn all_tools(&self) -> Vec<ToolDescriptor>;

    /// Check if a qualified tool name is published
    fn has_tool(&self, qualified_name: &str) -> bool {
        self.all_tools().iter().any(|t| t.name == qualified_name)
    }

    /// The catalog projected into function-calling format.
    fn to_function_calling_schema(&self) -> Vec<FunctionSpec> {
        self.all_tools().into_iter().map(FunctionSpec::from).collect()
    }

    /// Route one qualified call to its provider.
    async fn execute_tool(&self, call: &ToolCall) -> Result<ToolResult, GatewayError>;

    /// Execute calls concurrently; results are index-aligned with `calls`.
    ///
    /// Routing errors, timeouts and panics occupy their own slot as error
    /// results and never affect sibling calls.
    async fn execute_tools(&self, calls: &[ToolCall]) -> Vec<ToolResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_messages() {
        let err = GatewayError::MalformedToolName("search".into());
        assert_eq!(
            err.to_string(),
            "malformed tool name 'search': expected '<provider>_<tool>'"
        );

        let err = GatewayError::ProviderNotFound {
            provider: "hotels".into(),
            name: "hotels_search".into(),
        };
        assert!(err.to_string().contains("'hotels'"));
    }

    #[test]
    fn test_gateway_error_to_result() {
        let result = GatewayError::ToolNotFound {
            provider: "geo".into(),
            tool: "teleport".into(),
        }
        .to_result();

        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("teleport"));
    }

    struct StaticGateway;

    #[async_trait]
    impl ToolGatewayPort for StaticGateway {
        fn all_tools(&self) -> Vec<ToolDescriptor> {
            vec![ToolDescriptor::new("geo_search", "[geo] Search places")]
        }

        async fn execute_tool(&self, _call: &ToolCall) -> Result<ToolResult, GatewayError> {
            Ok(ToolResult::text("ok"))
        }

        async fn execute_tools(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
            calls.iter().map(|_| ToolResult::text("ok")).collect()
        }
    }

    #[test]
    fn test_default_function_schema_follows_catalog() {
        let gateway = StaticGateway;
        let specs = gateway.to_function_calling_schema();

        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "geo_search");
        assert_eq!(specs[0].description, "[geo] Search places");
        assert!(gateway.has_tool("geo_search"));
        assert!(!gateway.has_tool("geo_nearby"));
    }
}
