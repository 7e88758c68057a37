//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async gateway port is defined in the application layer (ports).

use super::entities::{ToolCall, ToolDescriptor};
use super::value_objects::ToolError;

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their descriptors without any I/O operations.
pub trait ToolValidator: Send + Sync {
    /// Validate a tool call against its descriptor
    fn validate(&self, call: &ToolCall, descriptor: &ToolDescriptor) -> Result<(), ToolError>;
}

/// Schema-driven validator: required arguments present, declared types matched.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, descriptor: &ToolDescriptor) -> Result<(), ToolError> {
        descriptor
            .input_schema
            .validate(&call.arguments)
            .map_err(|issues| ToolError::InvalidArguments {
                tool: descriptor.name.clone(),
                issues,
            })
    }
}
