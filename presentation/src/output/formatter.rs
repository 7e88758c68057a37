//! Output formatter trait

use atlas_domain::tool::value_objects::ToolResult;

/// Trait for formatting tool results
pub trait OutputFormatter {
    /// Format the result of a single call
    fn format_result(&self, name: &str, result: &ToolResult) -> String;
}
