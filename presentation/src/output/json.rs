//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use atlas_domain::tool::value_objects::ToolResult;
use serde_json::json;

/// Formats results as pretty-printed JSON for scripting
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, name: &str, result: &ToolResult) -> String {
        let value = json!({
            "name": name,
            "isError": result.is_error,
            "content": result.content,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
