//! Tool schema conversion port.
//!
//! Separates "which tools exist" (gateway catalog) from "how to serialize
//! them for a particular LLM API" (infrastructure).

use atlas_domain::tool::entities::FunctionSpec;

/// Port for converting function specs to an LLM API's tool format.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single function spec to the API's JSON shape.
    fn tool_to_schema(&self, spec: &FunctionSpec) -> serde_json::Value;

    /// Convert all specs (sorted by name).
    fn all_tools_schema(&self, specs: &[FunctionSpec]) -> Vec<serde_json::Value> {
        let mut sorted: Vec<&FunctionSpec> = specs.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted.into_iter().map(|s| self.tool_to_schema(s)).collect()
    }
}
