//! JSON Schema tool converter.
//!
//! Implementation of [`ToolSchemaPort`] that renders the gateway's function
//! specs in the tool format of a given LLM API.

use atlas_application::ports::tool_schema::ToolSchemaPort;
use atlas_domain::tool::entities::FunctionSpec;
use serde_json::json;

/// Target API shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiFlavor {
    /// `{name, description, parameters}`
    #[default]
    Plain,
    /// `{"type": "function", "function": {name, description, parameters}}`
    OpenAi,
    /// `{name, description, input_schema}`
    Anthropic,
}

/// Converter producing JSON Schema tool entries.
///
/// Property types map one-to-one onto JSON Schema types (`string`,
/// `number`, `integer`, `boolean`, `object`, `array`), so no coercion is
/// needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaToolConverter {
    flavor: ApiFlavor,
}

impl JsonSchemaToolConverter {
    pub fn new(flavor: ApiFlavor) -> Self {
        Self { flavor }
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, spec: &FunctionSpec) -> serde_json::Value {
        match self.flavor {
            ApiFlavor::Plain => json!({
                "name": spec.name,
                "description": spec.description,
                "parameters": spec.parameters,
            }),
            ApiFlavor::OpenAi => spec.to_openai_tool(),
            ApiFlavor::Anthropic => json!({
                "name": spec.name,
                "description": spec.description,
                "input_schema": spec.parameters,
            }),
        }
    }
}
