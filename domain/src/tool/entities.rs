//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::schema::{InputSchema, SchemaError};
use super::value::{ArgValue, Arguments};

/// Definition of one callable capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Tool name, unique within its provider (e.g., "search")
    pub name: String,
    /// Human/LLM-readable description
    pub description: String,
    /// Parameter schema
    pub input_schema: InputSchema,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: InputSchema::object(),
        }
    }

    pub fn with_schema(mut self, input_schema: InputSchema) -> Self {
        self.input_schema = input_schema;
        self
    }

    /// Reject descriptors that cannot be safely published.
    pub fn check(&self) -> Result<(), SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::EmptyToolName);
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(SchemaError::InvalidToolName(self.name.clone()));
        }
        self.input_schema.check()
    }
}

/// A provider's own tool catalog, keyed by unqualified tool name.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: BTreeMap<String, ToolDescriptor>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Insert a descriptor, returning the previous one with the same name.
    pub fn insert(&mut self, tool: ToolDescriptor) -> Option<ToolDescriptor> {
        self.tools.insert(tool.name.clone(), tool)
    }

    pub fn register(mut self, tool: ToolDescriptor) -> Self {
        self.insert(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All descriptors, ordered by name.
    pub fn all(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Error converting an LLM function call into a [`ToolCall`].
#[derive(Debug, Error)]
pub enum CallParseError {
    #[error("arguments are not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("arguments must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// A request to invoke one tool.
///
/// `name` is provider-qualified at the gateway boundary and bare once it
/// reaches a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Arguments,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Arguments::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Same arguments, different name. Used when stripping the provider prefix.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: self.arguments.clone(),
        }
    }

    /// Build a call from a model function call whose arguments arrive as a
    /// serialized JSON blob. An empty or whitespace-only blob means "no
    /// arguments".
    pub fn from_function_call(
        name: impl Into<String>,
        arguments_json: &str,
    ) -> Result<Self, CallParseError> {
        let call = Self::new(name);
        if arguments_json.trim().is_empty() {
            return Ok(call);
        }

        let value: serde_json::Value = serde_json::from_str(arguments_json)?;
        match ArgValue::from(value) {
            ArgValue::Object(map) => Ok(call.with_arguments(map)),
            other => Err(CallParseError::NotAnObject(other.kind())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.arguments.get(key)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.arguments.get(key).and_then(|v| v.as_i64())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.arguments.get(key).and_then(|v| v.as_bool())
    }
}

/// A tool in the function-calling format consumed by LLM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: InputSchema,
}

impl FunctionSpec {
    /// OpenAI-style tool entry: `{"type": "function", "function": {...}}`.
    pub fn to_openai_tool(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": self,
        })
    }
}

impl From<ToolDescriptor> for FunctionSpec {
    fn from(tool: ToolDescriptor) -> Self {
        Self {
            name: tool.name,
            description: tool.description,
            parameters: tool.input_schema,
        }
    }
}
