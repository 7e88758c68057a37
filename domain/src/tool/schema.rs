//! Input schemas for tools
//!
//! A deliberately small subset of JSON Schema: an object with typed,
//! described properties and an optional `required` list. That is enough to
//! validate arguments structurally and to hand the schema to an LLM
//! function-calling API unchanged.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use super::value::{ArgValue, Arguments};

/// Primitive JSON Schema type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    #[default]
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
        }
    }

    /// Whether `value` satisfies this type.
    ///
    /// `null` never matches: an explicit null for a typed property is a type
    /// error, whereas leaving an optional property out is fine.
    pub fn accepts(&self, value: &ArgValue) -> bool {
        match self {
            SchemaType::String => matches!(value, ArgValue::String(_)),
            SchemaType::Number => matches!(value, ArgValue::Integer(_) | ArgValue::Float(_)),
            SchemaType::Integer => value.as_i64().is_some(),
            SchemaType::Boolean => matches!(value, ArgValue::Bool(_)),
            SchemaType::Object => matches!(value, ArgValue::Object(_)),
            SchemaType::Array => matches!(value, ArgValue::Array(_)),
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Schema of a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default)]
    pub description: String,
}

impl PropertySchema {
    pub fn new(schema_type: SchemaType, description: impl Into<String>) -> Self {
        Self {
            schema_type,
            description: description.into(),
        }
    }
}

/// Input schema of a tool (`{"type": "object", "properties": ..., "required": [...]}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl Default for InputSchema {
    fn default() -> Self {
        Self::object()
    }
}

impl InputSchema {
    /// An object schema with no properties.
    pub fn object() -> Self {
        Self {
            schema_type: SchemaType::Object,
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    pub fn property(
        mut self,
        name: impl Into<String>,
        schema_type: SchemaType,
        description: impl Into<String>,
    ) -> Self {
        self.properties
            .insert(name.into(), PropertySchema::new(schema_type, description));
        self
    }

    /// Declare a property and mark it required in one step.
    pub fn required_property(
        self,
        name: impl Into<String>,
        schema_type: SchemaType,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.property(name.clone(), schema_type, description)
            .required(name)
    }

    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Structural check of the schema itself.
    pub fn check(&self) -> Result<(), SchemaError> {
        if self.schema_type != SchemaType::Object {
            return Err(SchemaError::NotAnObject(self.schema_type));
        }

        let mut seen = HashSet::new();
        for name in &self.required {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateRequired(name.clone()));
            }
            if !self.properties.contains_key(name) {
                return Err(SchemaError::UnknownRequired(name.clone()));
            }
        }

        Ok(())
    }

    /// Validate `args` against this schema.
    ///
    /// Every offending field is reported, sorted by name. Arguments that the
    /// schema does not declare are passed through untouched.
    pub fn validate(&self, args: &Arguments) -> Result<(), Vec<FieldIssue>> {
        let mut issues = Vec::new();

        for name in &self.required {
            if !args.contains_key(name) {
                issues.push(FieldIssue::missing(name));
            }
        }

        for (name, value) in args {
            match self.properties.get(name) {
                Some(prop) if !prop.schema_type.accepts(value) => {
                    issues.push(FieldIssue::type_mismatch(name, prop.schema_type, value));
                }
                _ => {}
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            issues.sort_by(|a, b| a.field.cmp(&b.field));
            Err(issues)
        }
    }
}

/// A malformed schema or descriptor, detected at provider initialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("input schema must be of type 'object', found '{0}'")]
    NotAnObject(SchemaType),

    #[error("'required' references undeclared property '{0}'")]
    UnknownRequired(String),

    #[error("'required' lists property '{0}' more than once")]
    DuplicateRequired(String),

    #[error("tool name cannot be empty")]
    EmptyToolName,

    #[error("tool name '{0}' contains whitespace")]
    InvalidToolName(String),
}

/// What is wrong with one argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IssueKind {
    Missing,
    TypeMismatch {
        expected: SchemaType,
        found: String,
    },
}

/// A single argument validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: IssueKind::Missing,
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: SchemaType, value: &ArgValue) -> Self {
        Self {
            field: field.into(),
            kind: IssueKind::TypeMismatch {
                expected,
                found: value.kind().to_string(),
            },
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            IssueKind::Missing => write!(f, "missing required argument '{}'", self.field),
            IssueKind::TypeMismatch { expected, found } => write!(
                f,
                "argument '{}' must be {}, got {}",
                self.field, expected, found
            ),
        }
    }
}
