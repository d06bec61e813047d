//! Execution results and their specification-form serialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A line/column position inside the operation document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

/// An error reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,

    /// Response path of the failing field, as keys and list indices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: None,
        }
    }
}

/// Outcome of executing one operation.
///
/// `data` distinguishes "not present" (`None`, e.g. the document failed
/// validation) from "present but null" (`Some(Value::Null)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionResult {
    pub data: Option<Value>,
    pub errors: Vec<GraphQLError>,
    pub extensions: Option<Map<String, Value>>,
}

impl ExecutionResult {
    /// A successful result carrying `data`.
    pub fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// A result with no data and the given errors.
    pub fn from_errors(errors: Vec<GraphQLError>) -> Self {
        Self {
            data: None,
            errors,
            extensions: None,
        }
    }

    /// Whether `data` takes part in the response.
    pub fn is_data_present(&self) -> bool {
        self.data.is_some()
    }

    /// Render the standard GraphQL response object.
    ///
    /// `errors` appears only when non-empty, `data` only when present and
    /// `extensions` only when set.
    pub fn to_specification(&self) -> Value {
        let mut response = Map::new();
        if !self.errors.is_empty() {
            let errors = self
                .errors
                .iter()
                .map(|e| serde_json::to_value(e).unwrap_or_else(|_| Value::String(e.message.clone())))
                .collect();
            response.insert("errors".to_string(), Value::Array(errors));
        }
        if let Some(data) = &self.data {
            response.insert("data".to_string(), data.clone());
        }
        if let Some(extensions) = &self.extensions {
            response.insert("extensions".to_string(), Value::Object(extensions.clone()));
        }
        Value::Object(response)
    }
}
