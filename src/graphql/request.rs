//! GraphQL request shapes and their JSON mapping.
//!
//! # Responsibilities
//! - Define the canonical `(query, operationName, variables)` triple
//! - Parse `application/json` request bodies
//! - Parse JSON-encoded variables from query strings
//!
//! # Design Decisions
//! - `query` is never null: a missing or `null` field becomes `""`
//! - Variables default to an empty map, never `None`
//! - Inside a JSON body, `variables` may also be `null` or a JSON-encoded string

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Variable bindings for an operation, keyed by variable name.
pub type Variables = Map<String, Value>;

/// A normalized GraphQL operation, ready to hand to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    /// Operation document. Absent in the payload means empty string.
    #[serde(default, deserialize_with = "deserialize_query")]
    pub query: String,

    /// Name of the operation to run when the document holds several.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,

    /// Variable bindings.
    #[serde(
        default,
        deserialize_with = "deserialize_variables_field",
        skip_serializing_if = "Map::is_empty"
    )]
    pub variables: Variables,
}

impl GraphQLRequest {
    /// Create a request from its three parts.
    pub fn new(
        query: impl Into<String>,
        operation_name: Option<String>,
        variables: Variables,
    ) -> Self {
        Self {
            query: query.into(),
            operation_name,
            variables,
        }
    }

    /// Split the request into its parts.
    pub fn into_parts(self) -> (String, Option<String>, Variables) {
        (self.query, self.operation_name, self.variables)
    }
}

fn deserialize_query<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VariablesField {
    Object(Variables),
    Encoded(String),
}

fn deserialize_variables_field<'de, D>(deserializer: D) -> Result<Variables, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<VariablesField>::deserialize(deserializer)? {
        None => Ok(Variables::new()),
        Some(VariablesField::Object(variables)) => Ok(variables),
        Some(VariablesField::Encoded(text)) if text.trim().is_empty() => Ok(Variables::new()),
        Some(VariablesField::Encoded(text)) => {
            serde_json::from_str(&text).map_err(D::Error::custom)
        }
    }
}

/// Reads GraphQL payloads from JSON text.
///
/// Stateless; a single instance is shared by every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphQLObjectMapper;

impl GraphQLObjectMapper {
    /// Create a new mapper.
    pub fn new() -> Self {
        Self
    }

    /// Parse an `application/json` request body.
    pub fn read_graphql_request(&self, body: &str) -> Result<GraphQLRequest, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Parse a JSON-encoded variables object.
    ///
    /// Fails if the text is not valid JSON or not a JSON object.
    pub fn deserialize_variables(&self, text: &str) -> Result<Variables, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Parse optional variables text; absent text yields an empty map.
    pub fn convert_variables(&self, text: Option<&str>) -> Result<Variables, serde_json::Error> {
        match text {
            Some(text) => self.deserialize_variables(text),
            None => Ok(Variables::new()),
        }
    }
}
