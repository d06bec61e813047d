//! Invocation inputs handed to the execution engine.

use crate::graphql::request::{GraphQLRequest, Variables};

/// A single operation as submitted to a [`GraphQLInvoker`](crate::graphql::GraphQLInvoker).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphQLInvocationInput {
    /// Operation document, never null.
    pub query: String,
    /// Selected operation, if any.
    pub operation_name: Option<String>,
    /// Variable bindings.
    pub variables: Variables,
    /// Correlation id of the HTTP request that produced this input.
    pub request_id: Option<String>,
}

impl GraphQLInvocationInput {
    /// Attach the HTTP request id.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl From<GraphQLRequest> for GraphQLInvocationInput {
    fn from(request: GraphQLRequest) -> Self {
        let (query, operation_name, variables) = request.into_parts();
        Self {
            query,
            operation_name,
            variables,
            request_id: None,
        }
    }
}

/// Builds engine inputs from normalized operations.
///
/// Implementations can enrich or rewrite the operation before execution.
pub trait InvocationInputFactory: Send + Sync {
    /// Create the engine input for one operation.
    fn create(
        &self,
        query: String,
        operation_name: Option<String>,
        variables: Variables,
    ) -> GraphQLInvocationInput;
}

/// Passes the operation through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInvocationInputFactory;

impl InvocationInputFactory for DefaultInvocationInputFactory {
    fn create(
        &self,
        query: String,
        operation_name: Option<String>,
        variables: Variables,
    ) -> GraphQLInvocationInput {
        GraphQLRequest::new(query, operation_name, variables).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_factory_passes_through() {
        let mut variables = Variables::new();
        variables.insert("id".into(), json!(1));

        let input = DefaultInvocationInputFactory.create(
            "query Q($id: Int) { node(id: $id) }".into(),
            Some("Q".into()),
            variables.clone(),
        );

        assert_eq!(input.query, "query Q($id: Int) { node(id: $id) }");
        assert_eq!(input.operation_name.as_deref(), Some("Q"));
        assert_eq!(input.variables, variables);
        assert_eq!(input.request_id, None);

        let input = input.with_request_id("abc");
        assert_eq!(input.request_id.as_deref(), Some("abc"));
    }
}
