//! `async-graphql` backed engine.
//!
//! Any [`async_graphql::Schema`] can be served directly by the HTTP adapter.

use async_graphql::{ObjectType, Schema, SubscriptionType};
use async_trait::async_trait;
use serde_json::Value;

use crate::graphql::invocation::GraphQLInvocationInput;
use crate::graphql::invoker::GraphQLInvoker;
use crate::graphql::result::{ExecutionResult, GraphQLError};

/// Correlation id of the HTTP request, available to resolvers via
/// `ctx.data_opt::<HttpRequestId>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequestId(pub String);

#[async_trait]
impl<Query, Mutation, Subscription> GraphQLInvoker for Schema<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    async fn execute_async(&self, input: GraphQLInvocationInput) -> ExecutionResult {
        let mut request = async_graphql::Request::new(input.query).variables(
            async_graphql::Variables::from_json(Value::Object(input.variables)),
        );
        if let Some(operation_name) = input.operation_name {
            request = request.operation_name(operation_name);
        }
        if let Some(request_id) = input.request_id {
            request = request.data(HttpRequestId(request_id));
        }

        self.execute(request).await.into()
    }
}

impl From<async_graphql::Response> for ExecutionResult {
    fn from(response: async_graphql::Response) -> Self {
        let errors: Vec<GraphQLError> = response
            .errors
            .into_iter()
            .map(|error| {
                serde_json::to_value(&error)
                    .and_then(serde_json::from_value)
                    .unwrap_or_else(|_| GraphQLError::new(error.message))
            })
            .collect();

        // Null data with only pathless errors is a request error: the
        // operation never started executing, so `data` is not present.
        let request_error = !errors.is_empty() && errors.iter().all(|e| e.path.is_empty());
        let data = match response.data.into_json() {
            Ok(Value::Null) if request_error => None,
            Ok(data) => Some(data),
            Err(e) => {
                tracing::error!(error = %e, "Engine returned data that is not valid JSON");
                None
            }
        };

        let extensions = if response.extensions.is_empty() {
            None
        } else {
            match serde_json::to_value(&response.extensions) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            }
        };

        ExecutionResult {
            data,
            errors,
            extensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Context, EmptyMutation, EmptySubscription, Object};
    use serde_json::json;

    use crate::graphql::request::Variables;

    struct Query;

    #[Object]
    impl Query {
        async fn greet(&self, name: String) -> String {
            format!("hello {name}")
        }

        async fn request_id(&self, ctx: &Context<'_>) -> Option<String> {
            ctx.data_opt::<HttpRequestId>().map(|id| id.0.clone())
        }

        async fn fail(&self) -> async_graphql::Result<String> {
            Err(async_graphql::Error::new("resolver boom"))
        }
    }

    fn schema() -> Schema<Query, EmptyMutation, EmptySubscription> {
        Schema::new(Query, EmptyMutation, EmptySubscription)
    }

    fn input(query: &str, operation_name: Option<&str>, variables: Value) -> GraphQLInvocationInput {
        let variables: Variables = match variables {
            Value::Object(map) => map,
            _ => Variables::new(),
        };
        GraphQLInvocationInput {
            query: query.to_string(),
            operation_name: operation_name.map(str::to_string),
            variables,
            request_id: None,
        }
    }

    #[tokio::test]
    async fn test_executes_with_variables() {
        let result = schema()
            .execute_async(input(
                "query Greet($name: String!) { greet(name: $name) }",
                Some("Greet"),
                json!({"name": "Leia"}),
            ))
            .await;

        assert!(result.errors.is_empty());
        assert_eq!(result.to_specification(), json!({"data": {"greet": "hello Leia"}}));
    }

    #[tokio::test]
    async fn test_selects_named_operation() {
        let document = "query A { greet(name: \"a\") } query B { greet(name: \"b\") }";
        let result = schema()
            .execute_async(input(document, Some("B"), json!({})))
            .await;
        assert_eq!(result.data, Some(json!({"greet": "hello b"})));
    }

    #[tokio::test]
    async fn test_invalid_document_has_errors_and_no_data() {
        let result = schema()
            .execute_async(input("{ missingField }", None, json!({})))
            .await;

        assert!(!result.is_data_present());
        assert_eq!(result.errors.len(), 1);
        let response = result.to_specification();
        assert!(response.get("data").is_none());
        assert!(response["errors"][0]["message"].is_string());
    }

    #[tokio::test]
    async fn test_resolver_error_keeps_null_data() {
        let result = schema()
            .execute_async(input("{ fail }", None, json!({})))
            .await;

        assert!(result.is_data_present());
        let response = result.to_specification();
        assert_eq!(response.get("data"), Some(&Value::Null));
        assert_eq!(response["errors"][0]["message"], "resolver boom");
        assert_eq!(response["errors"][0]["path"], json!(["fail"]));
    }

    #[tokio::test]
    async fn test_request_id_reaches_resolvers() {
        let result = schema()
            .execute_async(input("{ requestId }", None, json!({})).with_request_id("req-1"))
            .await;
        assert_eq!(result.data, Some(json!({"requestId": "req-1"})));
    }
}
