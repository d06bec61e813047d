//! Execution engine seam.

use std::sync::Arc;

use async_trait::async_trait;

use crate::graphql::invocation::GraphQLInvocationInput;
use crate::graphql::result::ExecutionResult;

/// An asynchronous GraphQL execution engine.
///
/// Parse, validation and resolver failures are reported inside the returned
/// [`ExecutionResult`], never as a Rust error.
#[async_trait]
pub trait GraphQLInvoker: Send + Sync {
    /// Execute one operation. Resolves exactly once.
    async fn execute_async(&self, input: GraphQLInvocationInput) -> ExecutionResult;
}

#[async_trait]
impl<T> GraphQLInvoker for Arc<T>
where
    T: GraphQLInvoker + ?Sized,
{
    async fn execute_async(&self, input: GraphQLInvocationInput) -> ExecutionResult {
        (**self).execute_async(input).await
    }
}
