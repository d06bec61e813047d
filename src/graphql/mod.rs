//! GraphQL collaborator boundary.
//!
//! # Data Flow
//! ```text
//! normalized (query, operationName, variables)
//!     → invocation.rs (InvocationInputFactory builds the engine input)
//!     → invoker.rs (GraphQLInvoker executes asynchronously)
//!     → result.rs (ExecutionResult → specification-form JSON)
//! ```
//!
//! # Design Decisions
//! - No parsing, validation or execution lives here; the engine owns all of it
//! - Collaborators are `Send + Sync` and shared read-only across requests
//! - `request.rs` owns the JSON shapes accepted on the wire

pub mod engine;
pub mod invocation;
pub mod invoker;
pub mod request;
pub mod result;

pub use invocation::{DefaultInvocationInputFactory, GraphQLInvocationInput, InvocationInputFactory};
pub use invoker::GraphQLInvoker;
pub use request::{GraphQLObjectMapper, GraphQLRequest, Variables};
pub use result::{ExecutionResult, GraphQLError, SourceLocation};
