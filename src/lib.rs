//! HTTP-to-GraphQL adapter library.
//!
//! Accepts GraphQL-over-HTTP GET and POST requests, normalizes them into one
//! `(query, operationName, variables)` operation and hands it to a
//! [`GraphQLInvoker`](graphql::GraphQLInvoker).

pub mod config;
pub mod graphql;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::AdapterConfig;
pub use graphql::{ExecutionResult, GraphQLInvoker, GraphQLRequest};
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
