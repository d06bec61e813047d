//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use graphql_http_adapter::config::AdapterConfig;
use graphql_http_adapter::graphql::{
    ExecutionResult, GraphQLInvocationInput, GraphQLInvoker,
};
use graphql_http_adapter::{HttpServer, Shutdown};
use serde_json::json;
use tokio::net::TcpListener;

/// Engine double that records every input and echoes it back as `data`.
#[derive(Clone, Default)]
pub struct RecordingInvoker {
    calls: Arc<Mutex<Vec<GraphQLInvocationInput>>>,
}

impl RecordingInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<GraphQLInvocationInput> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<GraphQLInvocationInput> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GraphQLInvoker for RecordingInvoker {
    async fn execute_async(&self, input: GraphQLInvocationInput) -> ExecutionResult {
        self.calls.lock().unwrap().push(input.clone());
        ExecutionResult::from_data(json!({
            "query": input.query,
            "operationName": input.operation_name,
            "variables": input.variables,
        }))
    }
}

/// Start a server on an ephemeral port and return its address.
pub async fn start_server<I>(config: AdapterConfig, invoker: I, shutdown: &Shutdown) -> SocketAddr
where
    I: GraphQLInvoker + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config, invoker);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    addr
}
