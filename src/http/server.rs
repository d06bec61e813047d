//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router serving the GraphQL endpoint
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{AdapterConfig, GraphQLConfig};
use crate::graphql::{
    DefaultInvocationInputFactory, GraphQLInvoker, GraphQLObjectMapper, InvocationInputFactory,
};
use crate::http::handler::{graphql_get, graphql_post};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::ShutdownSignal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Execution engine shared by all requests.
    pub invoker: Arc<dyn GraphQLInvoker>,
    /// Builds engine inputs from normalized operations.
    pub input_factory: Arc<dyn InvocationInputFactory>,
    /// Reads JSON bodies and variables.
    pub object_mapper: GraphQLObjectMapper,
    /// Endpoint settings.
    pub graphql_config: GraphQLConfig,
}

/// HTTP server exposing one GraphQL endpoint.
pub struct HttpServer {
    router: Router,
    config: AdapterConfig,
}

impl HttpServer {
    /// Create a server that passes operations to `invoker` unchanged.
    pub fn new<I>(config: AdapterConfig, invoker: I) -> Self
    where
        I: GraphQLInvoker + 'static,
    {
        Self::with_input_factory(config, invoker, DefaultInvocationInputFactory)
    }

    /// Create a server with a custom invocation input factory.
    pub fn with_input_factory<I, F>(config: AdapterConfig, invoker: I, input_factory: F) -> Self
    where
        I: GraphQLInvoker + 'static,
        F: InvocationInputFactory + 'static,
    {
        let state = AppState {
            invoker: Arc::new(invoker),
            input_factory: Arc::new(input_factory),
            object_mapper: GraphQLObjectMapper::new(),
            graphql_config: config.graphql.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &AdapterConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.graphql.path, get(graphql_get).post(graphql_post))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, e.g. for in-process requests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.graphql.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
