//! GraphQL HTTP adapter
//!
//! Serves a GraphQL endpoint over HTTP using Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────┐    ┌────────────┐    ┌──────────────────┐
//!     ───────────────────▶│   http   │───▶│  handler   │───▶│ InvocationInput  │
//!                         │  server  │    │ normalize  │    │     Factory      │
//!                         └──────────┘    └────────────┘    └────────┬─────────┘
//!                                                                    ▼
//!     Client Response     ┌──────────┐    ┌────────────┐    ┌──────────────────┐
//!     ◀───────────────────│   JSON   │◀───│ Execution  │◀───│  GraphQLInvoker  │
//!                         │ response │    │   Result   │    │     (engine)     │
//!                         └──────────┘    └────────────┘    └──────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema, SimpleObject};
use clap::Parser;
use tokio::net::TcpListener;

use graphql_http_adapter::config::validation::validate_config;
use graphql_http_adapter::config::{load_config, AdapterConfig, ConfigError};
use graphql_http_adapter::lifecycle::signals::wait_for_signal;
use graphql_http_adapter::observability::{logging, metrics};
use graphql_http_adapter::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "graphql-http-adapter")]
#[command(about = "Serve a GraphQL endpoint over HTTP", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[derive(SimpleObject)]
struct Viewer {
    name: String,
}

struct Query;

#[Object]
impl Query {
    /// The caller. Authentication is not handled here, so always anonymous.
    async fn me(&self) -> Viewer {
        Viewer {
            name: "anonymous".to_string(),
        }
    }

    /// Adapter version.
    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AdapterConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("graphql-http-adapter v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        path = %config.graphql.path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let schema = Schema::new(Query, EmptyMutation, EmptySubscription);
    let server = HttpServer::new(config, schema);

    let shutdown = Shutdown::new();
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_signal().await;
    shutdown.trigger();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
