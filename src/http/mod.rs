//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign / propagate request ID)
//!     → handler.rs (normalize GET/POST, dispatch to the engine)
//!     → error.rs (rejections before dispatch)
//!     → JSON response
//! ```

pub mod error;
pub mod handler;
pub mod request;
pub mod server;

pub use error::GraphQLHttpError;
pub use handler::{GraphQLQueryParams, ParseStrategy};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
