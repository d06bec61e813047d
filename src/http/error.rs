//! Client-facing rejections raised before dispatch.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Reasons a request is rejected before it reaches the engine.
#[derive(Debug, Error)]
pub enum GraphQLHttpError {
    /// POST request matching none of the supported shapes.
    #[error("Could not process GraphQL request")]
    UnprocessableRequest,

    /// `application/json` body that is not a GraphQL request object.
    #[error("Malformed GraphQL request body: {0}")]
    MalformedRequestBody(#[source] serde_json::Error),

    /// `variables` text that is not a JSON object.
    #[error("Malformed GraphQL variables: {0}")]
    MalformedVariables(#[source] serde_json::Error),

    /// Request body read as text that is not valid UTF-8.
    #[error("GraphQL request body is not valid UTF-8: {0}")]
    InvalidBodyEncoding(#[source] std::str::Utf8Error),

    /// GET request without a `query` parameter.
    #[error("Missing required query parameter 'query'")]
    MissingQuery,
}

impl GraphQLHttpError {
    /// HTTP status for this rejection.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GraphQLHttpError::UnprocessableRequest => StatusCode::UNPROCESSABLE_ENTITY,
            GraphQLHttpError::MalformedRequestBody(_)
            | GraphQLHttpError::MalformedVariables(_)
            | GraphQLHttpError::InvalidBodyEncoding(_)
            | GraphQLHttpError::MissingQuery => StatusCode::BAD_REQUEST,
        }
    }

    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            GraphQLHttpError::UnprocessableRequest => "unprocessable",
            GraphQLHttpError::MalformedRequestBody(_) => "malformed_body",
            GraphQLHttpError::MalformedVariables(_) => "malformed_variables",
            GraphQLHttpError::InvalidBodyEncoding(_) => "invalid_encoding",
            GraphQLHttpError::MissingQuery => "missing_query",
        }
    }
}

impl IntoResponse for GraphQLHttpError {
    fn into_response(self) -> Response {
        let body = json!({
            "errors": [{ "message": self.to_string() }]
        });
        (self.status_code(), Json(body)).into_response()
    }
}
