//! GraphQL endpoint handlers: request normalization and dispatch.
//!
//! # Responsibilities
//! - Turn a GET or POST request into one canonical [`GraphQLRequest`]
//! - Reject requests matching no supported shape
//! - Hand the operation to the engine and serialize its result
//!
//! # POST precedence (first match wins)
//! 1. `Content-Type: application/json` → body is a JSON request object
//! 2. `query` query-string parameter present → handled like GET
//! 3. `Content-Type: application/graphql` → body is the query document
//! 4. otherwise → 422 Unprocessable Entity
//!
//! GET always reads the query string.
//!
//! The query string and body are read leniently and decoded only by the rule
//! that uses them, so a part the selected rule ignores never rejects a request.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use url::form_urlencoded;

use crate::graphql::{GraphQLObjectMapper, GraphQLRequest, Variables};
use crate::http::error::GraphQLHttpError;
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Media type of a JSON-encoded GraphQL request body.
pub const APPLICATION_JSON: &str = "application/json";

/// Media type of a raw GraphQL document body.
pub const APPLICATION_GRAPHQL: &str = "application/graphql";

/// Query-string parameters recognised on the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphQLQueryParams {
    pub query: Option<String>,
    pub operation_name: Option<String>,
    /// JSON-encoded variables object.
    pub variables: Option<String>,
}

impl GraphQLQueryParams {
    /// Read the recognised parameters from a raw query string.
    ///
    /// A repeated parameter keeps its first value; unknown parameters are
    /// ignored. Decoding is lossy and never fails.
    pub fn from_query_string(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(raw) = raw else {
            return params;
        };

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "query" => &mut params.query,
                "operationName" => &mut params.operation_name,
                "variables" => &mut params.variables,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// Where the operation was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// `application/json` request body.
    JsonBody,
    /// `query`, `operationName` and `variables` query-string parameters.
    QueryString,
    /// Raw `application/graphql` body.
    GraphQLBody,
}

impl ParseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStrategy::JsonBody => "json_body",
            ParseStrategy::QueryString => "query_string",
            ParseStrategy::GraphQLBody => "graphql_body",
        }
    }
}

/// Compare a `Content-Type` header against a media type.
///
/// Strict matching requires the exact header value. Lenient matching
/// compares only the media-type essence, ignoring parameters and case.
pub fn content_type_is(content_type: Option<&str>, expected: &str, lenient: bool) -> bool {
    match content_type {
        None => false,
        Some(value) if lenient => value
            .split(';')
            .next()
            .map(str::trim)
            .is_some_and(|essence| essence.eq_ignore_ascii_case(expected)),
        Some(value) => value == expected,
    }
}

/// Pick the POST parsing strategy. `None` means the request is unprocessable.
pub fn select_post_strategy(
    content_type: Option<&str>,
    params: &GraphQLQueryParams,
    lenient: bool,
) -> Option<ParseStrategy> {
    if content_type_is(content_type, APPLICATION_JSON, lenient) {
        return Some(ParseStrategy::JsonBody);
    }
    if params.query.is_some() {
        return Some(ParseStrategy::QueryString);
    }
    if content_type_is(content_type, APPLICATION_GRAPHQL, lenient) {
        return Some(ParseStrategy::GraphQLBody);
    }
    None
}

/// Normalize a POST request into its strategy and operation.
pub fn normalize_post(
    mapper: &GraphQLObjectMapper,
    content_type: Option<&str>,
    params: GraphQLQueryParams,
    body: Bytes,
    lenient: bool,
) -> Result<(ParseStrategy, GraphQLRequest), GraphQLHttpError> {
    let strategy = select_post_strategy(content_type, &params, lenient)
        .ok_or(GraphQLHttpError::UnprocessableRequest)?;

    let request = match strategy {
        ParseStrategy::JsonBody => mapper
            .read_graphql_request(body_text(&body)?)
            .map_err(GraphQLHttpError::MalformedRequestBody)?,
        ParseStrategy::QueryString => from_query_params(mapper, params)?,
        ParseStrategy::GraphQLBody => {
            GraphQLRequest::new(body_text(&body)?, None, Variables::new())
        }
    };

    Ok((strategy, request))
}

/// Normalize a GET request. `query` is mandatory.
pub fn normalize_get(
    mapper: &GraphQLObjectMapper,
    params: GraphQLQueryParams,
) -> Result<GraphQLRequest, GraphQLHttpError> {
    if params.query.is_none() {
        return Err(GraphQLHttpError::MissingQuery);
    }
    from_query_params(mapper, params)
}

fn body_text(body: &Bytes) -> Result<&str, GraphQLHttpError> {
    std::str::from_utf8(body).map_err(GraphQLHttpError::InvalidBodyEncoding)
}

fn from_query_params(
    mapper: &GraphQLObjectMapper,
    params: GraphQLQueryParams,
) -> Result<GraphQLRequest, GraphQLHttpError> {
    let variables = mapper
        .convert_variables(params.variables.as_deref())
        .map_err(GraphQLHttpError::MalformedVariables)?;
    Ok(GraphQLRequest::new(
        params.query.unwrap_or_default(),
        params.operation_name,
        variables,
    ))
}

/// Submit one operation to the engine and render the specification-form result.
pub async fn dispatch(state: &AppState, request: GraphQLRequest, request_id: Option<&str>) -> Value {
    let (query, operation_name, variables) = request.into_parts();
    let mut input = state.input_factory.create(query, operation_name, variables);
    if let Some(request_id) = request_id {
        input = input.with_request_id(request_id);
    }

    let result = state.invoker.execute_async(input).await;
    if !result.errors.is_empty() {
        tracing::debug!(
            request_id = request_id.unwrap_or("unknown"),
            errors = result.errors.len(),
            "Operation completed with errors"
        );
    }
    result.to_specification()
}

/// `POST <path>`
pub async fn graphql_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = headers.request_id();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let normalized = normalize_post(
        &state.object_mapper,
        content_type,
        GraphQLQueryParams::from_query_string(raw_query.as_deref()),
        body,
        state.graphql_config.lenient_content_type,
    );

    match normalized {
        Ok((strategy, request)) => {
            tracing::debug!(
                request_id = request_id.unwrap_or("unknown"),
                strategy = strategy.as_str(),
                operation_name = request.operation_name.as_deref().unwrap_or(""),
                "Dispatching GraphQL POST"
            );
            let response = dispatch(&state, request, request_id).await;
            metrics::record_request("POST", strategy.as_str(), 200, start_time);
            Json(response).into_response()
        }
        Err(e) => reject("POST", e, request_id, content_type, start_time),
    }
}

/// `GET <path>`
pub async fn graphql_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let start_time = Instant::now();
    let request_id = headers.request_id();
    let params = GraphQLQueryParams::from_query_string(raw_query.as_deref());

    match normalize_get(&state.object_mapper, params) {
        Ok(request) => {
            tracing::debug!(
                request_id = request_id.unwrap_or("unknown"),
                operation_name = request.operation_name.as_deref().unwrap_or(""),
                "Dispatching GraphQL GET"
            );
            let response = dispatch(&state, request, request_id).await;
            metrics::record_request("GET", ParseStrategy::QueryString.as_str(), 200, start_time);
            Json(response).into_response()
        }
        Err(e) => reject("GET", e, request_id, None, start_time),
    }
}

fn reject(
    method: &str,
    error: GraphQLHttpError,
    request_id: Option<&str>,
    content_type: Option<&str>,
    start_time: Instant,
) -> Response {
    tracing::warn!(
        request_id = request_id.unwrap_or("unknown"),
        method,
        content_type = content_type.unwrap_or(""),
        error = %error,
        "Rejected GraphQL request"
    );
    let status = error.status_code().as_u16();
    metrics::record_request(method, "none", status, start_time);
    metrics::record_rejection(method, error.reason(), status);
    error.into_response()
}
