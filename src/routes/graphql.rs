// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GraphQL endpoint.
//!
//! POST bodies are parsed once as JSON so the credential can be looked up
//! in their `token` field before the remainder is handed to the schema.
//! GET carries the operation in the query string and may only read.

use crate::error::{AppError, Result};
use crate::middleware::auth::build_request_context;
use crate::AppState;
use async_graphql::parser::types::{DocumentOperations, OperationType};
use async_graphql::Variables;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/graphql", get(graphql_get_handler).post(graphql_handler))
}

#[derive(Debug, Default, Deserialize)]
pub struct TokenParams {
    pub token: Option<String>,
}

/// Query-string form of a GraphQL request.
#[derive(Debug, Deserialize)]
pub struct GetParams {
    pub query: String,
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,
    /// JSON-encoded variables object
    pub variables: Option<String>,
    pub token: Option<String>,
}

async fn graphql_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TokenParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<async_graphql::Response>> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Body is not valid JSON: {}", e)))?;

    let context = build_request_context(
        &state.credentials,
        Some(&payload),
        params.token.as_deref(),
        &headers,
    );

    let request: async_graphql::Request = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("Not a GraphQL request: {}", e)))?;

    if let Some(operation) = request.operation_name.as_deref() {
        tracing::debug!(operation, "GraphQL request");
    }

    let response = state.schema.execute(request.data(context)).await;
    Ok(Json(response))
}

async fn graphql_get_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GetParams>,
    headers: HeaderMap,
) -> Result<Json<async_graphql::Response>> {
    if contains_mutation(&params.query) {
        return Err(AppError::BadRequest(
            "Mutations must be sent with POST".to_string(),
        ));
    }

    let context = build_request_context(&state.credentials, None, params.token.as_deref(), &headers);

    let mut request = async_graphql::Request::new(params.query);
    if let Some(name) = params.operation_name {
        request = request.operation_name(name);
    }
    if let Some(raw) = params.variables.filter(|v| !v.is_empty()) {
        let variables: Value = serde_json::from_str(&raw)
            .map_err(|e| AppError::BadRequest(format!("Variables are not valid JSON: {}", e)))?;
        request = request.variables(Variables::from_json(variables));
    }

    let response = state.schema.execute(request.data(context)).await;
    Ok(Json(response))
}

/// Whether the document defines a mutation. Unparseable documents are left
/// for the schema to reject.
fn contains_mutation(query: &str) -> bool {
    let Ok(document) = async_graphql::parser::parse_query(query) else {
        return false;
    };

    match &document.operations {
        DocumentOperations::Single(op) => matches!(op.node.ty, OperationType::Mutation),
        DocumentOperations::Multiple(ops) => {
            ops.values().any(|op| matches!(op.node.ty, OperationType::Mutation))
        }
    }
}
