// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-request identity and the authorization gate.
//!
//! Every request gets exactly one [`RequestContext`]. Building it never
//! fails: a missing or bad credential simply yields a context without an
//! identity. Operations that need a user call [`require_identity`].

use axum::http::{header, HeaderMap};
use serde_json::Value;

use crate::error::AppError;
use crate::services::credentials::{CredentialService, IdentityClaims};

/// Ephemeral per-request context. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    identity: Option<IdentityClaims>,
}

impl RequestContext {
    /// Context for an anonymous request.
    pub const fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn with_identity(identity: IdentityClaims) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&IdentityClaims> {
        self.identity.as_ref()
    }
}

/// Fail with [`AppError::Unauthorized`] unless the context carries an identity.
pub fn require_identity(context: &RequestContext) -> Result<&IdentityClaims, AppError> {
    context.identity().ok_or(AppError::Unauthorized)
}

/// Locate a credential: body `token`, then query `token`, then `Authorization`.
///
/// Empty values count as absent. For the header, the token is whatever
/// follows the last space, trimmed, so `Bearer <token>` and a bare token
/// both work.
pub fn extract_token(
    body: Option<&Value>,
    query_token: Option<&str>,
    headers: &HeaderMap,
) -> Option<String> {
    if let Some(token) = body
        .and_then(|b| b.get("token"))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
    {
        return Some(token.to_string());
    }

    if let Some(token) = query_token.filter(|t| !t.is_empty()) {
        return Some(token.to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.rsplit(' ').next())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Build the request context from the request's credential, if any.
pub fn build_request_context(
    credentials: &CredentialService,
    body: Option<&Value>,
    query_token: Option<&str>,
    headers: &HeaderMap,
) -> RequestContext {
    let Some(token) = extract_token(body, query_token, headers) else {
        return RequestContext::anonymous();
    };

    match credentials.verify(&token) {
        Some(identity) => {
            tracing::debug!(username = %identity.username, "Request authenticated");
            RequestContext::with_identity(identity)
        }
        None => {
            tracing::info!("Invalid token");
            RequestContext::anonymous()
        }
    }
}
