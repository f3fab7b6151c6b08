// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GraphQL schema: object types plus the query and mutation roots.

pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{Context, EmptySubscription, Schema};

use crate::db::Database;
use crate::error::AppError;
use crate::middleware::auth::{require_identity, RequestContext};
use crate::services::{CredentialService, IdentityClaims};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// Nested selections (friends of friends of ...) are cut off past this depth.
const MAX_QUERY_DEPTH: usize = 12;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

static ANONYMOUS: RequestContext = RequestContext::anonymous();

/// Build the schema with its process-wide collaborators.
///
/// The per-request [`RequestContext`] is attached to each request, not here.
pub fn build_schema(db: Database, credentials: CredentialService) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .data(credentials)
        .limit_depth(MAX_QUERY_DEPTH)
        .finish()
}

pub(crate) fn database<'c>(ctx: &'c Context<'_>) -> async_graphql::Result<&'c Database> {
    ctx.data::<Database>()
}

pub(crate) fn credentials<'c>(ctx: &'c Context<'_>) -> async_graphql::Result<&'c CredentialService> {
    ctx.data::<CredentialService>()
}

/// The authorization gate as seen from a resolver.
///
/// A request executed without a context is treated as anonymous.
pub(crate) fn acting_identity<'c>(ctx: &'c Context<'_>) -> async_graphql::Result<&'c IdentityClaims> {
    let request_context = ctx.data_opt::<RequestContext>().unwrap_or(&ANONYMOUS);
    require_identity(request_context).map_err(AppError::into_graphql)
}

/// SDL of the schema, for clients and snapshot checks.
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}
