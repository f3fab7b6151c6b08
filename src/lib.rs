// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Deep Thoughts: a small social network of short posts.
//!
//! Users sign up, post thoughts, react to other users' thoughts and keep a
//! friend list. Everything is exposed through one GraphQL endpoint; the
//! caller's identity comes from a signed bearer token.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use schema::AppSchema;
use services::CredentialService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub credentials: CredentialService,
    pub schema: AppSchema,
}

impl AppState {
    /// Wire the schema to the given database and credential service.
    pub fn new(config: Config, db: Database) -> Self {
        let credentials = CredentialService::new(&config.jwt_signing_key, config.token_ttl);
        let schema = schema::build_schema(db.clone(), credentials.clone());
        Self {
            config,
            db,
            credentials,
            schema,
        }
    }
}
