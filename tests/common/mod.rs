// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use deep_thoughts::config::Config;
use deep_thoughts::db::{Database, FirestoreDb};
use deep_thoughts::routes::create_router;
use deep_thoughts::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by a fresh in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::default(), Database::in_memory()));
    (create_router(state.clone()), state)
}

/// Where a request carries its credential.
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum Token<'a> {
    None,
    Body(&'a str),
    Query(&'a str),
    Header(&'a str),
}

/// POST a GraphQL operation and return the status and decoded body.
#[allow(dead_code)]
pub async fn graphql(
    app: &axum::Router,
    query: &str,
    variables: Value,
    token: Token<'_>,
) -> (StatusCode, Value) {
    let mut body = json!({ "query": query, "variables": variables });
    let mut uri = "/graphql".to_string();
    let mut request = Request::builder()
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json");

    match token {
        Token::None => {}
        Token::Body(token) => body["token"] = json!(token),
        Token::Query(token) => uri = format!("/graphql?token={}", urlencoding::encode(token)),
        Token::Header(token) => {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token))
        }
    }

    let response = app
        .clone()
        .oneshot(
            request
                .uri(uri)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// First error's `extensions.code`, if any.
#[allow(dead_code)]
pub fn error_code(body: &Value) -> Option<&str> {
    body["errors"][0]["extensions"]["code"].as_str()
}

/// Sign up through the API. Returns the credential and the new user's ID.
#[allow(dead_code)]
pub async fn sign_up(app: &axum::Router, username: &str, password: &str) -> (String, String) {
    let (status, body) = graphql(
        app,
        "mutation AddUser($username: String!, $email: String!, $password: String!) {
            addUser(username: $username, email: $email, password: $password) {
                token
                user { _id username }
            }
        }",
        json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": password,
        }),
        Token::None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["errors"].is_null(), "signup failed: {}", body);

    let auth = &body["data"]["addUser"];
    (
        auth["token"].as_str().unwrap().to_string(),
        auth["user"]["_id"].as_str().unwrap().to_string(),
    )
}

/// Post a thought as the credential's owner. Returns the thought ID.
#[allow(dead_code)]
pub async fn post_thought(app: &axum::Router, token: &str, text: &str) -> String {
    let (_, body) = graphql(
        app,
        "mutation AddThought($text: String!) { addThought(thoughtText: $text) { _id } }",
        json!({ "text": text }),
        Token::Header(token),
    )
    .await;

    assert!(body["errors"].is_null(), "addThought failed: {}", body);
    body["data"]["addThought"]["_id"]
        .as_str()
        .unwrap()
        .to_string()
}
