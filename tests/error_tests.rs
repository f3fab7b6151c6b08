// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use deep_thoughts::error::AppError;

fn graphql_json(err: AppError) -> serde_json::Value {
    let server_error = err
        .into_graphql()
        .into_server_error(async_graphql::Pos::default());
    serde_json::to_value(server_error).unwrap()
}

#[test]
fn test_error_codes() {
    assert_eq!(AppError::Unauthorized.code(), "UNAUTHENTICATED");
    assert_eq!(AppError::InvalidCredentials.code(), "UNAUTHENTICATED");
    assert_eq!(AppError::BadRequest("x".into()).code(), "BAD_USER_INPUT");
    assert_eq!(
        AppError::Duplicate {
            field: "username",
            value: "alice".into()
        }
        .code(),
        "BAD_USER_INPUT"
    );
    assert_eq!(AppError::Database("x".into()).code(), "INTERNAL_SERVER_ERROR");
}

#[test]
fn test_graphql_error_carries_code() {
    let json = graphql_json(AppError::Unauthorized);
    assert_eq!(json["message"], "You need to be logged in!");
    assert_eq!(json["extensions"]["code"], "UNAUTHENTICATED");
}

#[test]
fn test_internal_details_not_leaked() {
    let json = graphql_json(AppError::Database("connection refused to 10.0.0.7".into()));
    assert_eq!(json["message"], "Database error");
    assert_eq!(json["extensions"]["code"], "INTERNAL_SERVER_ERROR");

    let json = graphql_json(AppError::Internal(anyhow::anyhow!("hash failure")));
    assert_eq!(json["message"], "Internal server error");
}

#[test]
fn test_duplicate_message_names_field() {
    let json = graphql_json(AppError::Duplicate {
        field: "email",
        value: "a@a.com".into(),
    });
    assert!(json["message"].as_str().unwrap().contains("email"));
}

#[test]
fn test_http_statuses() {
    assert_eq!(
        AppError::BadRequest("bad".into()).into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::Unauthorized.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::Duplicate {
            field: "username",
            value: "alice".into()
        }
        .into_response()
        .status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        AppError::Database("down".into()).into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
