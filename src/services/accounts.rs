// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account operations: signup, login, profile and friends.

use validator::Validate;

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{SignupInput, User};
use crate::services::credentials::{CredentialService, IdentityClaims};
use crate::services::password::{hash_password_async, verify_password_async};

/// A freshly issued credential and the user it identifies.
#[derive(Debug, Clone)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

fn issue_for(credentials: &CredentialService, user: User) -> Result<AuthPayload> {
    let token = credentials.issue(&IdentityClaims::from(&user))?;
    Ok(AuthPayload { token, user })
}

/// Register a new user and log them in.
pub async fn signup(
    db: &Database,
    credentials: &CredentialService,
    username: &str,
    email: &str,
    password: &str,
) -> Result<AuthPayload> {
    let input = SignupInput::new(username, email, password);
    input.validate()?;

    let SignupInput {
        username,
        email,
        password,
    } = input;

    let password = hash_password_async(password).await?;
    let user = User::new(username, email, password);
    db.create_user(&user).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User signed up");

    issue_for(credentials, user)
}

/// Exchange email and password for a credential.
///
/// The email is matched exactly as given. An unknown email and a wrong
/// password fail identically.
pub async fn login(
    db: &Database,
    credentials: &CredentialService,
    email: &str,
    password: &str,
) -> Result<AuthPayload> {
    let Some(user) = db.find_user_by_email(email).await? else {
        tracing::info!("Login rejected");
        return Err(AppError::InvalidCredentials);
    };

    let matches = verify_password_async(user.password_hash().clone(), password.to_string()).await?;
    if !matches {
        tracing::info!("Login rejected");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "User logged in");

    issue_for(credentials, user)
}

/// The acting user's current record, if it still exists.
pub async fn me(db: &Database, identity: &IdentityClaims) -> Result<Option<User>> {
    db.get_user(&identity.id).await
}

/// Add `friend_id` to the acting user's friends.
///
/// One-directional, idempotent, and not checked against the friend's
/// existence or against the acting user's own ID.
pub async fn add_friend(
    db: &Database,
    identity: &IdentityClaims,
    friend_id: &str,
) -> Result<Option<User>> {
    let updated = db.add_friend(&identity.id, friend_id).await?;

    tracing::debug!(
        user_id = %identity.id,
        friend_id,
        found = updated.is_some(),
        "Friend added"
    );

    Ok(updated)
}
