// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Loose email shape check: something, `@`, something, `.`, something.
pub static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".+@.+\..+").expect("email pattern is a valid regex"));

/// An argon2 PHC string.
///
/// Only `services::password::hash_password` produces new values, so a
/// `User` can never hold a raw password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub(crate) fn from_phc(phc: String) -> Self {
        Self(phc)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HashedPassword(..)")
    }
}

/// User document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document ID (UUID v4)
    #[serde(rename = "_id")]
    pub id: String,
    /// Unique, trimmed
    pub username: String,
    /// Unique
    pub email: String,
    /// Password hash, computed once at creation
    password: HashedPassword,
    /// IDs of thoughts authored by this user, oldest first
    #[serde(default)]
    pub thoughts: Vec<String>,
    /// IDs of befriended users (no duplicates)
    #[serde(default)]
    pub friends: Vec<String>,
}

impl User {
    /// Build a new user with a fresh ID.
    pub fn new(username: String, email: String, password: HashedPassword) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username,
            email,
            password,
            thoughts: Vec::new(),
            friends: Vec::new(),
        }
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }

    /// Add a friend with set semantics. Returns `false` if already present.
    pub fn add_friend(&mut self, friend_id: &str) -> bool {
        if self.friends.iter().any(|id| id == friend_id) {
            return false;
        }
        self.friends.push(friend_id.to_string());
        true
    }
}

/// Signup arguments, validated before anything is hashed or stored.
#[derive(Clone, Validate)]
pub struct SignupInput {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(regex(path = *EMAIL_PATTERN, message = "Must match an email address!"))]
    pub email: String,
    #[validate(length(min = 5, message = "Password must be at least 5 characters"))]
    pub password: String,
}

impl SignupInput {
    /// Normalize fields the way they are stored (username is trimmed).
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }
}
