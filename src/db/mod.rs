// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! [`Database`] fronts one of two backends with the same operations:
//! Firestore for deployments and an in-memory store for local runs and
//! tests.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use crate::models::{Reaction, Thought, User};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const THOUGHTS: &str = "thoughts";
    /// Username reservations (keyed by encoded username)
    pub const USERNAMES: &str = "usernames";
    /// Email reservations (keyed by encoded email)
    pub const EMAILS: &str = "emails";
}

/// Persistence handle shared by all requests.
#[derive(Clone)]
pub enum Database {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

macro_rules! dispatch {
    ($self:ident, $db:ident => $call:expr) => {
        match $self {
            Database::Firestore($db) => $call.await,
            Database::Memory($db) => $call.await,
        }
    };
}

impl Database {
    /// Connect to the backend selected in `config`.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.store_backend {
            StoreBackend::Firestore => Ok(Self::Firestore(
                FirestoreDb::new(&config.gcp_project_id).await?,
            )),
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                Ok(Self::Memory(MemoryDb::new()))
            }
        }
    }

    /// Fresh empty in-memory database.
    pub fn in_memory() -> Self {
        Self::Memory(MemoryDb::new())
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        dispatch!(self, db => db.list_users())
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        dispatch!(self, db => db.get_user(id))
    }

    /// Populate a list of user references, keeping their order.
    pub async fn get_users(&self, ids: &[String]) -> Result<Vec<User>, AppError> {
        dispatch!(self, db => db.get_users(ids))
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        dispatch!(self, db => db.find_user_by_username(username))
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        dispatch!(self, db => db.find_user_by_email(email))
    }

    /// Insert a user. Fails with [`AppError::Duplicate`] on a taken username or email.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        dispatch!(self, db => db.create_user(user))
    }

    pub async fn add_friend(&self, user_id: &str, friend_id: &str) -> Result<Option<User>, AppError> {
        dispatch!(self, db => db.add_friend(user_id, friend_id))
    }

    // ─── Thought Operations ──────────────────────────────────────

    pub async fn list_thoughts(&self, username: Option<&str>) -> Result<Vec<Thought>, AppError> {
        dispatch!(self, db => db.list_thoughts(username))
    }

    pub async fn get_thought(&self, id: &str) -> Result<Option<Thought>, AppError> {
        dispatch!(self, db => db.get_thought(id))
    }

    /// Populate a list of thought references, keeping their order.
    pub async fn get_thoughts(&self, ids: &[String]) -> Result<Vec<Thought>, AppError> {
        dispatch!(self, db => db.get_thoughts(ids))
    }

    pub async fn create_thought(&self, author_id: &str, thought: &Thought) -> Result<(), AppError> {
        dispatch!(self, db => db.create_thought(author_id, thought))
    }

    pub async fn push_reaction(
        &self,
        thought_id: &str,
        reaction: &Reaction,
    ) -> Result<Option<Thought>, AppError> {
        dispatch!(self, db => db.push_reaction(thought_id, reaction))
    }
}
