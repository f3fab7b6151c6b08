// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document collections.
//!
//! Used for local development (`STORE_BACKEND=memory`) and tests. Data lives
//! only as long as the process. Each operation takes the lock once, so
//! multi-document writes (thought + owning user) are applied together.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{Reaction, Thought, User};

#[derive(Default)]
struct Collections {
    /// Insertion order
    users: Vec<User>,
    /// Insertion order
    thoughts: Vec<Thought>,
}

/// Process-local database.
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.inner.read().await.users.clone())
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let data = self.inner.read().await;
        Ok(data.users.iter().find(|u| u.id == id).cloned())
    }

    /// Fetch users by ID, in the order given. Unknown IDs are skipped.
    pub async fn get_users(&self, ids: &[String]) -> Result<Vec<User>, AppError> {
        let data = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| data.users.iter().find(|u| &u.id == id).cloned())
            .collect())
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let data = self.inner.read().await;
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let data = self.inner.read().await;
        Ok(data.users.iter().find(|u| u.email == email).cloned())
    }

    /// Insert a new user, enforcing unique username and email.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let mut data = self.inner.write().await;

        if data.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Duplicate {
                field: "username",
                value: user.username.clone(),
            });
        }
        if data.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Duplicate {
                field: "email",
                value: user.email.clone(),
            });
        }

        data.users.push(user.clone());
        Ok(())
    }

    /// Add `friend_id` to the user's friends (set union). `None` if the user is gone.
    pub async fn add_friend(&self, user_id: &str, friend_id: &str) -> Result<Option<User>, AppError> {
        let mut data = self.inner.write().await;
        Ok(data.users.iter_mut().find(|u| u.id == user_id).map(|user| {
            user.add_friend(friend_id);
            user.clone()
        }))
    }

    // ─── Thought Operations ──────────────────────────────────────

    /// Thoughts, newest first, optionally restricted to one author.
    pub async fn list_thoughts(&self, username: Option<&str>) -> Result<Vec<Thought>, AppError> {
        let data = self.inner.read().await;

        // Reverse first so equal timestamps keep newest-inserted first under the stable sort.
        let mut thoughts: Vec<Thought> = data
            .thoughts
            .iter()
            .rev()
            .filter(|t| username.map_or(true, |name| t.username == name))
            .cloned()
            .collect();
        thoughts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(thoughts)
    }

    pub async fn get_thought(&self, id: &str) -> Result<Option<Thought>, AppError> {
        let data = self.inner.read().await;
        Ok(data.thoughts.iter().find(|t| t.id == id).cloned())
    }

    /// Fetch thoughts by ID, in the order given. Unknown IDs are skipped.
    pub async fn get_thoughts(&self, ids: &[String]) -> Result<Vec<Thought>, AppError> {
        let data = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| data.thoughts.iter().find(|t| &t.id == id).cloned())
            .collect())
    }

    /// Store a thought and append its ID to the author's thought list.
    pub async fn create_thought(&self, author_id: &str, thought: &Thought) -> Result<(), AppError> {
        let mut data = self.inner.write().await;

        data.thoughts.push(thought.clone());

        match data.users.iter_mut().find(|u| u.id == author_id) {
            Some(author) => author.thoughts.push(thought.id.clone()),
            None => tracing::warn!(
                author_id,
                thought_id = %thought.id,
                "Author not found; thought stored without owner entry"
            ),
        }

        Ok(())
    }

    /// Append a reaction. `None` if the thought does not exist.
    pub async fn push_reaction(
        &self,
        thought_id: &str,
        reaction: &Reaction,
    ) -> Result<Option<Thought>, AppError> {
        let mut data = self.inner.write().await;
        Ok(data
            .thoughts
            .iter_mut()
            .find(|t| t.id == thought_id)
            .map(|thought| {
                thought.reactions.push(reaction.clone());
                thought.clone()
            }))
    }
}
