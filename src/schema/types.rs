// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GraphQL object types.
//!
//! Thin wrappers over the stored models. Reference lists (a user's
//! thoughts and friends) are populated lazily, only when selected.

use async_graphql::{Context, Object, Result, SimpleObject, ID};

use crate::error::AppError;
use crate::models::{Reaction, Thought, User};
use crate::schema::database;
use crate::services::AuthPayload;

fn count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn username(&self) -> &str {
        &self.0.username
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn friend_count(&self) -> i32 {
        count(self.0.friend_count())
    }

    async fn thoughts(&self, ctx: &Context<'_>) -> Result<Vec<ThoughtObject>> {
        let thoughts = database(ctx)?
            .get_thoughts(&self.0.thoughts)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(thoughts.into_iter().map(ThoughtObject).collect())
    }

    async fn friends(&self, ctx: &Context<'_>) -> Result<Vec<UserObject>> {
        let friends = database(ctx)?
            .get_users(&self.0.friends)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(friends.into_iter().map(UserObject).collect())
    }
}

pub struct ThoughtObject(pub Thought);

#[Object(name = "Thought")]
impl ThoughtObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn thought_text(&self) -> &str {
        &self.0.thought_text
    }

    async fn created_at(&self) -> &str {
        &self.0.created_at
    }

    async fn username(&self) -> &str {
        &self.0.username
    }

    async fn reaction_count(&self) -> i32 {
        count(self.0.reaction_count())
    }

    async fn reactions(&self) -> Vec<ReactionObject> {
        self.0.reactions.iter().cloned().map(ReactionObject).collect()
    }
}

pub struct ReactionObject(pub Reaction);

#[Object(name = "Reaction")]
impl ReactionObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn reaction_body(&self) -> &str {
        &self.0.reaction_body
    }

    async fn created_at(&self) -> &str {
        &self.0.created_at
    }

    async fn username(&self) -> &str {
        &self.0.username
    }
}

/// Result of login/signup.
#[derive(SimpleObject)]
#[graphql(name = "Auth")]
pub struct AuthObject {
    pub token: ID,
    pub user: UserObject,
}

impl From<AuthPayload> for AuthObject {
    fn from(payload: AuthPayload) -> Self {
        Self {
            token: ID(payload.token),
            user: UserObject(payload.user),
        }
    }
}
