// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query root.

use async_graphql::{Context, Object, Result, ID};

use crate::error::AppError;
use crate::schema::types::{ThoughtObject, UserObject};
use crate::schema::{acting_identity, database};
use crate::services::accounts;

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The logged-in user.
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let identity = acting_identity(ctx)?;
        let user = accounts::me(database(ctx)?, identity)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(user.map(UserObject))
    }

    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserObject>> {
        let users = database(ctx)?
            .list_users()
            .await
            .map_err(AppError::into_graphql)?;
        Ok(users.into_iter().map(UserObject).collect())
    }

    async fn user(&self, ctx: &Context<'_>, username: String) -> Result<Option<UserObject>> {
        let user = database(ctx)?
            .find_user_by_username(&username)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(user.map(UserObject))
    }

    /// All thoughts, newest first, or only those by `username`.
    async fn thoughts(
        &self,
        ctx: &Context<'_>,
        username: Option<String>,
    ) -> Result<Vec<ThoughtObject>> {
        // An empty username means "everyone", as with an omitted argument.
        let username = username.as_deref().filter(|name| !name.is_empty());
        let thoughts = database(ctx)?
            .list_thoughts(username)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(thoughts.into_iter().map(ThoughtObject).collect())
    }

    async fn thought(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "_id")] id: ID,
    ) -> Result<Option<ThoughtObject>> {
        let thought = database(ctx)?
            .get_thought(id.as_str())
            .await
            .map_err(AppError::into_graphql)?;
        Ok(thought.map(ThoughtObject))
    }
}
