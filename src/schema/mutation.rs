// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mutation root.
//!
//! Every mutation that acts as a user resolves [`acting_identity`] before
//! touching anything else.

use async_graphql::{Context, Object, Result, ID};

use crate::error::AppError;
use crate::schema::types::{AuthObject, ThoughtObject, UserObject};
use crate::schema::{acting_identity, credentials, database};
use crate::services::{accounts, thoughts};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthObject> {
        let auth = accounts::login(database(ctx)?, credentials(ctx)?, &email, &password)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(auth.into())
    }

    async fn add_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
    ) -> Result<AuthObject> {
        let auth = accounts::signup(
            database(ctx)?,
            credentials(ctx)?,
            &username,
            &email,
            &password,
        )
        .await
        .map_err(AppError::into_graphql)?;
        Ok(auth.into())
    }

    async fn add_thought(&self, ctx: &Context<'_>, thought_text: String) -> Result<ThoughtObject> {
        let identity = acting_identity(ctx)?;
        let thought = thoughts::add_thought(database(ctx)?, identity, &thought_text)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(ThoughtObject(thought))
    }

    async fn add_reaction(
        &self,
        ctx: &Context<'_>,
        thought_id: ID,
        reaction_body: String,
    ) -> Result<Option<ThoughtObject>> {
        let identity = acting_identity(ctx)?;
        let thought = thoughts::add_reaction(
            database(ctx)?,
            identity,
            thought_id.as_str(),
            &reaction_body,
        )
        .await
        .map_err(AppError::into_graphql)?;
        Ok(thought.map(ThoughtObject))
    }

    async fn add_friend(&self, ctx: &Context<'_>, friend_id: ID) -> Result<Option<UserObject>> {
        let identity = acting_identity(ctx)?;
        let user = accounts::add_friend(database(ctx)?, identity, friend_id.as_str())
            .await
            .map_err(AppError::into_graphql)?;
        Ok(user.map(UserObject))
    }
}
