// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Posting thoughts and reacting to them.

use validator::Validate;

use crate::db::Database;
use crate::error::Result;
use crate::models::{Reaction, ReactionInput, Thought, ThoughtInput};
use crate::services::credentials::IdentityClaims;

/// Post a thought as the acting user.
pub async fn add_thought(
    db: &Database,
    identity: &IdentityClaims,
    thought_text: &str,
) -> Result<Thought> {
    let input = ThoughtInput {
        thought_text: thought_text.to_string(),
    };
    input.validate()?;

    let thought = Thought::new(input.thought_text, identity.username.clone());
    db.create_thought(&identity.id, &thought).await?;

    tracing::info!(
        thought_id = %thought.id,
        username = %thought.username,
        "Thought posted"
    );

    Ok(thought)
}

/// React to any thought as the acting user. `None` if the thought is unknown.
pub async fn add_reaction(
    db: &Database,
    identity: &IdentityClaims,
    thought_id: &str,
    reaction_body: &str,
) -> Result<Option<Thought>> {
    let input = ReactionInput {
        reaction_body: reaction_body.to_string(),
    };
    input.validate()?;

    let reaction = Reaction::new(input.reaction_body, identity.username.clone());
    let updated = db.push_reaction(thought_id, &reaction).await?;

    if updated.is_none() {
        tracing::debug!(thought_id, "Reaction target not found");
    }

    Ok(updated)
}
