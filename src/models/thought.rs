// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Thought and reaction models for storage and API.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::time_utils::now_rfc3339;

/// Maximum length (in characters) of a thought or reaction body.
pub const MAX_BODY_CHARS: u64 = 280;

/// Thought document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thought {
    /// Document ID (UUID v4)
    #[serde(rename = "_id")]
    pub id: String,
    pub thought_text: String,
    /// Creation time (RFC 3339, millisecond precision)
    pub created_at: String,
    /// Author's username, copied at creation time
    pub username: String,
    /// Embedded reactions, in the order they were added
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl Thought {
    pub fn new(thought_text: String, username: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            thought_text,
            created_at: now_rfc3339(),
            username,
            reactions: Vec::new(),
        }
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }
}

/// Reaction embedded in a thought. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(rename = "_id")]
    pub id: String,
    pub reaction_body: String,
    pub created_at: String,
    pub username: String,
}

impl Reaction {
    pub fn new(reaction_body: String, username: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            reaction_body,
            created_at: now_rfc3339(),
            username,
        }
    }
}

/// Text of a new thought.
#[derive(Debug, Clone, Validate)]
pub struct ThoughtInput {
    #[validate(length(min = 1, max = MAX_BODY_CHARS, message = "Thought must be between 1 and 280 characters"))]
    pub thought_text: String,
}

/// Body of a new reaction.
#[derive(Debug, Clone, Validate)]
pub struct ReactionInput {
    #[validate(length(min = 1, max = MAX_BODY_CHARS, message = "Reaction must be between 1 and 280 characters"))]
    pub reaction_body: String,
}
