// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod thought;
pub mod user;

pub use thought::{Reaction, ReactionInput, Thought, ThoughtInput};
pub use user::{HashedPassword, SignupInput, User};
