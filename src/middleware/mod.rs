// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request identity and response security headers.

pub mod auth;
pub mod security;

pub use auth::{build_request_context, require_identity, RequestContext};
