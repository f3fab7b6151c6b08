// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod credentials;
pub mod password;
pub mod thoughts;

pub use accounts::AuthPayload;
pub use credentials::{CredentialService, IdentityClaims};
