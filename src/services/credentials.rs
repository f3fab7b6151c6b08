// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session credentials: HS256 JWTs carrying a user's identity claims.
//!
//! Credentials are stateless. Nothing is stored server-side, so there is no
//! revocation; a credential dies when the client drops it or when it
//! expires. Claims are not re-checked against the store on each request.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::User;

/// Identity asserted by a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub username: String,
    pub email: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<&User> for IdentityClaims {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            id: user.id.clone(),
        }
    }
}

/// JWT payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub data: IdentityClaims,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Issues and verifies session credentials with a fixed secret and lifetime.
#[derive(Clone)]
pub struct CredentialService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl CredentialService {
    pub fn new(signing_key: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn ttl_secs(&self) -> i64 {
        i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX)
    }

    /// Create a credential for `claims`, valid from now for the configured TTL.
    pub fn issue(&self, claims: &IdentityClaims) -> anyhow::Result<String> {
        self.issue_at(claims, Utc::now().timestamp())
    }

    /// Create a credential as if issued at `issued_at` (Unix seconds).
    pub fn issue_at(&self, claims: &IdentityClaims, issued_at: i64) -> anyhow::Result<String> {
        let claims = Claims {
            data: claims.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs()),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify a credential and return its identity.
    ///
    /// Malformed tokens, bad signatures and expired tokens all yield `None`;
    /// the reason is only logged.
    pub fn verify(&self, token: &str) -> Option<IdentityClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(error = %e, "Invalid token");
                return None;
            }
        };

        // Enforce max-age too, in case exp was minted further out than our TTL.
        let age = Utc::now().timestamp().saturating_sub(token_data.claims.iat);
        if age > self.ttl_secs() {
            tracing::debug!(age, "Invalid token: older than max age");
            return None;
        }

        Some(token_data.claims.data)
    }
}
