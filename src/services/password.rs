// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing (argon2id, PHC string format).
//!
//! Hashing is CPU-bound; the async wrappers move it onto the blocking pool.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::error::{AppError, Result};
use crate::models::HashedPassword;

const SALT_LEN: usize = 16;

/// Hash a raw password with a fresh random salt.
pub fn hash_password(password: &str) -> anyhow::Result<HashedPassword> {
    let mut salt_bytes = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|e| anyhow::anyhow!("Failed to generate salt: {}", e))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| anyhow::anyhow!("Failed to encode salt: {}", e))?;

    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Password hashing failed: {}", e))?
        .to_string();

    Ok(HashedPassword::from_phc(phc))
}

/// Check a raw password against a stored hash. Unparseable hashes never match.
pub fn verify_password(hash: &HashedPassword, password: &str) -> bool {
    match PasswordHash::new(hash.as_str()) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
            false
        }
    }
}

/// [`hash_password`] on the blocking thread pool.
pub async fn hash_password_async(password: String) -> Result<HashedPassword> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
        .map_err(AppError::Internal)
}

/// [`verify_password`] on the blocking thread pool.
pub async fn verify_password_async(hash: HashedPassword, password: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&hash, &password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Verification task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret1").unwrap();
        assert!(hash.as_str().starts_with("$argon2"));
        assert!(verify_password(&hash, "secret1"));
        assert!(!verify_password(&hash, "secret2"));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = hash_password("secret1").unwrap();
        let b = hash_password("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        let bogus = HashedPassword::from_phc("plaintext".to_string());
        assert!(!verify_password(&bogus, "plaintext"));
    }

    #[tokio::test]
    async fn test_async_wrappers() {
        let hash = hash_password_async("secret1".to_string()).await.unwrap();
        assert!(verify_password_async(hash.clone(), "secret1".to_string())
            .await
            .unwrap());
        assert!(!verify_password_async(hash, "nope".to_string()).await.unwrap());
    }
}
