// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything here is read once at startup and is immutable afterwards.
//! The credential secret and lifetime are handed to the credential service
//! from this struct rather than living in globals.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default lifetime of a session credential (2 hours).
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 2 * 60 * 60;

/// Which persistence backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Google Cloud Firestore (or the emulator when FIRESTORE_EMULATOR_HOST is set)
    Firestore,
    /// Process-local in-memory collections (local development, tests)
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Serve the static front-end bundle in addition to the API
    pub production: bool,
    /// Directory holding the built front-end bundle
    pub static_dir: PathBuf,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore backend)
    pub gcp_project_id: String,
    /// Persistence backend
    pub store_backend: StoreBackend,

    // --- Secrets ---
    /// JWT signing key for session credentials (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Lifetime of an issued credential
    pub token_ttl: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 3001,
            production: false,
            static_dir: PathBuf::from("client/build"),
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            store_backend: StoreBackend::Memory,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 3001,
        };

        let token_ttl_secs = match env::var("TOKEN_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("TOKEN_TTL_SECS", raw))?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => StoreBackend::Firestore,
        };

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map(|v| v.trim().to_string())
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("JWT_SIGNING_KEY"))?
            .into_bytes();

        Ok(Self {
            port,
            production: env::var("APP_ENV")
                .map(|v| v.trim().eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("client/build")),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            store_backend,
            jwt_signing_key,
            token_ttl: Duration::from_secs(token_ttl_secs),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test touches the process environment so parallel tests don't race.
    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("STORE_BACKEND", "memory");
        env::set_var("APP_ENV", "production");
        env::remove_var("PORT");
        env::remove_var("TOKEN_TTL_SECS");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 3001);
        assert!(config.production);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.token_ttl, Duration::from_secs(7200));
        assert_eq!(config.jwt_signing_key, b"test_jwt_key_32_bytes_minimum!!");

        env::set_var("TOKEN_TTL_SECS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("TOKEN_TTL_SECS", _))
        ));
        env::remove_var("TOKEN_TTL_SECS");
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!(
            "Firestore".parse::<StoreBackend>().unwrap(),
            StoreBackend::Firestore
        );
        assert_eq!(" memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}
