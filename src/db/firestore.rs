// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile, thought list, friend list)
//! - Thoughts (with embedded reactions)
//! - Unique-key reservations (`usernames`, `emails`) that back the
//!   username/email uniqueness constraint, which Firestore lacks natively

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Reaction, Thought, User};
use firestore::errors::FirestoreError;
use firestore::{path, FirestoreWritePrecondition};
use futures_util::{stream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Reservation document keyed by the reserved value.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UniqueKey {
    user_id: String,
}

/// Document IDs may not contain `/`; encode reserved values.
fn key_doc_id(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Whether `id` can name a document. Anything else cannot exist, so
/// lookups answer `None` instead of sending an invalid path.
fn is_valid_doc_id(id: &str) -> bool {
    !id.is_empty()
        && !id.contains('/')
        && id != "."
        && id != ".."
        && !(id.len() > 4 && id.starts_with("__") && id.ends_with("__"))
}

fn db_error(context: &str) -> impl Fn(FirestoreError) -> AppError + '_ {
    move |e| AppError::Database(format!("{}: {}", context, e))
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── Generic Helpers ───────────────────────────────────────────

    async fn get_one<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: for<'de> Deserialize<'de> + Send,
    {
        if !is_valid_doc_id(id) {
            return Ok(None);
        }

        self.client
            .fluent()
            .select()
            .by_id_in(collection)
            .obj::<T>()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch documents by ID, preserving the order of `ids`. Missing IDs are skipped.
    async fn get_many<T>(&self, collection: &str, ids: &[String]) -> Result<Vec<T>, AppError>
    where
        T: for<'de> Deserialize<'de> + Send,
    {
        let lookups: Vec<_> = ids
            .iter()
            .map(|id| self.get_one::<T>(collection, id))
            .collect();
        let found: Vec<Option<T>> = stream::iter(lookups)
            .buffered(MAX_CONCURRENT_DB_OPS)
            .try_collect()
            .await?;

        Ok(found.into_iter().flatten().collect())
    }

    async fn begin(&self) -> Result<firestore::FirestoreTransaction<'_>, AppError> {
        self.client
            .begin_transaction()
            .await
            .map_err(db_error("Failed to begin transaction"))
    }

    /// Append `value` to an array field as a single server-side transform.
    ///
    /// Concurrent appends to the same document do not overwrite each other.
    /// The document must already exist; a transform on a missing document
    /// would create it.
    async fn append_to_array<V>(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: V,
    ) -> Result<(), AppError>
    where
        V: Serialize + Send + Sync,
    {
        let mut transaction = self.begin().await?;

        self.client
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id)
            .transforms(|t| t.fields([t.field(field).append_missing_elements([&value])]))
            .only_transform()
            .add_to_transaction(&mut transaction)
            .map_err(db_error("Failed to add transform to transaction"))?;

        transaction
            .commit()
            .await
            .map_err(db_error("Transaction commit failed"))?;

        Ok(())
    }

    /// Resolve a unique-key reservation to the owning user.
    async fn get_user_by_key(&self, collection: &str, value: &str) -> Result<Option<User>, AppError> {
        let key: Option<UniqueKey> = self.get_one(collection, &key_doc_id(value)).await?;
        match key {
            Some(key) => self.get_user(&key.user_id).await,
            None => Ok(None),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        self.get_one(collections::USERS, id).await
    }

    pub async fn get_users(&self, ids: &[String]) -> Result<Vec<User>, AppError> {
        self.get_many(collections::USERS, ids).await
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.get_user_by_key(collections::USERNAMES, username).await
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.get_user_by_key(collections::EMAILS, email).await
    }

    /// Create a user together with its username and email reservations.
    ///
    /// Reservations are written with an exists=false precondition, so of two
    /// racing signups for the same key only one commit succeeds. The
    /// pre-check only gives the common case a precise error.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let username_id = key_doc_id(&user.username);
        let email_id = key_doc_id(&user.email);

        if let Some(err) = self.taken_key(user).await? {
            return Err(err);
        }

        let key = UniqueKey {
            user_id: user.id.clone(),
        };

        let mut transaction = self.begin().await?;

        for (collection, doc_id) in [
            (collections::USERNAMES, &username_id),
            (collections::EMAILS, &email_id),
        ] {
            self.client
                .fluent()
                .update()
                .in_col(collection)
                .precondition(FirestoreWritePrecondition::Exists(false))
                .document_id(doc_id)
                .object(&key)
                .add_to_transaction(&mut transaction)
                .map_err(db_error("Failed to add reservation to transaction"))?;
        }

        self.client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .add_to_transaction(&mut transaction)
            .map_err(db_error("Failed to add user to transaction"))?;

        if let Err(e) = transaction.commit().await {
            // A failed exists=false precondition means another signup took the key first.
            if let Some(duplicate) = self.taken_key(user).await? {
                tracing::info!(error = %e, username = %user.username, "Signup lost reservation race");
                return Err(duplicate);
            }
            return Err(db_error("Transaction commit failed")(e));
        }

        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(())
    }

    /// The duplicate error for whichever of the user's keys is already reserved.
    async fn taken_key(&self, user: &User) -> Result<Option<AppError>, AppError> {
        let taken: Option<UniqueKey> = self
            .get_one(collections::USERNAMES, &key_doc_id(&user.username))
            .await?;
        if taken.is_some() {
            return Ok(Some(AppError::Duplicate {
                field: "username",
                value: user.username.clone(),
            }));
        }

        let taken: Option<UniqueKey> = self
            .get_one(collections::EMAILS, &key_doc_id(&user.email))
            .await?;
        if taken.is_some() {
            return Ok(Some(AppError::Duplicate {
                field: "email",
                value: user.email.clone(),
            }));
        }

        Ok(None)
    }

    /// Add `friend_id` to the user's friends (set union). `None` if the user is gone.
    pub async fn add_friend(&self, user_id: &str, friend_id: &str) -> Result<Option<User>, AppError> {
        if self.get_user(user_id).await?.is_none() {
            return Ok(None);
        }

        self.append_to_array(collections::USERS, user_id, &path!(User::friends), friend_id)
            .await?;

        self.get_user(user_id).await
    }

    // ─── Thought Operations ──────────────────────────────────────

    /// Thoughts, newest first, optionally restricted to one author.
    ///
    /// The filtered form needs a composite index on (username, created_at desc).
    pub async fn list_thoughts(&self, username: Option<&str>) -> Result<Vec<Thought>, AppError> {
        let query = self.client.fluent().select().from(collections::THOUGHTS);

        let query = if let Some(name) = username {
            let name = name.to_string();
            query.filter(move |q| q.for_all([q.field("username").eq(name.clone())]))
        } else {
            query
        };

        query
            .order_by([("created_at", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn get_thought(&self, id: &str) -> Result<Option<Thought>, AppError> {
        self.get_one(collections::THOUGHTS, id).await
    }

    pub async fn get_thoughts(&self, ids: &[String]) -> Result<Vec<Thought>, AppError> {
        self.get_many(collections::THOUGHTS, ids).await
    }

    /// Store a thought and append its ID to the author's list in one transaction.
    pub async fn create_thought(&self, author_id: &str, thought: &Thought) -> Result<(), AppError> {
        let author_exists = self.get_user(author_id).await?.is_some();

        let mut transaction = self.begin().await?;

        self.client
            .fluent()
            .update()
            .in_col(collections::THOUGHTS)
            .document_id(&thought.id)
            .object(thought)
            .add_to_transaction(&mut transaction)
            .map_err(db_error("Failed to add thought to transaction"))?;

        if author_exists {
            self.client
                .fluent()
                .update()
                .in_col(collections::USERS)
                .document_id(author_id)
                .transforms(|t| {
                    t.fields([t
                        .field(&path!(User::thoughts))
                        .append_missing_elements([&thought.id])])
                })
                .only_transform()
                .add_to_transaction(&mut transaction)
                .map_err(db_error("Failed to add author to transaction"))?;
        } else {
            tracing::warn!(
                author_id,
                thought_id = %thought.id,
                "Author not found; thought stored without owner entry"
            );
        }

        transaction
            .commit()
            .await
            .map_err(db_error("Transaction commit failed"))?;

        Ok(())
    }

    /// Append a reaction. `None` if the thought does not exist.
    pub async fn push_reaction(
        &self,
        thought_id: &str,
        reaction: &Reaction,
    ) -> Result<Option<Thought>, AppError> {
        if self.get_thought(thought_id).await?.is_none() {
            return Ok(None);
        }

        self.append_to_array(
            collections::THOUGHTS,
            thought_id,
            &path!(Thought::reactions),
            reaction,
        )
        .await?;

        self.get_thought(thought_id).await
    }
}
