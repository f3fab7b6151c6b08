// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running.
//! Run with FIRESTORE_EMULATOR_HOST pointing at the emulator.
//!
//! The emulator keeps state between tests, so every test uses unique names.

use deep_thoughts::error::AppError;
use deep_thoughts::models::{Reaction, Thought, User};
use deep_thoughts::services::password::hash_password;

mod common;
use common::test_db;

/// Generate a unique suffix for test isolation.
fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Helper to create a basic test user
fn test_user(prefix: &str) -> User {
    let name = format!("{}-{}", prefix, unique_suffix());
    User::new(
        name.clone(),
        format!("{}@example.com", name),
        hash_password("secret1").unwrap(),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_creation_and_lookup() {
    require_emulator!();
    let db = test_db().await;
    let user = test_user("alice");

    db.create_user(&user).await.unwrap();

    let by_id = db.get_user(&user.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, user.username);
    let by_name = db.find_user_by_username(&user.username).await.unwrap().unwrap();
    assert_eq!(by_name.id, user.id);
    let by_email = db.find_user_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn test_duplicate_username_and_email() {
    require_emulator!();
    let db = test_db().await;
    let user = test_user("dup");
    db.create_user(&user).await.unwrap();

    let mut same_name = test_user("other");
    same_name.username = user.username.clone();
    let err = db.create_user(&same_name).await.unwrap_err();
    assert!(matches!(err, AppError::Duplicate { field: "username", .. }));

    let mut same_email = test_user("other");
    same_email.email = user.email.clone();
    let err = db.create_user(&same_email).await.unwrap_err();
    assert!(matches!(err, AppError::Duplicate { field: "email", .. }));

    assert!(db.get_user(&same_name.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_add_friend_set_semantics() {
    require_emulator!();
    let db = test_db().await;
    let alice = test_user("alice");
    let bob = test_user("bob");
    db.create_user(&alice).await.unwrap();
    db.create_user(&bob).await.unwrap();

    db.add_friend(&alice.id, &bob.id).await.unwrap();
    let updated = db.add_friend(&alice.id, &bob.id).await.unwrap().unwrap();
    assert_eq!(updated.friends, vec![bob.id.clone()]);

    let friends = db.get_users(&updated.friends).await.unwrap();
    assert_eq!(friends[0].id, bob.id);
}

// ═══════════════════════════════════════════════════════════════════════════
// THOUGHT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_thought_creation_updates_author() {
    require_emulator!();
    let db = test_db().await;
    let alice = test_user("alice");
    db.create_user(&alice).await.unwrap();

    let thought = Thought::new("hello world".to_string(), alice.username.clone());
    db.create_thought(&alice.id, &thought).await.unwrap();

    let stored = db.get_user(&alice.id).await.unwrap().unwrap();
    assert_eq!(stored.thoughts, vec![thought.id.clone()]);

    let mine = db.list_thoughts(Some(&alice.username)).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].thought_text, "hello world");
}

#[tokio::test]
async fn test_push_reaction() {
    require_emulator!();
    let db = test_db().await;

    let thought = Thought::new("react to me".to_string(), "author".to_string());
    db.create_thought("missing-author", &thought).await.unwrap();

    let reaction = Reaction::new("nice!".to_string(), "bob".to_string());
    let updated = db.push_reaction(&thought.id, &reaction).await.unwrap().unwrap();
    assert_eq!(updated.reaction_count(), 1);

    let stored = db.get_thought(&thought.id).await.unwrap().unwrap();
    assert_eq!(stored.reactions[0].reaction_body, "nice!");

    let missing = db.push_reaction(&unique_suffix(), &reaction).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_concurrent_reactions_are_all_kept() {
    require_emulator!();
    let db = test_db().await;

    let thought = Thought::new("busy thought".to_string(), "author".to_string());
    db.create_thought("missing-author", &thought).await.unwrap();

    let reactions: Vec<Reaction> = (0..8)
        .map(|i| Reaction::new(format!("reaction {}", i), "bob".to_string()))
        .collect();
    let results =
        futures_util::future::join_all(reactions.iter().map(|r| db.push_reaction(&thought.id, r)))
            .await;
    for result in results {
        assert!(result.unwrap().is_some());
    }

    let stored = db.get_thought(&thought.id).await.unwrap().unwrap();
    assert_eq!(stored.reaction_count(), reactions.len());
}

#[tokio::test]
async fn test_concurrent_thought_and_friend_both_land() {
    require_emulator!();
    let db = test_db().await;
    let alice = test_user("alice");
    let bob = test_user("bob");
    db.create_user(&alice).await.unwrap();
    db.create_user(&bob).await.unwrap();

    let thought = Thought::new("while befriending".to_string(), alice.username.clone());
    let (posted, befriended) = tokio::join!(
        db.create_thought(&alice.id, &thought),
        db.add_friend(&alice.id, &bob.id)
    );
    posted.unwrap();
    befriended.unwrap();

    let stored = db.get_user(&alice.id).await.unwrap().unwrap();
    assert_eq!(stored.thoughts, vec![thought.id.clone()]);
    assert_eq!(stored.friends, vec![bob.id.clone()]);
}

#[tokio::test]
async fn test_concurrent_signups_for_one_username() {
    require_emulator!();
    let db = test_db().await;
    let first = test_user("racer");
    let mut second = test_user("racer");
    second.username = first.username.clone();

    let (a, b) = tokio::join!(db.create_user(&first), db.create_user(&second));

    let failures: Vec<AppError> = [a, b].into_iter().filter_map(Result::err).collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0], AppError::Duplicate { field: "username", .. }));

    let owner = db.find_user_by_username(&first.username).await.unwrap().unwrap();
    let loser = if owner.id == first.id { &second } else { &first };
    assert!(db.get_user(&loser.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unaddressable_ids_resolve_to_none() {
    require_emulator!();
    let db = test_db().await;
    let reaction = Reaction::new("hm".to_string(), "bob".to_string());

    for id in ["", "a/b"] {
        assert!(db.get_thought(id).await.unwrap().is_none());
        assert!(db.push_reaction(id, &reaction).await.unwrap().is_none());
        assert!(db.add_friend(id, "someone").await.unwrap().is_none());
    }
}
