//! Cascade engine integration tests
//!
//! Create-and-link and delete-and-unlink against an in-memory database.

mod common;

use assert_matches::assert_matches;
use common::*;
use kanban::backend::engine::{create_and_link, delete_and_unlink, NewChild};
use kanban::backend::error::BackendError;
use kanban::backend::store;
use kanban::shared::access::Owned;
use kanban::shared::models::{Entity, EntityKind};
use pretty_assertions::assert_eq;
use uuid::Uuid;

#[tokio::test]
async fn test_create_links_child_into_parent() {
    let pool = create_test_pool().await;
    let user = seed_user(&pool, "alice").await;

    let board = seed_board(&pool, user.id, "Roadmap").await;
    let first = seed_list(&pool, user.id, board, "Todo").await;
    let second = seed_list(&pool, user.id, board, "Done").await;

    assert_eq!(order_of(&pool, EntityKind::User, user.id).await, vec![board]);
    assert_eq!(order_of(&pool, EntityKind::Board, board).await, vec![first, second]);
    assert_membership_consistent(&pool, EntityKind::Board, board).await;
    assert_membership_consistent(&pool, EntityKind::User, user.id).await;
}

#[tokio::test]
async fn test_create_sets_owner_and_root_user() {
    let pool = create_test_pool().await;
    let user = seed_user(&pool, "alice").await;
    let board = seed_board(&pool, user.id, "Roadmap").await;
    let list = seed_list(&pool, user.id, board, "Todo").await;
    let card = seed_card(&pool, user.id, list, "Write tests").await;
    let checklist = seed_checklist(&pool, user.id, card, "Cascade").await;

    let entity = fetch(&pool, EntityKind::Checklist, checklist).await.unwrap();
    assert_eq!(entity.owner(), Some(card));
    assert_eq!(entity.root_user(), user.id);

    let entity = fetch(&pool, EntityKind::Card, card).await.unwrap();
    assert_eq!(entity.owner(), Some(list));
    assert_eq!(entity.root_user(), user.id);
}

#[tokio::test]
async fn test_create_under_foreign_parent_is_unauthorized() {
    let pool = create_test_pool().await;
    let alice = seed_user(&pool, "alice").await;
    let mallory = seed_user(&pool, "mallory").await;
    let board = seed_board(&pool, alice.id, "Roadmap").await;

    let result = create_and_link(
        &pool,
        mallory.id,
        board,
        NewChild::List {
            name: "Injected".into(),
        },
    )
    .await;

    assert_matches!(result, Err(BackendError::Unauthorized { .. }));
    assert!(order_of(&pool, EntityKind::Board, board).await.is_empty());
    assert_eq!(
        store::count_for_user(&pool, EntityKind::List, alice.id).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_create_under_missing_parent_is_not_found() {
    let pool = create_test_pool().await;
    let user = seed_user(&pool, "alice").await;

    let result = create_and_link(
        &pool,
        user.id,
        Uuid::new_v4(),
        NewChild::Card {
            name: "Orphan".into(),
            description: String::new(),
            color: "red".into(),
        },
    )
    .await;

    assert_matches!(result, Err(BackendError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_card_removes_checklists_and_unlinks() {
    let pool = create_test_pool().await;
    let user = seed_user(&pool, "alice").await;
    let board = seed_board(&pool, user.id, "Roadmap").await;
    let list = seed_list(&pool, user.id, board, "Todo").await;
    let keep = seed_card(&pool, user.id, list, "Keep").await;
    let card = seed_card(&pool, user.id, list, "Drop").await;
    let first = seed_checklist(&pool, user.id, card, "one").await;
    let second = seed_checklist(&pool, user.id, card, "two").await;

    let deleted = delete_and_unlink(&pool, user.id, EntityKind::Card, card)
        .await
        .unwrap();

    assert_eq!(deleted.message, "card Drop successfully deleted");
    assert_eq!(deleted.descendants, 2);
    assert!(fetch(&pool, EntityKind::Card, card).await.is_none());
    assert!(fetch(&pool, EntityKind::Checklist, first).await.is_none());
    assert!(fetch(&pool, EntityKind::Checklist, second).await.is_none());

    assert_eq!(order_of(&pool, EntityKind::List, list).await, vec![keep]);
    assert_eq!(children_of(&pool, EntityKind::List, list).await, vec![keep]);
    assert_membership_consistent(&pool, EntityKind::List, list).await;
}

#[tokio::test]
async fn test_delete_board_leaves_no_descendants() {
    let pool = create_test_pool().await;
    let user = seed_user(&pool, "alice").await;
    let board = seed_board(&pool, user.id, "Roadmap").await;
    let other = seed_board(&pool, user.id, "Keep").await;
    for name in ["Todo", "Doing"] {
        let list = seed_list(&pool, user.id, board, name).await;
        let card = seed_card(&pool, user.id, list, "card").await;
        seed_checklist(&pool, user.id, card, "item").await;
    }
    let kept_list = seed_list(&pool, user.id, other, "Elsewhere").await;

    let deleted = delete_and_unlink(&pool, user.id, EntityKind::Board, board)
        .await
        .unwrap();
    assert_eq!(deleted.descendants, 6);

    assert!(store::child_ids(&pool, EntityKind::List, &[board])
        .await
        .unwrap()
        .is_empty());
    assert_eq!(order_of(&pool, EntityKind::User, user.id).await, vec![other]);
    assert_eq!(
        store::count_for_user(&pool, EntityKind::List, user.id).await.unwrap(),
        1
    );
    assert_eq!(
        store::count_for_user(&pool, EntityKind::Card, user.id).await.unwrap(),
        0
    );
    assert!(fetch(&pool, EntityKind::List, kept_list).await.is_some());
}

#[tokio::test]
async fn test_delete_user_removes_everything_they_own() {
    let pool = create_test_pool().await;
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bobby").await;

    let board = seed_board(&pool, alice.id, "Roadmap").await;
    let list = seed_list(&pool, alice.id, board, "Todo").await;
    let card = seed_card(&pool, alice.id, list, "card").await;
    seed_checklist(&pool, alice.id, card, "item").await;
    let bobs_board = seed_board(&pool, bob.id, "Bob's").await;

    delete_and_unlink(&pool, alice.id, EntityKind::User, alice.id)
        .await
        .unwrap();

    for kind in [
        EntityKind::User,
        EntityKind::Board,
        EntityKind::List,
        EntityKind::Card,
        EntityKind::Checklist,
    ] {
        assert_eq!(
            store::count_for_user(&pool, kind, alice.id).await.unwrap(),
            0,
            "{} left behind",
            kind
        );
    }
    assert!(fetch(&pool, EntityKind::Board, bobs_board).await.is_some());
}

#[tokio::test]
async fn test_delete_foreign_entity_is_unauthorized_and_changes_nothing() {
    let pool = create_test_pool().await;
    let alice = seed_user(&pool, "alice").await;
    let mallory = seed_user(&pool, "mallory").await;
    let board = seed_board(&pool, alice.id, "Roadmap").await;
    let list = seed_list(&pool, alice.id, board, "Todo").await;

    let result = delete_and_unlink(&pool, mallory.id, EntityKind::List, list).await;

    assert_matches!(result, Err(BackendError::Unauthorized { .. }));
    assert_matches!(
        fetch(&pool, EntityKind::List, list).await,
        Some(Entity::List(_))
    );
    assert_eq!(order_of(&pool, EntityKind::Board, board).await, vec![list]);
}

#[tokio::test]
async fn test_delete_missing_entity_is_not_found() {
    let pool = create_test_pool().await;
    let user = seed_user(&pool, "alice").await;

    let result = delete_and_unlink(&pool, user.id, EntityKind::Checklist, Uuid::new_v4()).await;
    assert_matches!(result, Err(BackendError::NotFound { .. }));
}

#[tokio::test]
async fn test_create_advances_parent_updated_on() {
    let pool = create_test_pool().await;
    let user = seed_user(&pool, "alice").await;
    let board = seed_board(&pool, user.id, "Roadmap").await;

    let before = updated_on(&pool, EntityKind::Board, board).await;
    seed_list(&pool, user.id, board, "Todo").await;
    let after = updated_on(&pool, EntityKind::Board, board).await;

    assert!(after > before);
}
