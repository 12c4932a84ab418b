//! Common test utilities
//!
//! In-memory database fixtures, direct seeding through the engine, and an
//! HTTP test server around the full router.

#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::TestServer;
use kanban::backend::engine::{create_and_link, NewChild};
use kanban::backend::server::{build_app, AppEnv, ServerConfig};
use kanban::backend::store::{self, children};
use kanban::shared::models::{now_millis, Entity, EntityKind, User};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

pub const TEST_SECRET: &str = "kanban-test-secret";
pub const TEST_PASSWORD: &str = "correct-horse";

/// Fresh in-memory database with migrations applied
///
/// A single connection that never expires; every new connection to
/// `sqlite::memory:` would open an empty database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    store::migrate(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub fn test_config() -> ServerConfig {
    test_config_for(AppEnv::Production)
}

pub fn test_config_for(env: AppEnv) -> ServerConfig {
    ServerConfig::builder()
        .database_url("sqlite::memory:")
        .jwt_secret(TEST_SECRET)
        .bcrypt_cost(4)
        .env(env)
        .build()
        .expect("Failed to build test config")
}

/// Insert a user directly; the stored hash is not a real bcrypt hash
pub async fn seed_user(pool: &SqlitePool, username: &str) -> User {
    let user = User::new(username, "not-a-hash", now_millis());
    store::users::insert(pool, &user)
        .await
        .expect("Failed to insert user");
    user
}

pub async fn seed_board(pool: &SqlitePool, user: Uuid, name: &str) -> Uuid {
    create_and_link(
        pool,
        user,
        user,
        NewChild::Board {
            name: name.to_string(),
            color: "blue".to_string(),
        },
    )
    .await
    .expect("Failed to create board")
    .id()
}

pub async fn seed_list(pool: &SqlitePool, user: Uuid, board: Uuid, name: &str) -> Uuid {
    create_and_link(pool, user, board, NewChild::List { name: name.to_string() })
        .await
        .expect("Failed to create list")
        .id()
}

pub async fn seed_card(pool: &SqlitePool, user: Uuid, list: Uuid, name: &str) -> Uuid {
    create_and_link(
        pool,
        user,
        list,
        NewChild::Card {
            name: name.to_string(),
            description: String::new(),
            color: "green".to_string(),
        },
    )
    .await
    .expect("Failed to create card")
    .id()
}

pub async fn seed_checklist(pool: &SqlitePool, user: Uuid, card: Uuid, objective: &str) -> Uuid {
    create_and_link(
        pool,
        user,
        card,
        NewChild::Checklist {
            objective: objective.to_string(),
            is_completed: false,
        },
    )
    .await
    .expect("Failed to create checklist")
    .id()
}

pub async fn fetch(pool: &SqlitePool, kind: EntityKind, id: Uuid) -> Option<Entity> {
    store::find(pool, kind, id)
        .await
        .expect("Failed to read entity")
}

/// Order array of a container
pub async fn order_of(pool: &SqlitePool, kind: EntityKind, id: Uuid) -> Vec<Uuid> {
    children::load(pool, kind, id)
        .await
        .expect("Failed to load membership")
        .order
}

/// Child collection of a container
pub async fn children_of(pool: &SqlitePool, kind: EntityKind, id: Uuid) -> Vec<Uuid> {
    children::load(pool, kind, id)
        .await
        .expect("Failed to load membership")
        .children
}

/// Assert that the child collection and the order array hold the same ids
/// without duplicates
pub async fn assert_membership_consistent(pool: &SqlitePool, kind: EntityKind, id: Uuid) {
    let membership = children::load(pool, kind, id)
        .await
        .expect("Failed to load membership");

    let mut children = membership.children.clone();
    let mut order = membership.order.clone();
    children.sort();
    order.sort();
    assert_eq!(children, order, "{} {} children and order differ", kind, id);

    let mut deduped = order.clone();
    deduped.dedup();
    assert_eq!(deduped.len(), order.len(), "{} {} order has duplicates", kind, id);
}

pub async fn updated_on(pool: &SqlitePool, kind: EntityKind, id: Uuid) -> i64 {
    fetch(pool, kind, id)
        .await
        .expect("entity exists")
        .updated_on()
}

/// Test server around the full router on a fresh database
pub async fn create_test_server() -> (TestServer, SqlitePool) {
    create_test_server_for(AppEnv::Production).await
}

pub async fn create_test_server_for(env: AppEnv) -> (TestServer, SqlitePool) {
    let pool = create_test_pool().await;
    let app = build_app(pool.clone(), test_config_for(env));
    let server = TestServer::new(app).expect("Failed to start test server");
    (server, pool)
}

/// Sign up through the API and return `(user_id, token)`
pub async fn signup(server: &TestServer, username: &str) -> (Uuid, String) {
    let response = server
        .post("/api/user/signup")
        .json(&serde_json::json!({
            "username": username,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    let user_id = body["userId"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("signup response has a userId");
    let token = body["token"]
        .as_str()
        .expect("signup response has a token")
        .to_string();
    (user_id, token)
}

/// Parse an id field out of a JSON body
pub fn json_id(body: &serde_json::Value, field: &str) -> Uuid {
    body[field]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .unwrap_or_else(|| panic!("body has no {} id: {}", field, body))
}
