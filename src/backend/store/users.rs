//! User rows

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};
use uuid::Uuid;

use super::{get_id, get_ids, ids_json, StoreResult};
use crate::shared::models::{EntityKind, User};

const KIND: EntityKind = EntityKind::User;

fn from_row(row: &SqliteRow) -> StoreResult<User> {
    Ok(User {
        id: get_id(row, KIND, "id")?,
        name: row.try_get("name")?,
        username: row.try_get("username")?,
        password: row.try_get("password")?,
        boards: get_ids(row, KIND, "boards")?,
        created_on: row.try_get("created_on")?,
        updated_on: row.try_get("updated_on")?,
        last_login: row.try_get("last_login")?,
    })
}

/// Insert a new user
///
/// Fails with `ConstraintViolation` when the username is taken.
pub async fn insert<'e, E: SqliteExecutor<'e>>(executor: E, user: &User) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name, username, password, boards, created_on, updated_on, last_login)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user.id.to_string())
    .bind(&user.name)
    .bind(&user.username)
    .bind(&user.password)
    .bind(ids_json(&user.boards)?)
    .bind(user.created_on)
    .bind(user.updated_on)
    .bind(user.last_login)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn find<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> StoreResult<Option<User>> {
    let row = sqlx::query("SELECT * FROM users WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn find_by_username<'e, E: SqliteExecutor<'e>>(
    executor: E,
    username: &str,
) -> StoreResult<Option<User>> {
    let row = sqlx::query("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn update_last_login<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    now: i64,
) -> StoreResult<()> {
    sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
        .bind(now)
        .bind(id.to_string())
        .execute(executor)
        .await?;
    Ok(())
}

/// Store a new password hash; returns false when the user is gone
pub async fn update_password<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    password_hash: &str,
    now: i64,
) -> StoreResult<bool> {
    let result = sqlx::query(
        "UPDATE users SET password = ?, updated_on = MAX(updated_on + 1, ?) WHERE id = ?",
    )
    .bind(password_hash)
    .bind(now)
    .bind(id.to_string())
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
