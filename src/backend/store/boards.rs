//! Board rows

use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};
use uuid::Uuid;

use super::{get_id, get_ids, ids_json, StoreResult};
use crate::shared::models::{Board, EntityKind};

const KIND: EntityKind = EntityKind::Board;

/// Editable board fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

fn from_row(row: &SqliteRow) -> StoreResult<Board> {
    Ok(Board {
        id: get_id(row, KIND, "id")?,
        name: row.try_get("name")?,
        color: row.try_get("color")?,
        owner: get_id(row, KIND, "owner")?,
        lists: get_ids(row, KIND, "lists")?,
        list_order: get_ids(row, KIND, "list_order")?,
        created_on: row.try_get("created_on")?,
        updated_on: row.try_get("updated_on")?,
    })
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(executor: E, board: &Board) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO boards (id, name, color, owner, lists, list_order, created_on, updated_on)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(board.id.to_string())
    .bind(&board.name)
    .bind(&board.color)
    .bind(board.owner.to_string())
    .bind(ids_json(&board.lists)?)
    .bind(ids_json(&board.list_order)?)
    .bind(board.created_on)
    .bind(board.updated_on)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn find<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> StoreResult<Option<Board>> {
    let row = sqlx::query("SELECT * FROM boards WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Boards of a user, oldest first
pub async fn find_by_owner<'e, E: SqliteExecutor<'e>>(
    executor: E,
    owner: Uuid,
) -> StoreResult<Vec<Board>> {
    let rows = sqlx::query("SELECT * FROM boards WHERE owner = ? ORDER BY created_on ASC")
        .bind(owner.to_string())
        .fetch_all(executor)
        .await?;

    rows.iter().map(from_row).collect()
}

/// Apply a patch and return the updated board, `None` if it doesn't exist
pub async fn update<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    patch: &BoardPatch,
    now: i64,
) -> StoreResult<Option<Board>> {
    let row = sqlx::query(
        r#"
        UPDATE boards
        SET name = COALESCE(?, name),
            color = COALESCE(?, color),
            updated_on = MAX(updated_on + 1, ?)
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&patch.name)
    .bind(&patch.color)
    .bind(now)
    .bind(id.to_string())
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(from_row).transpose()
}
