//! List rows

use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};
use uuid::Uuid;

use super::{get_id, get_ids, ids_json, StoreResult};
use crate::shared::models::{EntityKind, List};

const KIND: EntityKind = EntityKind::List;

/// Editable list fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPatch {
    pub name: Option<String>,
}

fn from_row(row: &SqliteRow) -> StoreResult<List> {
    Ok(List {
        id: get_id(row, KIND, "id")?,
        name: row.try_get("name")?,
        owner: get_id(row, KIND, "owner")?,
        indirect_owner: get_id(row, KIND, "indirect_owner")?,
        cards: get_ids(row, KIND, "cards")?,
        card_order: get_ids(row, KIND, "card_order")?,
        created_on: row.try_get("created_on")?,
        updated_on: row.try_get("updated_on")?,
    })
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(executor: E, list: &List) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO lists (id, name, owner, indirect_owner, cards, card_order, created_on, updated_on)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(list.id.to_string())
    .bind(&list.name)
    .bind(list.owner.to_string())
    .bind(list.indirect_owner.to_string())
    .bind(ids_json(&list.cards)?)
    .bind(ids_json(&list.card_order)?)
    .bind(list.created_on)
    .bind(list.updated_on)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn find<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> StoreResult<Option<List>> {
    let row = sqlx::query("SELECT * FROM lists WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Lists of a board, unsorted
pub async fn find_by_owner<'e, E: SqliteExecutor<'e>>(
    executor: E,
    owner: Uuid,
) -> StoreResult<Vec<List>> {
    let rows = sqlx::query("SELECT * FROM lists WHERE owner = ?")
        .bind(owner.to_string())
        .fetch_all(executor)
        .await?;

    rows.iter().map(from_row).collect()
}

pub async fn update<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    patch: &ListPatch,
    now: i64,
) -> StoreResult<Option<List>> {
    let row = sqlx::query(
        r#"
        UPDATE lists
        SET name = COALESCE(?, name),
            updated_on = MAX(updated_on + 1, ?)
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&patch.name)
    .bind(now)
    .bind(id.to_string())
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(from_row).transpose()
}
