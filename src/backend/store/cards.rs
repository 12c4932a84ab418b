//! Card rows

use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};
use uuid::Uuid;

use super::{get_id, get_ids, ids_json, StoreResult};
use crate::shared::models::{Card, EntityKind};

const KIND: EntityKind = EntityKind::Card;

/// Editable card fields
///
/// The owning list is not editable here; cards change lists only through a
/// move.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

fn from_row(row: &SqliteRow) -> StoreResult<Card> {
    Ok(Card {
        id: get_id(row, KIND, "id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        color: row.try_get("color")?,
        owner: get_id(row, KIND, "owner")?,
        indirect_owner: get_id(row, KIND, "indirect_owner")?,
        checklists: get_ids(row, KIND, "checklists")?,
        checklist_order: get_ids(row, KIND, "checklist_order")?,
        created_on: row.try_get("created_on")?,
        updated_on: row.try_get("updated_on")?,
    })
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(executor: E, card: &Card) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO cards (
            id, name, description, color, owner, indirect_owner,
            checklists, checklist_order, created_on, updated_on
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(card.id.to_string())
    .bind(&card.name)
    .bind(&card.description)
    .bind(&card.color)
    .bind(card.owner.to_string())
    .bind(card.indirect_owner.to_string())
    .bind(ids_json(&card.checklists)?)
    .bind(ids_json(&card.checklist_order)?)
    .bind(card.created_on)
    .bind(card.updated_on)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn find<'e, E: SqliteExecutor<'e>>(executor: E, id: Uuid) -> StoreResult<Option<Card>> {
    let row = sqlx::query("SELECT * FROM cards WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Cards of one list, unsorted
pub async fn find_by_owner<'e, E: SqliteExecutor<'e>>(
    executor: E,
    owner: Uuid,
) -> StoreResult<Vec<Card>> {
    find_by_owners(executor, &[owner]).await
}

/// Cards of several lists at once, for populating a board
pub async fn find_by_owners<'e, E: SqliteExecutor<'e>>(
    executor: E,
    owners: &[Uuid],
) -> StoreResult<Vec<Card>> {
    if owners.is_empty() {
        return Ok(Vec::new());
    }
    let rows = sqlx::query("SELECT * FROM cards WHERE owner IN (SELECT value FROM json_each(?))")
        .bind(ids_json(owners)?)
        .fetch_all(executor)
        .await?;

    rows.iter().map(from_row).collect()
}

pub async fn update<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    patch: &CardPatch,
    now: i64,
) -> StoreResult<Option<Card>> {
    let row = sqlx::query(
        r#"
        UPDATE cards
        SET name = COALESCE(?, name),
            description = COALESCE(?, description),
            color = COALESCE(?, color),
            updated_on = MAX(updated_on + 1, ?)
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&patch.name)
    .bind(&patch.description)
    .bind(&patch.color)
    .bind(now)
    .bind(id.to_string())
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(from_row).transpose()
}
