//! Checklist rows

use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};
use uuid::Uuid;

use super::{get_id, StoreResult};
use crate::shared::models::{Checklist, EntityKind};

const KIND: EntityKind = EntityKind::Checklist;

/// Editable checklist fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistPatch {
    pub objective: Option<String>,
    pub is_completed: Option<bool>,
}

fn from_row(row: &SqliteRow) -> StoreResult<Checklist> {
    Ok(Checklist {
        id: get_id(row, KIND, "id")?,
        objective: row.try_get("objective")?,
        is_completed: row.try_get("is_completed")?,
        owner: get_id(row, KIND, "owner")?,
        indirect_owner: get_id(row, KIND, "indirect_owner")?,
        created_on: row.try_get("created_on")?,
        updated_on: row.try_get("updated_on")?,
    })
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    executor: E,
    checklist: &Checklist,
) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO checklists (id, objective, is_completed, owner, indirect_owner, created_on, updated_on)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(checklist.id.to_string())
    .bind(&checklist.objective)
    .bind(checklist.is_completed)
    .bind(checklist.owner.to_string())
    .bind(checklist.indirect_owner.to_string())
    .bind(checklist.created_on)
    .bind(checklist.updated_on)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn find<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> StoreResult<Option<Checklist>> {
    let row = sqlx::query("SELECT * FROM checklists WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(from_row).transpose()
}

/// Checklists of one card, unsorted
pub async fn find_by_owner<'e, E: SqliteExecutor<'e>>(
    executor: E,
    owner: Uuid,
) -> StoreResult<Vec<Checklist>> {
    let rows = sqlx::query("SELECT * FROM checklists WHERE owner = ?")
        .bind(owner.to_string())
        .fetch_all(executor)
        .await?;

    rows.iter().map(from_row).collect()
}

pub async fn update<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Uuid,
    patch: &ChecklistPatch,
    now: i64,
) -> StoreResult<Option<Checklist>> {
    let row = sqlx::query(
        r#"
        UPDATE checklists
        SET objective = COALESCE(?, objective),
            is_completed = COALESCE(?, is_completed),
            updated_on = MAX(updated_on + 1, ?)
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&patch.objective)
    .bind(patch.is_completed)
    .bind(now)
    .bind(id.to_string())
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(from_row).transpose()
}
