//! Parent-side child collections
//!
//! Every container keeps its children twice: an unordered collection and an
//! order array. Both are always read and written together so they stay equal
//! as sets. Users only have the `boards` collection; their order is the
//! collection itself.

use sqlx::{SqliteConnection, SqliteExecutor};
use uuid::Uuid;

use super::{get_ids, ids_json, table, StoreError, StoreResult};
use crate::shared::models::EntityKind;

struct ChildColumns {
    children: &'static str,
    order: Option<&'static str>,
}

fn columns(parent: EntityKind) -> StoreResult<ChildColumns> {
    let (children, order) = match parent {
        EntityKind::User => ("boards", None),
        EntityKind::Board => ("lists", Some("list_order")),
        EntityKind::List => ("cards", Some("card_order")),
        EntityKind::Card => ("checklists", Some("checklist_order")),
        EntityKind::Checklist => return Err(StoreError::Leaf { kind: parent }),
    };
    Ok(ChildColumns { children, order })
}

/// Child collection and order array of one container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    pub children: Vec<Uuid>,
    pub order: Vec<Uuid>,
}

impl Membership {
    /// Append `id` to both sides
    pub fn link(&mut self, id: Uuid) {
        if !self.children.contains(&id) {
            self.children.push(id);
        }
        if !self.order.contains(&id) {
            self.order.push(id);
        }
    }

    /// Remove `id` from both sides; returns whether it was present
    pub fn unlink(&mut self, id: Uuid) -> bool {
        let before = self.children.len() + self.order.len();
        self.children.retain(|child| *child != id);
        self.order.retain(|child| *child != id);
        before != self.children.len() + self.order.len()
    }
}

pub async fn load<'e, E: SqliteExecutor<'e>>(
    executor: E,
    parent: EntityKind,
    id: Uuid,
) -> StoreResult<Membership> {
    let cols = columns(parent)?;
    let sql = format!(
        "SELECT {} AS children, {} AS child_order FROM {} WHERE id = ?",
        cols.children,
        cols.order.unwrap_or(cols.children),
        table(parent)
    );
    let row = sqlx::query(&sql)
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?
        .ok_or(StoreError::NotFound { kind: parent, id })?;

    Ok(Membership {
        children: get_ids(&row, parent, "children")?,
        order: get_ids(&row, parent, "child_order")?,
    })
}

pub async fn save<'e, E: SqliteExecutor<'e>>(
    executor: E,
    parent: EntityKind,
    id: Uuid,
    membership: &Membership,
) -> StoreResult<()> {
    let cols = columns(parent)?;
    let result = match cols.order {
        Some(order) => {
            let sql = format!(
                "UPDATE {} SET {} = ?, {} = ? WHERE id = ?",
                table(parent),
                cols.children,
                order
            );
            sqlx::query(&sql)
                .bind(ids_json(&membership.children)?)
                .bind(ids_json(&membership.order)?)
                .bind(id.to_string())
                .execute(executor)
                .await?
        }
        None => {
            let sql = format!("UPDATE {} SET {} = ? WHERE id = ?", table(parent), cols.children);
            sqlx::query(&sql)
                .bind(ids_json(&membership.children)?)
                .bind(id.to_string())
                .execute(executor)
                .await?
        }
    };

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound { kind: parent, id });
    }
    Ok(())
}

/// Link `child` into the parent's collection and order
pub async fn push(
    conn: &mut SqliteConnection,
    parent: EntityKind,
    parent_id: Uuid,
    child: Uuid,
) -> StoreResult<()> {
    let mut membership = load(&mut *conn, parent, parent_id).await?;
    membership.link(child);
    save(&mut *conn, parent, parent_id, &membership).await
}

/// Unlink `child` from the parent; a missing parent is not an error
///
/// Returns whether the parent existed.
pub async fn pull(
    conn: &mut SqliteConnection,
    parent: EntityKind,
    parent_id: Uuid,
    child: Uuid,
) -> StoreResult<bool> {
    let mut membership = match load(&mut *conn, parent, parent_id).await {
        Ok(membership) => membership,
        Err(StoreError::NotFound { .. }) => {
            tracing::warn!("Parent {} {} already gone while unlinking {}", parent, parent_id, child);
            return Ok(false);
        }
        Err(err) => return Err(err),
    };
    if membership.unlink(child) {
        save(&mut *conn, parent, parent_id, &membership).await?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_is_idempotent() {
        let id = Uuid::new_v4();
        let mut membership = Membership::default();
        membership.link(id);
        membership.link(id);
        assert_eq!(membership.children, vec![id]);
        assert_eq!(membership.order, vec![id]);
    }

    #[test]
    fn test_unlink_removes_both_sides() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut membership = Membership {
            children: vec![a, b],
            order: vec![b, a],
        };
        assert!(membership.unlink(a));
        assert_eq!(membership.children, vec![b]);
        assert_eq!(membership.order, vec![b]);
        assert!(!membership.unlink(a));
    }

    #[test]
    fn test_checklist_is_a_leaf() {
        assert!(matches!(
            columns(EntityKind::Checklist),
            Err(StoreError::Leaf { kind: EntityKind::Checklist })
        ));
    }
}
