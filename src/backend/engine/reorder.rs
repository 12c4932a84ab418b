/**
 * Reorder Engine
 *
 * Persists a move computed by `shared::order::reconcile_move`. Inside one
 * container only the order array changes. Across containers the moved
 * document also changes `owner` and moves between the two child
 * collections. The caller must own both containers and the moved document.
 */

use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::engine::require_owner;
use crate::backend::error::BackendError;
use crate::backend::store::{self, children};
use crate::shared::models::{now_millis, EntityKind};
use crate::shared::error::SharedError;
use crate::shared::order::{reconcile_move, Placement};
use crate::shared::validation::Validate;

/// Body of the order-update endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// The document being moved
    pub target_id: Uuid,
    /// Source container
    pub src_id: Uuid,
    pub src_idx: usize,
    /// Destination container, may equal `src_id`
    pub des_id: Uuid,
    pub des_idx: usize,
}

impl MoveRequest {
    pub fn is_same_container(&self) -> bool {
        self.src_id == self.des_id
    }
}

/// Indices are checked against the stored order, not here
impl Validate for MoveRequest {
    fn validate(&self) -> Result<(), SharedError> {
        Ok(())
    }
}

/// Move one child of `container` kind documents
pub async fn move_child(
    pool: &SqlitePool,
    caller: Uuid,
    container: EntityKind,
    request: &MoveRequest,
) -> Result<(), BackendError> {
    let child_kind = container
        .child()
        .ok_or_else(|| BackendError::internal(format!("{} has no children to move", container)))?;

    let now = now_millis();
    let mut tx = pool.begin().await?;

    store::touch(&mut *tx, container, request.src_id, now).await?;
    let src = store::get(&mut *tx, container, request.src_id).await?;
    require_owner(caller, &src)?;

    let mut src_members = children::load(&mut *tx, container, request.src_id).await?;

    if request.is_same_container() {
        let reconciled = reconcile_move(
            request.target_id,
            Placement::new(request.src_id, request.src_idx, &src_members.order),
            Placement::new(request.des_id, request.des_idx, &src_members.order),
        )?;
        src_members.order = reconciled.src_order;
        children::save(&mut *tx, container, request.src_id, &src_members).await?;
    } else {
        store::touch(&mut *tx, container, request.des_id, now).await?;
        let des = store::get(&mut *tx, container, request.des_id).await?;
        require_owner(caller, &des)?;

        let mut des_members = children::load(&mut *tx, container, request.des_id).await?;
        let reconciled = reconcile_move(
            request.target_id,
            Placement::new(request.src_id, request.src_idx, &src_members.order),
            Placement::new(request.des_id, request.des_idx, &des_members.order),
        )?;

        let moved = store::get(&mut *tx, child_kind, request.target_id).await?;
        require_owner(caller, &moved)?;

        src_members.order = reconciled.src_order;
        src_members.children.retain(|id| *id != request.target_id);
        des_members.order = reconciled.des_order;
        if !des_members.children.contains(&request.target_id) {
            des_members.children.push(request.target_id);
        }

        store::set_owner(&mut *tx, child_kind, request.target_id, request.des_id, now).await?;
        children::save(&mut *tx, container, request.src_id, &src_members).await?;
        children::save(&mut *tx, container, request.des_id, &des_members).await?;
    }

    tx.commit().await?;

    tracing::info!(
        "Moved {} {} from {} {}[{}] to {}[{}]",
        child_kind,
        request.target_id,
        container,
        request.src_id,
        request.src_idx,
        request.des_id,
        request.des_idx
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_request_parses_camel_case_and_ignores_extras() {
        let target = Uuid::new_v4();
        let list = Uuid::new_v4();
        let body = serde_json::json!({
            "targetId": target,
            "srcId": list,
            "srcIdx": 0,
            "desId": list,
            "desIdx": 1,
            "srcOrder": [],
        });
        let request: MoveRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.target_id, target);
        assert_eq!(request.des_idx, 1);
        assert!(request.is_same_container());
    }

    #[test]
    fn test_negative_index_is_rejected() {
        let body = serde_json::json!({
            "targetId": Uuid::new_v4(),
            "srcId": Uuid::new_v4(),
            "srcIdx": -1,
            "desId": Uuid::new_v4(),
            "desIdx": 0,
        });
        assert!(serde_json::from_value::<MoveRequest>(body).is_err());
    }
}
