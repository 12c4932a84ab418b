//! Checklist documents

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::access::Owned;
use crate::shared::models::EntityKind;

/// A checklist item on a card; leaf of the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub id: Uuid,
    pub objective: String,
    pub is_completed: bool,
    /// Owning card
    pub owner: Uuid,
    pub indirect_owner: Uuid,
    pub created_on: i64,
    pub updated_on: i64,
}

impl Owned for Checklist {
    fn kind(&self) -> EntityKind {
        EntityKind::Checklist
    }

    fn root_user(&self) -> Uuid {
        self.indirect_owner
    }
}
