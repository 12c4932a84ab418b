//! Board documents

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::access::Owned;
use crate::shared::models::{sort_by_order, EntityKind, ListDetail};

/// A board owned directly by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    /// Owning user
    pub owner: Uuid,
    /// Lists of this board, unordered
    pub lists: Vec<Uuid>,
    /// User-chosen sequence of `lists`
    pub list_order: Vec<Uuid>,
    pub created_on: i64,
    pub updated_on: i64,
}

impl Board {
    /// Attach the populated lists, sorted by `list_order`
    pub fn populate(self, mut lists: Vec<ListDetail>) -> BoardDetail {
        sort_by_order(&mut lists, &self.list_order, |list| list.id);
        BoardDetail {
            id: self.id,
            name: self.name,
            color: self.color,
            owner: self.owner,
            lists,
            list_order: self.list_order,
            created_on: self.created_on,
            updated_on: self.updated_on,
        }
    }
}

impl Owned for Board {
    fn kind(&self) -> EntityKind {
        EntityKind::Board
    }

    fn root_user(&self) -> Uuid {
        self.owner
    }
}

/// A board with its lists (and their cards) populated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetail {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub owner: Uuid,
    pub lists: Vec<ListDetail>,
    pub list_order: Vec<Uuid>,
    pub created_on: i64,
    pub updated_on: i64,
}
