//! List documents

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::access::Owned;
use crate::shared::models::{sort_by_order, Card, EntityKind};

/// A list inside a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Uuid,
    pub name: String,
    /// Owning board
    pub owner: Uuid,
    /// Root user, fixed at creation
    pub indirect_owner: Uuid,
    pub cards: Vec<Uuid>,
    pub card_order: Vec<Uuid>,
    pub created_on: i64,
    pub updated_on: i64,
}

impl List {
    /// Attach the populated cards, sorted by `card_order`
    pub fn populate(self, mut cards: Vec<Card>) -> ListDetail {
        sort_by_order(&mut cards, &self.card_order, |card| card.id);
        ListDetail {
            id: self.id,
            name: self.name,
            owner: self.owner,
            indirect_owner: self.indirect_owner,
            cards,
            card_order: self.card_order,
            created_on: self.created_on,
            updated_on: self.updated_on,
        }
    }
}

impl Owned for List {
    fn kind(&self) -> EntityKind {
        EntityKind::List
    }

    fn root_user(&self) -> Uuid {
        self.indirect_owner
    }
}

/// A list with its cards populated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDetail {
    pub id: Uuid,
    pub name: String,
    pub owner: Uuid,
    pub indirect_owner: Uuid,
    pub cards: Vec<Card>,
    pub card_order: Vec<Uuid>,
    pub created_on: i64,
    pub updated_on: i64,
}
