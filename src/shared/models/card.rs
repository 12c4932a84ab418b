//! Card documents

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::access::Owned;
use crate::shared::models::{sort_by_order, Checklist, EntityKind};

/// A card inside a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub color: String,
    /// Owning list; changes only through a cross-list move
    pub owner: Uuid,
    pub indirect_owner: Uuid,
    pub checklists: Vec<Uuid>,
    pub checklist_order: Vec<Uuid>,
    pub created_on: i64,
    pub updated_on: i64,
}

impl Card {
    /// Attach the populated checklists, sorted by `checklist_order`
    pub fn populate(self, mut checklists: Vec<Checklist>) -> CardDetail {
        sort_by_order(&mut checklists, &self.checklist_order, |checklist| checklist.id);
        CardDetail {
            id: self.id,
            name: self.name,
            description: self.description,
            color: self.color,
            owner: self.owner,
            indirect_owner: self.indirect_owner,
            checklists,
            checklist_order: self.checklist_order,
            created_on: self.created_on,
            updated_on: self.updated_on,
        }
    }
}

impl Owned for Card {
    fn kind(&self) -> EntityKind {
        EntityKind::Card
    }

    fn root_user(&self) -> Uuid {
        self.indirect_owner
    }
}

/// A card with its checklists populated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub color: String,
    pub owner: Uuid,
    pub indirect_owner: Uuid,
    pub checklists: Vec<Checklist>,
    pub checklist_order: Vec<Uuid>,
    pub created_on: i64,
    pub updated_on: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checklist(id: Uuid, owner: Uuid) -> Checklist {
        Checklist {
            id,
            objective: "step".to_string(),
            is_completed: false,
            owner,
            indirect_owner: Uuid::nil(),
            created_on: 0,
            updated_on: 0,
        }
    }

    #[test]
    fn test_populate_follows_checklist_order() {
        let card_id = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let card = Card {
            id: card_id,
            name: "card".to_string(),
            description: String::new(),
            color: "red".to_string(),
            owner: Uuid::new_v4(),
            indirect_owner: Uuid::new_v4(),
            checklists: vec![first, second],
            checklist_order: vec![second, first],
            created_on: 0,
            updated_on: 0,
        };

        let detail = card.populate(vec![checklist(first, card_id), checklist(second, card_id)]);
        let ids: Vec<Uuid> = detail.checklists.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second, first]);
    }
}
