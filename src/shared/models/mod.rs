//! Board Domain Models
//!
//! The five document kinds of the ownership tree and the helpers shared by
//! every layer that handles them.
//!
//! # Ownership Tree
//!
//! ```text
//! User ──owns──> Board ──owns──> List ──owns──> Card ──owns──> Checklist
//! ```
//!
//! Every document below `Board` also carries `indirect_owner`, the id of the
//! root `User`, so access checks never walk the chain.
//!
//! All timestamps are epoch milliseconds.

/// User documents
pub mod user;

/// Board documents
pub mod board;

/// List documents
pub mod list;

/// Card documents
pub mod card;

/// Checklist documents
pub mod checklist;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use board::{Board, BoardDetail};
pub use card::{Card, CardDetail};
pub use checklist::Checklist;
pub use list::{List, ListDetail};
pub use user::User;

/// The five entity kinds of the ownership tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Board,
    List,
    Card,
    Checklist,
}

impl EntityKind {
    /// Kind of the direct owner, `None` for the root `User`
    pub fn parent(self) -> Option<EntityKind> {
        match self {
            Self::User => None,
            Self::Board => Some(Self::User),
            Self::List => Some(Self::Board),
            Self::Card => Some(Self::List),
            Self::Checklist => Some(Self::Card),
        }
    }

    /// Kind of the owned children, `None` for the leaf `Checklist`
    pub fn child(self) -> Option<EntityKind> {
        match self {
            Self::User => Some(Self::Board),
            Self::Board => Some(Self::List),
            Self::List => Some(Self::Card),
            Self::Card => Some(Self::Checklist),
            Self::Checklist => None,
        }
    }

    /// Lowercase name used in messages and logs
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Board => "board",
            Self::List => "list",
            Self::Card => "card",
            Self::Checklist => "checklist",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Any document of the tree
///
/// Serializes as the inner document, so handlers can return it directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    User(User),
    Board(Board),
    List(List),
    Card(Card),
    Checklist(Checklist),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Board(_) => EntityKind::Board,
            Self::List(_) => EntityKind::List,
            Self::Card(_) => EntityKind::Card,
            Self::Checklist(_) => EntityKind::Checklist,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::User(user) => user.id,
            Self::Board(board) => board.id,
            Self::List(list) => list.id,
            Self::Card(card) => card.id,
            Self::Checklist(checklist) => checklist.id,
        }
    }

    /// Direct owner, `None` for a `User`
    pub fn owner(&self) -> Option<Uuid> {
        match self {
            Self::User(_) => None,
            Self::Board(board) => Some(board.owner),
            Self::List(list) => Some(list.owner),
            Self::Card(card) => Some(card.owner),
            Self::Checklist(checklist) => Some(checklist.owner),
        }
    }

    /// Display name used in delete confirmations
    pub fn display_name(&self) -> &str {
        match self {
            Self::User(user) => &user.username,
            Self::Board(board) => &board.name,
            Self::List(list) => &list.name,
            Self::Card(card) => &card.name,
            Self::Checklist(checklist) => &checklist.objective,
        }
    }

    pub fn updated_on(&self) -> i64 {
        match self {
            Self::User(user) => user.updated_on,
            Self::Board(board) => board.updated_on,
            Self::List(list) => list.updated_on,
            Self::Card(card) => card.updated_on,
            Self::Checklist(checklist) => checklist.updated_on,
        }
    }
}

impl crate::shared::access::Owned for Entity {
    fn kind(&self) -> EntityKind {
        Entity::kind(self)
    }

    fn root_user(&self) -> Uuid {
        match self {
            Self::User(user) => user.root_user(),
            Self::Board(board) => board.root_user(),
            Self::List(list) => list.root_user(),
            Self::Card(card) => card.root_user(),
            Self::Checklist(checklist) => checklist.root_user(),
        }
    }
}

/// Sort `items` by the position of their id in `order`
///
/// Items missing from `order` keep their relative position after the ordered
/// ones.
pub(crate) fn sort_by_order<T>(items: &mut [T], order: &[Uuid], id: impl Fn(&T) -> Uuid) {
    items.sort_by_key(|item| {
        let item_id = id(item);
        order
            .iter()
            .position(|candidate| *candidate == item_id)
            .unwrap_or(usize::MAX)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_chain_is_symmetric() {
        for kind in [
            EntityKind::User,
            EntityKind::Board,
            EntityKind::List,
            EntityKind::Card,
            EntityKind::Checklist,
        ] {
            if let Some(child) = kind.child() {
                assert_eq!(child.parent(), Some(kind));
            }
            if let Some(parent) = kind.parent() {
                assert_eq!(parent.child(), Some(kind));
            }
        }
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&EntityKind::Checklist).unwrap();
        assert_eq!(json, "\"checklist\"");
    }

    #[test]
    fn test_sort_by_order_puts_unknown_last() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let mut items = vec![c, a, b];
        sort_by_order(&mut items, &[b, a], |id| *id);
        assert_eq!(items, vec![b, a, c]);
    }
}
