/**
 * Cascade Engine
 *
 * Creating a child links it into its parent's collection and order array;
 * deleting a document removes its whole subtree and unlinks it from its
 * parent. Both happen in one transaction.
 *
 * Descendants are found through their `owner` column level by level, then
 * deleted deepest level first (checklists, cards, lists, boards) before the
 * document itself.
 */

use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::engine::{load_owned, require_owner};
use crate::backend::error::BackendError;
use crate::backend::store::{self, children};
use crate::shared::access::Owned;
use crate::shared::models::{now_millis, Board, Card, Checklist, Entity, EntityKind, List};

/// Fields of a document about to be created under a parent
#[derive(Debug, Clone, PartialEq)]
pub enum NewChild {
    Board {
        name: String,
        color: String,
    },
    List {
        name: String,
    },
    Card {
        name: String,
        description: String,
        color: String,
    },
    Checklist {
        objective: String,
        is_completed: bool,
    },
}

impl NewChild {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Board { .. } => EntityKind::Board,
            Self::List { .. } => EntityKind::List,
            Self::Card { .. } => EntityKind::Card,
            Self::Checklist { .. } => EntityKind::Checklist,
        }
    }

    fn parent_kind(&self) -> EntityKind {
        match self {
            Self::Board { .. } => EntityKind::User,
            Self::List { .. } => EntityKind::Board,
            Self::Card { .. } => EntityKind::List,
            Self::Checklist { .. } => EntityKind::Card,
        }
    }

    /// Build the document with `owner = parent` and the given root user
    fn build(self, parent: Uuid, root: Uuid, now: i64) -> Entity {
        let id = Uuid::new_v4();
        match self {
            Self::Board { name, color } => Entity::Board(Board {
                id,
                name,
                color,
                owner: parent,
                lists: Vec::new(),
                list_order: Vec::new(),
                created_on: now,
                updated_on: now,
            }),
            Self::List { name } => Entity::List(List {
                id,
                name,
                owner: parent,
                indirect_owner: root,
                cards: Vec::new(),
                card_order: Vec::new(),
                created_on: now,
                updated_on: now,
            }),
            Self::Card {
                name,
                description,
                color,
            } => Entity::Card(Card {
                id,
                name,
                description,
                color,
                owner: parent,
                indirect_owner: root,
                checklists: Vec::new(),
                checklist_order: Vec::new(),
                created_on: now,
                updated_on: now,
            }),
            Self::Checklist {
                objective,
                is_completed,
            } => Entity::Checklist(Checklist {
                id,
                objective,
                is_completed,
                owner: parent,
                indirect_owner: root,
                created_on: now,
                updated_on: now,
            }),
        }
    }
}

/// Confirmation of a cascading delete
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub message: String,
    pub id: Uuid,
    pub kind: EntityKind,
    /// Descendants removed along with the document
    pub descendants: u64,
}

/// Create `child` under `parent_id` and link it into the parent
pub async fn create_and_link(
    pool: &SqlitePool,
    caller: Uuid,
    parent_id: Uuid,
    child: NewChild,
) -> Result<Entity, BackendError> {
    let parent_kind = child.parent_kind();
    let parent = load_owned(pool, caller, parent_kind, parent_id).await?;

    let now = now_millis();
    let mut tx = pool.begin().await?;

    store::touch(&mut *tx, parent_kind, parent_id, now).await?;

    let entity = child.build(parent_id, parent.root_user(), now);
    store::insert(&mut *tx, &entity).await?;
    children::push(&mut tx, parent_kind, parent_id, entity.id()).await?;

    tx.commit().await?;

    tracing::info!(
        "Created {} {} under {} {}",
        entity.kind(),
        entity.id(),
        parent_kind,
        parent_id
    );
    Ok(entity)
}

/// Delete a document, its whole subtree, and unlink it from its parent
pub async fn delete_and_unlink(
    pool: &SqlitePool,
    caller: Uuid,
    kind: EntityKind,
    id: Uuid,
) -> Result<Deleted, BackendError> {
    load_owned(pool, caller, kind, id).await?;

    let now = now_millis();
    let mut tx = pool.begin().await?;

    store::touch(&mut *tx, kind, id, now).await?;
    // re-read under the write lock; the owner may have moved meanwhile
    let entity = store::get(&mut *tx, kind, id).await?;
    require_owner(caller, &entity)?;

    let mut levels: Vec<(EntityKind, Vec<Uuid>)> = Vec::new();
    let mut level_kind = kind;
    let mut level_ids = vec![id];
    while let Some(child_kind) = level_kind.child() {
        let ids = store::child_ids(&mut *tx, child_kind, &level_ids).await?;
        if ids.is_empty() {
            break;
        }
        levels.push((child_kind, ids.clone()));
        level_kind = child_kind;
        level_ids = ids;
    }

    let mut descendants = 0;
    for (level_kind, ids) in levels.iter().rev() {
        descendants += store::delete_many(&mut *tx, *level_kind, ids).await?;
    }

    if let (Some(parent_kind), Some(parent_id)) = (kind.parent(), entity.owner()) {
        children::pull(&mut tx, parent_kind, parent_id, id).await?;
    }

    store::delete(&mut *tx, kind, id).await?;
    tx.commit().await?;

    tracing::info!(
        "Deleted {} {} with {} descendants",
        kind,
        id,
        descendants
    );
    Ok(Deleted {
        message: format!("{} {} successfully deleted", kind, entity.display_name()),
        id,
        kind,
        descendants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_child_kinds_follow_the_tree() {
        let children = [
            NewChild::Board {
                name: "b".into(),
                color: "c".into(),
            },
            NewChild::List { name: "l".into() },
            NewChild::Card {
                name: "c".into(),
                description: String::new(),
                color: "c".into(),
            },
            NewChild::Checklist {
                objective: "o".into(),
                is_completed: false,
            },
        ];
        for child in children {
            assert_eq!(child.kind().parent(), Some(child.parent_kind()));
        }
    }

    #[test]
    fn test_build_sets_owner_and_root() {
        let (parent, root) = (Uuid::new_v4(), Uuid::new_v4());
        let entity = NewChild::Card {
            name: "card".into(),
            description: "desc".into(),
            color: "blue".into(),
        }
        .build(parent, root, 42);

        match entity {
            Entity::Card(card) => {
                assert_eq!(card.owner, parent);
                assert_eq!(card.indirect_owner, root);
                assert_eq!(card.created_on, 42);
                assert!(card.checklists.is_empty());
            }
            other => panic!("expected a card, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_board_root_is_its_owner() {
        let user = Uuid::new_v4();
        let entity = NewChild::Board {
            name: "b".into(),
            color: "red".into(),
        }
        .build(user, user, 1);
        assert_eq!(entity.root_user(), user);
    }
}
