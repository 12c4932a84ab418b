//! Ownership Engine
//!
//! Multi-document mutations of the ownership tree. Each public operation
//! runs in one SQLite transaction whose first statement is a write, so the
//! write lock is held for the whole read-modify-write sequence. Dropping the
//! transaction on any error rolls everything back.
//!
//! - **`cascade`** - create-and-link, delete-and-unlink
//! - **`reorder`** - moves inside and between containers

/// Create and delete with parent bookkeeping
pub mod cascade;

/// Moves inside and between containers
pub mod reorder;

pub use cascade::{create_and_link, delete_and_unlink, Deleted, NewChild};
pub use reorder::{move_child, MoveRequest};

use sqlx::SqliteExecutor;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store;
use crate::shared::access::{owns, Owned};
use crate::shared::models::{Entity, EntityKind};

/// Parse an id taken from the URL path
///
/// An id that isn't a UUID can't name any document, so it's `NotFound`.
pub fn path_id(kind: EntityKind, raw: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        tracing::warn!("Unparsable {} id in path: {:?}", kind, raw);
        BackendError::not_found(kind)
    })
}

/// Fail with `Unauthorized` unless `caller` is the root user of `doc`
pub fn require_owner<T: Owned + ?Sized>(caller: Uuid, doc: &T) -> Result<(), BackendError> {
    if owns(caller, doc) {
        Ok(())
    } else {
        tracing::warn!("User {} denied access to a {}", caller, doc.kind());
        Err(BackendError::unauthorized(doc.kind()))
    }
}

/// Load a document and check that `caller` owns it
///
/// A missing document is `NotFound`; someone else's is `Unauthorized`.
pub async fn load_owned<'e, E: SqliteExecutor<'e>>(
    executor: E,
    caller: Uuid,
    kind: EntityKind,
    id: Uuid,
) -> Result<Entity, BackendError> {
    let entity = store::get(executor, kind, id).await?;
    require_owner(caller, &entity)?;
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_id() {
        let id = Uuid::new_v4();
        assert_eq!(path_id(EntityKind::Board, &id.to_string()).unwrap(), id);
        assert!(matches!(
            path_id(EntityKind::Board, "not-a-uuid"),
            Err(BackendError::NotFound { .. })
        ));
    }
}
