//! Ownership-chain authorization
//!
//! A caller may touch a document only when it is the root user of that
//! document's owner chain. Every document knows its root directly (the board's
//! `owner`, or `indirect_owner` further down), so the check never walks the
//! chain.

use std::fmt::Display;
use uuid::Uuid;

use crate::shared::models::EntityKind;

/// Documents that belong to a root user
pub trait Owned {
    fn kind(&self) -> EntityKind;

    /// Id of the user at the top of the owner chain
    fn root_user(&self) -> Uuid;
}

/// True iff `caller` and `owner` denote the same user
///
/// Both sides are normalized first: values that parse as UUIDs are compared
/// as UUIDs (so casing and hyphenation don't matter), anything else is
/// compared trimmed and lowercased. Blank values never match.
pub fn authorize(caller: impl Display, owner: impl Display) -> bool {
    let caller = caller.to_string();
    let owner = owner.to_string();
    let (caller, owner) = (caller.trim(), owner.trim());

    if caller.is_empty() || owner.is_empty() {
        return false;
    }

    match (Uuid::parse_str(caller), Uuid::parse_str(owner)) {
        (Ok(a), Ok(b)) => a == b,
        _ => caller.to_lowercase() == owner.to_lowercase(),
    }
}

/// True iff `caller` is the root user of `doc`
pub fn owns<T: Owned + ?Sized>(caller: Uuid, doc: &T) -> bool {
    authorize(caller, doc.root_user())
}
