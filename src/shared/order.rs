//! Order reconciliation
//!
//! Computes the new order arrays when one item is dragged from position
//! `src.index` of one container to position `des.index` of the same or
//! another container. Pure: persistence and ownership transfer happen in the
//! backend reorder engine.

use thiserror::Error;
use uuid::Uuid;

/// Where a moved item comes from or goes to
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    /// Id of the container document
    pub container: Uuid,
    /// Position inside `order`
    pub index: usize,
    /// Current order array of the container
    pub order: &'a [Uuid],
}

impl<'a> Placement<'a> {
    pub fn new(container: Uuid, index: usize, order: &'a [Uuid]) -> Self {
        Self {
            container,
            index,
            order,
        }
    }
}

/// Result of a successful reconciliation
///
/// For a move inside one container both arrays are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledOrder {
    pub src_order: Vec<Uuid>,
    pub des_order: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("source index {index} is out of bounds for an order of length {len}")]
    SourceOutOfBounds { index: usize, len: usize },

    #[error("destination index {index} is out of bounds for an order of length {len}")]
    DestinationOutOfBounds { index: usize, len: usize },

    /// The item at the source index is not the one being moved
    #[error("order is stale: {moved} is not at source index {index}")]
    Stale { moved: Uuid, index: usize },
}

/// Compute the order arrays after moving `moved` from `src` to `des`
///
/// Indices are never clamped. Inside one container the destination may be
/// any existing position; across containers it may also be one past the end.
pub fn reconcile_move(
    moved: Uuid,
    src: Placement<'_>,
    des: Placement<'_>,
) -> Result<ReconciledOrder, OrderError> {
    if src.index >= src.order.len() {
        return Err(OrderError::SourceOutOfBounds {
            index: src.index,
            len: src.order.len(),
        });
    }
    if src.order[src.index] != moved {
        return Err(OrderError::Stale {
            moved,
            index: src.index,
        });
    }

    let mut src_order = src.order.to_vec();

    if src.container == des.container {
        // the removed slot shrinks the array by one before re-insertion
        if des.index >= src_order.len() {
            return Err(OrderError::DestinationOutOfBounds {
                index: des.index,
                len: src_order.len(),
            });
        }
        src_order.remove(src.index);
        src_order.insert(des.index, moved);
        return Ok(ReconciledOrder {
            des_order: src_order.clone(),
            src_order,
        });
    }

    if des.index > des.order.len() {
        return Err(OrderError::DestinationOutOfBounds {
            index: des.index,
            len: des.order.len(),
        });
    }

    src_order.remove(src.index);
    let mut des_order = des.order.to_vec();
    des_order.insert(des.index, moved);

    Ok(ReconciledOrder {
        src_order,
        des_order,
    })
}
