//! # Reorder Engine
//!
//! Drag-reorder semantics for an ordered sequence: remove the element at
//! `from`, then insert it at `to` in the shortened sequence. `from` is an
//! index into the sequence before removal; `to` is the insertion point after
//! removal. Moving index 2 to 0 in `[a, b, c, d]` yields `[c, a, b, d]`.

use thiserror::Error;

/// Index outside `[0, len)`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("index {index} out of range for sequence of length {len}")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Move the element at `from` so it ends up at position `to`
///
/// Both indices are validated against `[0, len)` before anything is touched;
/// on error the sequence is unchanged. `from == to` is a no-op.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), IndexOutOfRange> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(IndexOutOfRange { index, len });
        }
    }

    if from == to {
        return Ok(());
    }

    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}
