//! Batch removal and reordering by position.
//!
//! Positions are always resolved against the sequence as it was before the
//! operation started. Out-of-range positions never panic; they are skipped
//! and handed back so the caller can decide whether to complain.

use std::collections::BTreeSet;

/// Result of a batch removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal<T> {
    /// Removed elements, in their original order.
    pub removed: Vec<T>,
    /// Requested positions that did not exist, ascending and deduplicated.
    pub ignored: Vec<usize>,
}

/// Splits requested positions into the in-range set and the out-of-range rest.
pub fn partition_offsets(offsets: &[usize], len: usize) -> (BTreeSet<usize>, Vec<usize>) {
    let mut valid = BTreeSet::new();
    let mut ignored = BTreeSet::new();
    for &offset in offsets {
        if offset < len {
            valid.insert(offset);
        } else {
            ignored.insert(offset);
        }
    }
    (valid, ignored.into_iter().collect())
}

pub fn remove_at_offsets<T>(items: &mut Vec<T>, offsets: &[usize]) -> Removal<T> {
    let (valid, ignored) = partition_offsets(offsets, items.len());
    if valid.is_empty() {
        return Removal { removed: Vec::new(), ignored };
    }

    let mut removed = Vec::with_capacity(valid.len());
    let mut kept = Vec::with_capacity(items.len() - valid.len());
    for (index, item) in items.drain(..).enumerate() {
        if valid.contains(&index) {
            removed.push(item);
        } else {
            kept.push(item);
        }
    }
    *items = kept;

    Removal { removed, ignored }
}

/// Moves the elements at `offsets` so they sit, as one block in their
/// original relative order, just before the element that was at
/// `destination`. A `destination` of `len` (or beyond) appends.
///
/// Returns the ignored out-of-range offsets.
pub fn move_offsets<T>(items: &mut Vec<T>, offsets: &[usize], destination: usize) -> Vec<usize> {
    let (valid, ignored) = partition_offsets(offsets, items.len());
    if valid.is_empty() {
        return ignored;
    }

    let destination = destination.min(items.len());
    let insert_at = (0..destination).filter(|i| !valid.contains(i)).count();

    let mut moved = Vec::with_capacity(valid.len());
    let mut rest = Vec::with_capacity(items.len());
    for (index, item) in items.drain(..).enumerate() {
        if valid.contains(&index) {
            moved.push(item);
        } else {
            rest.push(item);
        }
    }

    let tail = rest.split_off(insert_at);
    rest.extend(moved);
    rest.extend(tail);
    *items = rest;

    ignored
}
