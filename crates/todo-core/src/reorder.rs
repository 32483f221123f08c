//! Reorder Utilities
//!
//! Array-move semantics for drag-and-drop and the merge of a reordered
//! visible subset back into the full list.

use std::collections::{HashMap, HashSet};

use crate::schema::{CachedTodo, TodoKey};

/// Remove the element at `from` and reinsert it at `to`.
///
/// Out-of-range indices leave the slice order unchanged.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    if from >= out.len() || to >= out.len() || from == to {
        return out;
    }
    let item = out.remove(from);
    out.insert(to, item);
    out
}

/// New display order after `dragged` is released over `over`.
///
/// `None` when the drop is a no-op: same item, or either key not displayed.
pub fn move_onto(displayed: &[CachedTodo], dragged: &TodoKey, over: &TodoKey) -> Option<Vec<CachedTodo>> {
    if dragged == over {
        return None;
    }
    let from = displayed.iter().position(|e| &e.key == dragged)?;
    let to = displayed.iter().position(|e| &e.key == over)?;
    Some(array_move(displayed, from, to))
}

/// New display order after `key` moves `offset` places (negative is up).
///
/// The item swaps in at its neighbour's slot, as if dropped onto it.
/// `None` when the key is not displayed or the move would leave the list.
pub fn move_by(displayed: &[CachedTodo], key: &TodoKey, offset: isize) -> Option<Vec<CachedTodo>> {
    let from = displayed.iter().position(|e| &e.key == key)?;
    let to = from.checked_add_signed(offset)?;
    let neighbour = displayed.get(to)?;
    move_onto(displayed, key, &neighbour.key)
}

/// Reorder `full` so the entries named in `visible` follow that order.
///
/// The visible entries are written back into the slots they already held;
/// entries not named stay where they were. Keys in `visible` that `full`
/// does not contain are ignored, so membership never changes.
pub fn reconcile(full: &[CachedTodo], visible: &[TodoKey]) -> Vec<CachedTodo> {
    let by_key: HashMap<&TodoKey, &CachedTodo> = full.iter().map(|e| (&e.key, e)).collect();
    let mut wanted: HashSet<&TodoKey> = HashSet::new();
    let ordered: Vec<&CachedTodo> = visible
        .iter()
        .filter_map(|key| by_key.get(key).copied())
        .filter(|&entry| wanted.insert(&entry.key))
        .collect();

    let mut ordered = ordered.into_iter();
    full.iter()
        .map(|entry| {
            if wanted.contains(&entry.key) {
                ordered.next().unwrap_or(entry).clone()
            } else {
                entry.clone()
            }
        })
        .collect()
}
