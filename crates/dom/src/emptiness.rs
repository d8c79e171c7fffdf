//! Emptiness tracking
//!
//! An element is "empty" when it has no element children and every text
//! child is whitespace only. The result is cached as the reserved
//! `empty` class so styling can query it without walking children.
//!
//! Nothing here is incremental. Whoever changes a child list calls
//! `refresh_empty` on the affected element before returning.

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{NodeData, NodeId, EMPTY_CLASS};

/// Whitespace-only (or zero-length) text
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Compute emptiness from the current children, ignoring the cached marker
pub fn compute_empty(arena: &DomArena, node_id: NodeId) -> Result<bool> {
    arena.element(node_id)?;

    for &child_id in arena.children(node_id)? {
        match &arena.get(child_id)?.data {
            NodeData::Element(_) => return Ok(false),
            NodeData::Text(text) if !is_blank(text) => return Ok(false),
            NodeData::Text(_) => {}
        }
    }

    Ok(true)
}

/// Recompute and store the marker; returns the new state
pub fn refresh_empty(arena: &mut DomArena, node_id: NodeId) -> Result<bool> {
    let empty = compute_empty(arena, node_id)?;
    arena.element_mut(node_id)?.toggle_class(EMPTY_CLASS, empty);
    Ok(empty)
}

/// Refresh every attached element, children before parents
///
/// Returns how many elements ended up marked.
pub fn mark_all(arena: &mut DomArena) -> Result<usize> {
    let mut marked = 0;
    // Reverse pre-order visits every child before its parent.
    for node_id in arena.elements_in_order().into_iter().rev() {
        if refresh_empty(arena, node_id)? {
            marked += 1;
        }
    }
    Ok(marked)
}
