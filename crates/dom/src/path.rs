//! Index paths
//!
//! A node's address as child positions from the root, most significant
//! first. Positions count every child, text included. A path survives
//! edits that swap node identity in place (retag) as long as the
//! structure around it is unchanged, which is what an undo log wants.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::NodeId;
use smallvec::SmallVec;

/// Child positions from the root; the root itself is the empty path
pub type IndexPath = SmallVec<[usize; 8]>;

/// Address of an attached node
pub fn to_path(arena: &DomArena, node_id: NodeId) -> Result<IndexPath> {
    let mut path = IndexPath::new();
    let mut current = node_id;

    while !arena.is_root(current) {
        let parent_id = arena.parent(current)?.ok_or(DomError::Detached(node_id))?;
        let index = arena
            .index_in_parent(current)?
            .ok_or(DomError::Detached(node_id))?;
        path.push(index);
        current = parent_id;
    }

    path.reverse();
    Ok(path)
}

/// Resolve a path; `None` if any step is out of range
pub fn from_path(arena: &DomArena, path: &[usize]) -> Option<NodeId> {
    let mut current = arena.root_id();
    for &index in path {
        current = *arena.children(current).ok()?.get(index)?;
    }
    Some(current)
}
