//! Cursor navigation
//!
//! One optional node reference and the moves over it. Two families of
//! moves exist on purpose and must not be merged:
//!
//! - sibling moves cycle inside one parent's element children and wrap
//!   at the ends without changing depth
//! - forward/backward walk every element of the document in pre-order
//!   and stop at the ends
//!
//! Text nodes are never a cursor target. No move mutates the tree.

use crate::error::{EditError, Result};
use dom::{DomArena, DomError, NodeId};

/// Next element sibling, no wrapping
pub fn next_element_sibling(arena: &DomArena, node_id: NodeId) -> Result<Option<NodeId>> {
    let Some(parent_id) = arena.parent(node_id)? else {
        return Ok(None);
    };
    let siblings = arena.element_children(parent_id)?;
    Ok(siblings
        .iter()
        .position(|&id| id == node_id)
        .and_then(|i| siblings.get(i + 1).copied()))
}

/// Previous element sibling, no wrapping
pub fn prev_element_sibling(arena: &DomArena, node_id: NodeId) -> Result<Option<NodeId>> {
    let Some(parent_id) = arena.parent(node_id)? else {
        return Ok(None);
    };
    let siblings = arena.element_children(parent_id)?;
    Ok(siblings
        .iter()
        .position(|&id| id == node_id)
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| siblings.get(i).copied()))
}

/// Last element of the subtree in pre-order
fn deepest_last(arena: &DomArena, node_id: NodeId) -> Result<NodeId> {
    let mut current = node_id;
    while let Some(&last) = arena.element_children(current)?.last() {
        current = last;
    }
    Ok(current)
}

/// Element after `node_id` in document order, `None` at the end
pub fn next_in_order(arena: &DomArena, node_id: NodeId) -> Result<Option<NodeId>> {
    if let Some(&first) = arena.element_children(node_id)?.first() {
        return Ok(Some(first));
    }

    let mut current = node_id;
    while !arena.is_root(current) {
        if let Some(next) = next_element_sibling(arena, current)? {
            return Ok(Some(next));
        }
        match arena.parent(current)? {
            Some(parent_id) => current = parent_id,
            None => break,
        }
    }
    Ok(None)
}

/// Element before `node_id` in document order, `None` at the root
pub fn prev_in_order(arena: &DomArena, node_id: NodeId) -> Result<Option<NodeId>> {
    if arena.is_root(node_id) {
        return Ok(None);
    }
    match prev_element_sibling(arena, node_id)? {
        Some(prev) => Ok(Some(deepest_last(arena, prev)?)),
        None => Ok(arena.parent(node_id)?),
    }
}

/// Last element of the whole document
pub fn last_in_order(arena: &DomArena) -> Result<NodeId> {
    deepest_last(arena, arena.root_id())
}

/// The single cursor: a node, or unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    current: Option<NodeId>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(node_id: NodeId) -> Self {
        Self {
            current: Some(node_id),
        }
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn is_set(&self) -> bool {
        self.current.is_some()
    }

    /// Place the cursor without any checks; callers guarantee validity
    pub fn set(&mut self, node_id: Option<NodeId>) {
        self.current = node_id;
    }

    /// Unset the cursor; always succeeds
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Current node, failing if unset
    pub fn selected(&self) -> Result<NodeId> {
        self.current.ok_or(EditError::NoSelection)
    }

    fn place(&mut self, node_id: NodeId) -> NodeId {
        self.current = Some(node_id);
        node_id
    }

    /// Current non-root node; `Ok(None)` when unset
    fn below_root(&self, arena: &DomArena) -> Result<Option<NodeId>> {
        match self.current {
            None => Ok(None),
            Some(id) if arena.is_root(id) => {
                Err(EditError::RootBoundary("Root node has no siblings"))
            }
            Some(id) => {
                arena.get(id)?;
                Ok(Some(id))
            }
        }
    }

    /// Element siblings of a non-root node and its position among them
    fn siblings(arena: &DomArena, node_id: NodeId) -> Result<(Vec<NodeId>, usize)> {
        let parent_id = arena.parent(node_id)?.ok_or(DomError::Detached(node_id))?;
        let siblings = arena.element_children(parent_id)?.into_vec();
        let index = siblings
            .iter()
            .position(|&id| id == node_id)
            .ok_or(DomError::NotAnElement(node_id))?;
        Ok((siblings, index))
    }

    /// First element child
    pub fn move_child(&mut self, arena: &DomArena) -> Result<NodeId> {
        let Some(current) = self.current else {
            return Ok(self.place(arena.root_id()));
        };
        let first = arena
            .element_children(current)?
            .first()
            .copied()
            .ok_or(EditError::NoChild)?;
        Ok(self.place(first))
    }

    /// Parent
    pub fn move_up(&mut self, arena: &DomArena) -> Result<NodeId> {
        let Some(current) = self.current else {
            return Ok(self.place(arena.root_id()));
        };
        if arena.is_root(current) {
            return Err(EditError::RootBoundary("Root node has no parent"));
        }
        let parent = arena.parent(current)?.ok_or(DomError::Detached(current))?;
        Ok(self.place(parent))
    }

    /// Next element sibling, wrapping to the first
    pub fn move_sibling_next(&mut self, arena: &DomArena) -> Result<NodeId> {
        let Some(current) = self.below_root(arena)? else {
            return Ok(self.place(arena.root_id()));
        };
        let (siblings, index) = Self::siblings(arena, current)?;
        Ok(self.place(siblings[(index + 1) % siblings.len()]))
    }

    /// Previous element sibling, wrapping to the last
    pub fn move_sibling_prev(&mut self, arena: &DomArena) -> Result<NodeId> {
        let Some(current) = self.below_root(arena)? else {
            return Ok(self.place(arena.root_id()));
        };
        let (siblings, index) = Self::siblings(arena, current)?;
        let prev = (index + siblings.len() - 1) % siblings.len();
        Ok(self.place(siblings[prev]))
    }

    /// First element sibling
    pub fn move_first(&mut self, arena: &DomArena) -> Result<NodeId> {
        let Some(current) = self.below_root(arena)? else {
            return Ok(self.place(arena.root_id()));
        };
        let (siblings, _) = Self::siblings(arena, current)?;
        Ok(self.place(siblings[0]))
    }

    /// Last element sibling
    pub fn move_last(&mut self, arena: &DomArena) -> Result<NodeId> {
        let Some(current) = self.below_root(arena)? else {
            return Ok(self.place(arena.root_id()));
        };
        let (siblings, _) = Self::siblings(arena, current)?;
        Ok(self.place(siblings[siblings.len() - 1]))
    }

    /// Next element in document order; stays put at the end
    pub fn move_forward(&mut self, arena: &DomArena) -> Result<NodeId> {
        let Some(current) = self.current else {
            return Ok(self.place(arena.root_id()));
        };
        match next_in_order(arena, current)? {
            Some(next) => Ok(self.place(next)),
            None => Ok(current),
        }
    }

    /// Previous element in document order; stays put at the root
    ///
    /// From unset, jumps to the last element of the document.
    pub fn move_backward(&mut self, arena: &DomArena) -> Result<NodeId> {
        let Some(current) = self.current else {
            let last = last_in_order(arena)?;
            return Ok(self.place(last));
        };
        match prev_in_order(arena, current)? {
            Some(prev) => Ok(self.place(prev)),
            None => Ok(current),
        }
    }
}
