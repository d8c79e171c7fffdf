//! Arena-based document tree storage
//!
//! Nodes never point at each other. Every relationship is a `NodeId`
//! into one `Vec`, so parent back-references cost nothing and there is
//! no ownership cycle to fight.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<Option<DomNode>>
//!        [Root][Node1][None][Node3]...
//!                       ↑ freed slot, never reused
//! ```
//!
//! Freed slots stay `None` forever. A stale handle therefore fails with
//! `NodeNotFound` instead of silently aliasing a newer node.
//!
//! The arena is a dumb graph substrate: it keeps parent/child links
//! consistent and refuses cycles, but knows nothing about ids or the
//! emptiness marker.

use crate::error::{DomError, Result};
use crate::types::{DomNode, ElementData, NodeId, ROOT_TAG};
use smallvec::SmallVec;

/// Arena allocator for document nodes
#[derive(Debug, Clone)]
pub struct DomArena {
    /// All nodes ever allocated, `None` once dropped
    nodes: Vec<Option<DomNode>>,

    /// Root element, always slot 0
    root_id: NodeId,

    /// Number of occupied slots
    live: usize,
}

impl DomArena {
    /// Create an arena holding only a `body` root
    pub fn new() -> Self {
        Self::with_root(ROOT_TAG)
    }

    /// Create an arena whose root carries the given tag
    pub fn with_root(tag_name: &str) -> Self {
        Self::with_capacity(tag_name, 256)
    }

    /// Create arena with specific capacity
    pub fn with_capacity(tag_name: &str, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Some(DomNode::new_element(0, tag_name)));
        Self {
            nodes,
            root_id: 0,
            live: 1,
        }
    }

    fn alloc(&mut self, make: impl FnOnce(NodeId) -> DomNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(Some(make(node_id)));
        self.live += 1;
        node_id
    }

    /// Allocate a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(|id| DomNode::new_element(id, tag_name))
    }

    /// Allocate a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(|id| DomNode::new_text(id, text))
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .and_then(Option::as_ref)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .and_then(Option::as_mut)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.get(node_id).is_ok()
    }

    /// Element payload, failing for text nodes
    pub fn element(&self, node_id: NodeId) -> Result<&ElementData> {
        self.get(node_id)?
            .element()
            .ok_or(DomError::NotAnElement(node_id))
    }

    pub fn element_mut(&mut self, node_id: NodeId) -> Result<&mut ElementData> {
        self.get_mut(node_id)?
            .element_mut()
            .ok_or(DomError::NotAnElement(node_id))
    }

    /// Get root node ID
    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    /// Get root node
    pub fn root(&self) -> Result<&DomNode> {
        self.get(self.root_id)
    }

    pub fn is_root(&self, node_id: NodeId) -> bool {
        node_id == self.root_id
    }

    /// Number of live nodes, attached or not
    pub fn len(&self) -> usize {
        self.live
    }

    /// Always false: the root cannot be dropped
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Get parent of a node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(node_id)?.parent_id)
    }

    /// Get children of a node in document order
    pub fn children(&self, node_id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.get(node_id)?.children_ids)
    }

    /// Element children only, text skipped
    pub fn element_children(&self, node_id: NodeId) -> Result<SmallVec<[NodeId; 4]>> {
        let node = self.get(node_id)?;
        Ok(node
            .children_ids
            .iter()
            .copied()
            .filter(|&child| self.get(child).map(DomNode::is_element).unwrap_or(false))
            .collect())
    }

    /// Position among all of the parent's children, `None` when parentless
    pub fn index_in_parent(&self, node_id: NodeId) -> Result<Option<usize>> {
        let Some(parent_id) = self.get(node_id)?.parent_id else {
            return Ok(None);
        };
        Ok(self
            .get(parent_id)?
            .children_ids
            .iter()
            .position(|&c| c == node_id))
    }

    /// True if `node_id` is reachable from the root
    pub fn is_attached(&self, node_id: NodeId) -> bool {
        let mut current = Some(node_id);
        while let Some(id) = current {
            if id == self.root_id {
                return true;
            }
            current = match self.get(id) {
                Ok(node) => node.parent_id,
                Err(_) => return false,
            };
        }
        false
    }

    /// True if `ancestor` is `node_id` or lies on its parent chain
    pub fn is_ancestor(&self, ancestor: NodeId, node_id: NodeId) -> Result<bool> {
        let mut current = Some(node_id);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            current = self.get(id)?.parent_id;
        }
        Ok(false)
    }

    fn check_free(&self, node_id: NodeId) -> Result<()> {
        if node_id == self.root_id {
            return Err(DomError::RootBoundary("Cannot reparent root node"));
        }
        if self.get(node_id)?.parent_id.is_some() {
            return Err(DomError::AlreadyAttached(node_id));
        }
        Ok(())
    }

    /// Attach a parentless node at `index` among `parent`'s children
    pub fn insert_child(&mut self, parent_id: NodeId, index: usize, child_id: NodeId) -> Result<()> {
        self.element(parent_id)?;
        self.check_free(child_id)?;
        if self.is_ancestor(child_id, parent_id)? {
            return Err(DomError::WouldCycle {
                node: child_id,
                parent: parent_id,
            });
        }

        let len = self.get(parent_id)?.children_ids.len();
        if index > len {
            return Err(DomError::ChildIndexOutOfRange {
                parent: parent_id,
                index,
                len,
            });
        }

        self.get_mut(parent_id)?.children_ids.insert(index, child_id);
        self.get_mut(child_id)?.parent_id = Some(parent_id);
        Ok(())
    }

    /// Attach a parentless node as the last child
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<()> {
        let len = self.children(parent_id)?.len();
        self.insert_child(parent_id, len, child_id)
    }

    /// Unlink a node from its parent, returning the former parent and index
    ///
    /// The subtree stays allocated; call `drop_subtree` to free it.
    pub fn detach(&mut self, node_id: NodeId) -> Result<(NodeId, usize)> {
        if node_id == self.root_id {
            return Err(DomError::RootBoundary("Cannot detach root node"));
        }
        let parent_id = self.get(node_id)?.parent_id.ok_or(DomError::Detached(node_id))?;
        let index = self
            .get(parent_id)?
            .children_ids
            .iter()
            .position(|&c| c == node_id)
            .ok_or(DomError::Detached(node_id))?;

        self.get_mut(parent_id)?.children_ids.remove(index);
        self.get_mut(node_id)?.parent_id = None;
        Ok((parent_id, index))
    }

    /// Put parentless `new_id` exactly where `old_id` is; `old_id` ends up detached
    pub fn replace_child(&mut self, old_id: NodeId, new_id: NodeId) -> Result<()> {
        self.check_free(new_id)?;
        if self.is_ancestor(new_id, old_id)? {
            return Err(DomError::WouldCycle {
                node: new_id,
                parent: old_id,
            });
        }

        let (parent_id, index) = self.detach(old_id)?;
        self.insert_child(parent_id, index, new_id)
    }

    /// Detach every child of a node, returning them in their old order
    pub fn take_children(&mut self, node_id: NodeId) -> Result<SmallVec<[NodeId; 4]>> {
        let children = std::mem::take(&mut self.get_mut(node_id)?.children_ids);
        for &child_id in &children {
            self.get_mut(child_id)?.parent_id = None;
        }
        Ok(children)
    }

    /// Free a detached node and all of its descendants
    ///
    /// Returns the removed nodes so callers can purge derived indices.
    pub fn drop_subtree(&mut self, node_id: NodeId) -> Result<Vec<DomNode>> {
        if node_id == self.root_id {
            return Err(DomError::RootBoundary("Cannot remove root node"));
        }
        if self.get(node_id)?.parent_id.is_some() {
            return Err(DomError::AlreadyAttached(node_id));
        }

        let ids = self.descendants(node_id)?;
        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(node) = self.nodes.get_mut(id as usize).and_then(Option::take) {
                self.live -= 1;
                removed.push(node);
            }
        }
        Ok(removed)
    }

    /// Traverse tree depth-first (iterative, no recursion)
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Node and all descendants, pre-order
    pub fn descendants(&self, start_id: NodeId) -> Result<Vec<NodeId>> {
        let mut ids = Vec::new();
        self.traverse_df(start_id, |node| {
            ids.push(node.node_id);
            Ok(())
        })?;
        Ok(ids)
    }

    /// Every element reachable from the root, in document order
    pub fn elements_in_order(&self) -> Vec<NodeId> {
        self.find(|node| node.is_element())
    }

    /// Find attached nodes matching predicate, in document order
    pub fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        let mut found = Vec::new();
        // The root always exists, so the walk cannot fail on it.
        let _ = self.traverse_df(self.root_id, |node| {
            if predicate(node) {
                found.push(node.node_id);
            }
            Ok(())
        });
        found
    }

    /// Find all elements by tag name
    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.find(|node| node.tag_name().is_some_and(|t| t.eq_ignore_ascii_case(tag)))
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
