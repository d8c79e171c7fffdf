//! Document context
//!
//! Owns the arena together with its derived id registry so the two are
//! always handed around as one unit. Emptiness markers live on the nodes
//! themselves.

use crate::arena::DomArena;
use crate::emptiness;
use crate::error::Result;
use crate::path::{self, IndexPath};
use crate::registry::IdRegistry;
use crate::types::{DomNode, NodeData, NodeId, EMPTY_CLASS, ROOT_TAG};

#[derive(Debug, Clone)]
pub struct Document {
    arena: DomArena,
    ids: IdRegistry,
}

impl Document {
    /// A document holding only an empty `body` root
    pub fn new() -> Self {
        Self::with_root(ROOT_TAG)
    }

    pub fn with_root(tag_name: &str) -> Self {
        let mut arena = DomArena::with_root(tag_name);
        let root = arena.root_id();
        if let Ok(el) = arena.element_mut(root) {
            el.add_class(EMPTY_CLASS);
        }
        Self {
            arena,
            ids: IdRegistry::new(),
        }
    }

    /// Adopt a raw tree: index its ids and mark every empty element
    ///
    /// Empty ids are dropped so that every stored id is a registered one.
    pub fn from_arena(mut arena: DomArena) -> Result<Self> {
        for node_id in arena.find(|node| node.id() == Some("")) {
            arena.element_mut(node_id)?.id = None;
        }
        let ids = IdRegistry::rebuild(&arena)?;
        emptiness::mark_all(&mut arena)?;
        Ok(Self { arena, ids })
    }

    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    pub fn ids(&self) -> &IdRegistry {
        &self.ids
    }

    /// Both halves at once, for edit code that must keep them in step
    pub fn parts_mut(&mut self) -> (&mut DomArena, &mut IdRegistry) {
        (&mut self.arena, &mut self.ids)
    }

    pub fn root_id(&self) -> NodeId {
        self.arena.root_id()
    }

    pub fn is_root(&self, node_id: NodeId) -> bool {
        self.arena.is_root(node_id)
    }

    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.arena.get(node_id)
    }

    /// Element owning an id
    pub fn lookup_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id)
    }

    pub fn to_path(&self, node_id: NodeId) -> Result<IndexPath> {
        path::to_path(&self.arena, node_id)
    }

    pub fn from_path(&self, path: &[usize]) -> Option<NodeId> {
        path::from_path(&self.arena, path)
    }

    /// All descendant text in document order, outer whitespace trimmed
    pub fn text_content(&self, node_id: NodeId) -> Result<String> {
        let mut text = String::new();
        self.arena.traverse_df(node_id, |node| {
            if let NodeData::Text(t) = &node.data {
                text.push_str(t);
            }
            Ok(())
        })?;
        Ok(text.trim().to_string())
    }

    /// Re-derive ids and emptiness from scratch and compare with what is stored
    pub fn is_consistent(&self) -> bool {
        let Ok(fresh) = IdRegistry::rebuild(&self.arena) else {
            return false;
        };
        if fresh.len() != self.ids.len()
            || fresh.iter().any(|(id, owner)| self.ids.get(id) != Some(owner))
        {
            return false;
        }

        self.arena.elements_in_order().into_iter().all(|node_id| {
            match (
                emptiness::compute_empty(&self.arena, node_id),
                self.arena.element(node_id),
            ) {
                (Ok(empty), Ok(el)) => el.is_marked_empty() == empty,
                _ => false,
            }
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
