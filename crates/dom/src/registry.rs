//! Id registry
//!
//! Maps identifier strings to the element that owns them. It must always
//! equal the set of ids actually present in the attached tree; every
//! edit that adds, moves or drops an id goes through here.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId};
use ahash::AHashMap;

/// Ids are non-empty and contain no whitespace
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.chars().any(char::is_whitespace)
}

#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
    ids: AHashMap<String, NodeId>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the attached tree and index every id
    ///
    /// An empty id counts as no id. Fails on the first malformed id or
    /// the first id seen twice.
    pub fn rebuild(arena: &DomArena) -> Result<Self> {
        let mut registry = Self::new();
        for node_id in arena.find(|node| node.id().is_some_and(|id| !id.is_empty())) {
            if let Some(id) = arena.get(node_id)?.id() {
                if !is_valid_id(id) {
                    return Err(DomError::InvalidId(id.to_string()));
                }
                registry.insert(id, node_id)?;
            }
        }
        Ok(registry)
    }

    /// Owner of an id
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Claim an id for a node; re-claiming by the same owner is fine
    pub fn insert(&mut self, id: &str, node_id: NodeId) -> Result<()> {
        match self.ids.get(id) {
            Some(&owner) if owner != node_id => Err(DomError::DuplicateId(id.to_string())),
            _ => {
                self.ids.insert(id.to_string(), node_id);
                Ok(())
            }
        }
    }

    /// Release an id, returning its previous owner
    pub fn remove(&mut self, id: &str) -> Option<NodeId> {
        self.ids.remove(id)
    }

    /// Hand an existing id to a replacement node
    pub fn reassign(&mut self, id: &str, node_id: NodeId) {
        self.ids.insert(id.to_string(), node_id);
    }

    /// Drop every id owned by one of `removed`
    pub fn purge(&mut self, removed: &[DomNode]) -> usize {
        let mut purged = 0;
        for node in removed {
            if let Some(id) = node.id() {
                if self.ids.get(id) == Some(&node.node_id) {
                    self.ids.remove(id);
                    purged += 1;
                }
            }
        }
        purged
    }

    /// Iterator over (id, owner) pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.ids.iter().map(|(id, &node_id)| (id.as_str(), node_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_duplicate() {
        let mut registry = IdRegistry::new();
        registry.insert("foo", 1).unwrap();
        registry.insert("foo", 1).unwrap();
        assert_eq!(
            registry.insert("foo", 2).unwrap_err(),
            DomError::DuplicateId("foo".to_string())
        );
        assert_eq!(registry.get("foo"), Some(1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_rebuild_from_tree() {
        let mut arena = DomArena::new();
        let root = arena.root_id();
        let a = arena.create_element("div");
        let b = arena.create_element("div");
        arena.append_child(root, a).unwrap();
        arena.append_child(a, b).unwrap();
        arena.element_mut(a).unwrap().id = Some("outer".into());
        arena.element_mut(b).unwrap().id = Some("inner".into());

        // Detached nodes are not part of the document
        let loose = arena.create_element("div");
        arena.element_mut(loose).unwrap().id = Some("loose".into());

        let registry = IdRegistry::rebuild(&arena).unwrap();
        assert_eq!(registry.get("outer"), Some(a));
        assert_eq!(registry.get("inner"), Some(b));
        assert!(!registry.contains("loose"));
    }

    #[test]
    fn test_rebuild_rejects_duplicates() {
        let mut arena = DomArena::new();
        let root = arena.root_id();
        for _ in 0..2 {
            let el = arena.create_element("p");
            arena.element_mut(el).unwrap().id = Some("same".into());
            arena.append_child(root, el).unwrap();
        }
        assert_eq!(
            IdRegistry::rebuild(&arena).unwrap_err(),
            DomError::DuplicateId("same".to_string())
        );
    }

    #[test]
    fn test_rebuild_skips_empty_ids() {
        let mut arena = DomArena::new();
        let root = arena.root_id();
        for _ in 0..2 {
            let el = arena.create_element("p");
            arena.element_mut(el).unwrap().id = Some(String::new());
            arena.append_child(root, el).unwrap();
        }
        let registry = IdRegistry::rebuild(&arena).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.get(""), None);
    }

    #[test]
    fn test_rebuild_rejects_malformed_ids() {
        let mut arena = DomArena::new();
        let root = arena.root_id();
        let el = arena.create_element("p");
        arena.element_mut(el).unwrap().id = Some("bad id".into());
        arena.append_child(root, el).unwrap();
        assert_eq!(
            IdRegistry::rebuild(&arena).unwrap_err(),
            DomError::InvalidId("bad id".to_string())
        );
    }

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("foo-1"));
        for bad in ["", "a b", "tab\tx", " lead"] {
            assert!(!is_valid_id(bad), "{:?}", bad);
        }
    }

    #[test]
    fn test_purge_only_owned_ids() {
        let mut registry = IdRegistry::new();
        registry.insert("kept", 7).unwrap();
        registry.insert("gone", 3).unwrap();

        let mut removed = DomNode::new_element(3, "div");
        removed.element_mut().unwrap().id = Some("gone".into());
        // Stale copy claiming an id someone else owns
        let mut impostor = DomNode::new_element(4, "div");
        impostor.element_mut().unwrap().id = Some("kept".into());

        assert_eq!(registry.purge(&[removed, impostor]), 1);
        assert!(!registry.contains("gone"));
        assert_eq!(registry.get("kept"), Some(7));
    }
}
