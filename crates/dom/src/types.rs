//! Core type definitions for the document tree
//!
//! Key design principles:
//! 1. Use u32 handles into the arena, never references between nodes
//! 2. A node is either an element or a text leaf, nothing else
//! 3. Use SmallVec for child lists (most elements have few children)
//! 4. The id lives beside the attribute map so the registry can track it

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Node identifier (index into arena)
pub type NodeId = u32;

/// Reserved class marking an element with no meaningful content
pub const EMPTY_CLASS: &str = "empty";

/// Reserved class a renderer may use to highlight the cursor
pub const CURSOR_CLASS: &str = "cursor";

/// Classes owned by the editor rather than the document author
pub const INTERNAL_CLASSES: &[&str] = &[EMPTY_CLASS, CURSOR_CLASS];

/// Tag given to elements created without an explicit name
pub const DEFAULT_TAG: &str = "div";

/// Tag of the document root when none is given
pub const ROOT_TAG: &str = "body";

/// Check whether a class name belongs to the editor, not the author
pub fn is_internal_class(class: &str) -> bool {
    INTERNAL_CLASSES.contains(&class)
}

/// Node type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
}

/// Element payload: tag, id, classes and the remaining attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementData {
    pub tag_name: String,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    pub attributes: HashMap<String, String>,
}

impl ElementData {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            id: None,
            classes: SmallVec::new(),
            attributes: HashMap::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class; no-op if already present
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove a class; returns whether it was present
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    /// Set or clear a class in one call
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn is_marked_empty(&self) -> bool {
        self.has_class(EMPTY_CLASS)
    }

    /// Classes written by the document author (internal markers filtered)
    pub fn author_classes(&self) -> impl Iterator<Item = &str> {
        self.classes
            .iter()
            .map(String::as_str)
            .filter(|c| !is_internal_class(c))
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }
}

/// Node payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

/// A node in the arena
///
/// Equality is identity: compare `node_id`, never the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,

    // Navigation indices
    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>,

    pub data: NodeData,
}

impl DomNode {
    pub fn new_element(node_id: NodeId, tag_name: impl Into<String>) -> Self {
        Self {
            node_id,
            parent_id: None,
            children_ids: SmallVec::new(),
            data: NodeData::Element(ElementData::new(tag_name)),
        }
    }

    pub fn new_text(node_id: NodeId, text: impl Into<String>) -> Self {
        Self {
            node_id,
            parent_id: None,
            children_ids: SmallVec::new(),
            data: NodeData::Text(text.into()),
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self.data {
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        self.element().map(|e| e.tag_name.as_str())
    }

    pub fn element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    /// Get text payload for text nodes
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            NodeData::Element(_) => None,
        }
    }

    /// Element id, if any
    pub fn id(&self) -> Option<&str> {
        self.element().and_then(|e| e.id.as_deref())
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element().and_then(|e| e.attr(name))
    }
}
