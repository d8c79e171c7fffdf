//! Fluent construction of initial documents
//!
//! ```
//! use dom::DocumentBuilder;
//!
//! let doc = DocumentBuilder::new()
//!     .open("ul").id("menu")
//!         .open("li").text("one").close()
//!         .leaf("li")
//!     .close()
//!     .build()
//!     .unwrap();
//!
//! assert!(doc.lookup_id("menu").is_some());
//! ```
//!
//! Errors are deferred to `build` so the chain stays readable.

use crate::arena::DomArena;
use crate::document::Document;
use crate::error::{DomError, Result};
use crate::registry::is_valid_id;
use crate::types::{NodeId, ROOT_TAG};

#[derive(Debug)]
pub struct DocumentBuilder {
    arena: DomArena,
    /// Open elements, root at the bottom
    stack: Vec<NodeId>,
    error: Option<DomError>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::with_root(ROOT_TAG)
    }

    pub fn with_root(tag_name: &str) -> Self {
        let arena = DomArena::with_root(tag_name);
        let root = arena.root_id();
        Self {
            arena,
            stack: vec![root],
            error: None,
        }
    }

    /// Element currently receiving children
    pub fn current(&self) -> NodeId {
        self.stack
            .last()
            .copied()
            .unwrap_or_else(|| self.arena.root_id())
    }

    fn record(&mut self, result: Result<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }

    /// Append an element and descend into it
    pub fn open(mut self, tag_name: &str) -> Self {
        let parent = self.current();
        let el = self.arena.create_element(tag_name);
        let result = self.arena.append_child(parent, el);
        self.record(result);
        self.stack.push(el);
        self
    }

    /// Return to the parent; the root is never popped
    pub fn close(mut self) -> Self {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self
    }

    /// Append a childless element
    pub fn leaf(self, tag_name: &str) -> Self {
        self.open(tag_name).close()
    }

    /// Append a text child to the current element
    pub fn text(mut self, text: &str) -> Self {
        let parent = self.current();
        let node = self.arena.create_text(text);
        let result = self.arena.append_child(parent, node);
        self.record(result);
        self
    }

    /// Set the current element's id; `""` leaves it without one
    pub fn id(mut self, id: &str) -> Self {
        let current = self.current();
        let result = if id.is_empty() || is_valid_id(id) {
            self.arena
                .element_mut(current)
                .map(|el| el.id = (!id.is_empty()).then(|| id.to_string()))
        } else {
            Err(DomError::InvalidId(id.to_string()))
        };
        self.record(result);
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        let current = self.current();
        let result = self.arena.element_mut(current).map(|el| el.add_class(class));
        self.record(result);
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        let current = self.current();
        let result = self
            .arena
            .element_mut(current)
            .map(|el| el.set_attr(name, value));
        self.record(result);
        self
    }

    /// Finish: index ids, mark emptiness, surface the first error
    pub fn build(self) -> Result<Document> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Document::from_arena(self.arena)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
