//! Ancestor path data for a breadcrumb widget
//!
//! Only data: tag, author classes and id per ancestor, root first.
//! Editor markers (`empty`, `cursor`) are filtered out.

use dom::{Document, DomError, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub node_id: NodeId,
    pub tag_name: String,
    pub classes: Vec<String>,
    pub id: Option<String>,
}

impl fmt::Display for Crumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag_name)?;
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        Ok(())
    }
}

/// Crumbs from the root down to `node_id`
pub fn breadcrumb(doc: &Document, node_id: NodeId) -> Result<Vec<Crumb>, DomError> {
    let arena = doc.arena();
    let mut crumbs = Vec::new();
    let mut current = Some(node_id);

    while let Some(id) = current {
        let node = arena.get(id)?;
        if let Some(el) = node.element() {
            crumbs.push(Crumb {
                node_id: id,
                tag_name: el.tag_name.to_lowercase(),
                classes: el.author_classes().map(str::to_string).collect(),
                id: el.id.clone(),
            });
        }
        current = node.parent_id;
    }

    crumbs.reverse();
    Ok(crumbs)
}

/// One-line rendering, e.g. `body > ul#list > li.done`
pub fn render(crumbs: &[Crumb]) -> String {
    crumbs
        .iter()
        .map(Crumb::to_string)
        .collect::<Vec<_>>()
        .join(" > ")
}
