//! Structural edits
//!
//! Every operation checks all of its preconditions before touching the
//! tree, so a rejected edit leaves the document exactly as it was. On
//! the way out each one refreshes the emptiness marker of whatever
//! element had its children changed and keeps the id registry equal to
//! the ids present in the tree.
//!
//! None of these move the cursor. Operations that invalidate the cursor
//! node (remove, retag) return the node the caller should focus next.

use crate::cursor::{next_element_sibling, prev_element_sibling};
use crate::error::{EditError, Result};
use dom::emptiness::refresh_empty;
use dom::{Document, DomArena, DomError, NodeId, EMPTY_CLASS};

pub use dom::is_valid_id;

/// Trim and lowercase a tag name, rejecting anything that is not
/// `letter (letter | digit | '-')*`
pub fn normalize_tag(tag_name: &str) -> Result<String> {
    let tag = tag_name.trim().to_ascii_lowercase();
    let mut chars = tag.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(tag)
    } else {
        Err(EditError::InvalidTag(tag_name.to_string()))
    }
}

/// Attached element that may also be the root
fn check_element(arena: &DomArena, node_id: NodeId) -> Result<()> {
    arena.element(node_id)?;
    if !arena.is_attached(node_id) {
        return Err(DomError::Detached(node_id).into());
    }
    Ok(())
}

/// Attached non-root element; returns its parent and index
fn check_movable(
    arena: &DomArena,
    node_id: NodeId,
    root_message: &'static str,
) -> Result<(NodeId, usize)> {
    if arena.is_root(node_id) {
        return Err(EditError::RootBoundary(root_message));
    }
    check_element(arena, node_id)?;
    let parent = arena.parent(node_id)?.ok_or(DomError::Detached(node_id))?;
    let index = arena
        .index_in_parent(node_id)?
        .ok_or(DomError::Detached(node_id))?;
    Ok((parent, index))
}

fn new_empty_element(arena: &mut DomArena, tag_name: &str) -> Result<NodeId> {
    let node_id = arena.create_element(tag_name);
    arena.element_mut(node_id)?.add_class(EMPTY_CLASS);
    Ok(node_id)
}

/// New empty sibling right before `node_id`
pub fn insert_before(doc: &mut Document, node_id: NodeId, tag_name: &str) -> Result<NodeId> {
    let (arena, _) = doc.parts_mut();
    let (parent, index) = check_movable(arena, node_id, "Cannot create node before root node")?;

    let fresh = new_empty_element(arena, tag_name)?;
    arena.insert_child(parent, index, fresh)?;
    refresh_empty(arena, parent)?;

    tracing::info!("[Mutation] inserted <{}> {} before {}", tag_name, fresh, node_id);
    Ok(fresh)
}

/// New empty sibling right after `node_id`
pub fn insert_after(doc: &mut Document, node_id: NodeId, tag_name: &str) -> Result<NodeId> {
    let (arena, _) = doc.parts_mut();
    let (parent, index) = check_movable(arena, node_id, "Cannot create node after root node")?;

    let fresh = new_empty_element(arena, tag_name)?;
    arena.insert_child(parent, index + 1, fresh)?;
    refresh_empty(arena, parent)?;

    tracing::info!("[Mutation] inserted <{}> {} after {}", tag_name, fresh, node_id);
    Ok(fresh)
}

/// New empty element as the first child of `node_id`
pub fn insert_first_child(doc: &mut Document, node_id: NodeId, tag_name: &str) -> Result<NodeId> {
    let (arena, _) = doc.parts_mut();
    check_element(arena, node_id)?;

    let fresh = new_empty_element(arena, tag_name)?;
    arena.insert_child(node_id, 0, fresh)?;
    refresh_empty(arena, node_id)?;

    tracing::info!("[Mutation] inserted <{}> {} as first child of {}", tag_name, fresh, node_id);
    Ok(fresh)
}

/// New empty element as the last child of `node_id`
pub fn insert_last_child(doc: &mut Document, node_id: NodeId, tag_name: &str) -> Result<NodeId> {
    let (arena, _) = doc.parts_mut();
    check_element(arena, node_id)?;

    let fresh = new_empty_element(arena, tag_name)?;
    arena.append_child(node_id, fresh)?;
    refresh_empty(arena, node_id)?;

    tracing::info!("[Mutation] inserted <{}> {} as last child of {}", tag_name, fresh, node_id);
    Ok(fresh)
}

/// Put `node_id` inside a new element that takes its place
///
/// Returns `node_id` itself: same identity, one level deeper.
pub fn wrap_in_parent(doc: &mut Document, node_id: NodeId, tag_name: &str) -> Result<NodeId> {
    let (arena, _) = doc.parts_mut();
    let (parent, _) = check_movable(arena, node_id, "Cannot reparent root node")?;

    let wrapper = arena.create_element(tag_name);
    arena.replace_child(node_id, wrapper)?;
    arena.append_child(wrapper, node_id)?;
    refresh_empty(arena, wrapper)?;
    refresh_empty(arena, parent)?;

    tracing::info!("[Mutation] wrapped {} in <{}> {}", node_id, tag_name, wrapper);
    Ok(node_id)
}

/// Swap `node_id` for a new element with another tag
///
/// Children move over in order; classes (including the empty marker)
/// and the id are copied verbatim. The old node is freed and the
/// replacement is returned.
pub fn retag(doc: &mut Document, node_id: NodeId, tag_name: &str) -> Result<NodeId> {
    let tag = normalize_tag(tag_name)?;
    let (arena, ids) = doc.parts_mut();
    check_movable(arena, node_id, "Cannot change element type of root node")?;

    let old = arena.element(node_id)?;
    let (classes, id) = (old.classes.clone(), old.id.clone());

    let replacement = arena.create_element(&tag);
    {
        let el = arena.element_mut(replacement)?;
        el.classes = classes;
        el.id = id.clone();
    }

    for child_id in arena.take_children(node_id)? {
        arena.append_child(replacement, child_id)?;
    }
    arena.replace_child(node_id, replacement)?;
    arena.drop_subtree(node_id)?;

    if let Some(id) = id {
        ids.reassign(&id, replacement);
    }
    refresh_empty(arena, replacement)?;

    tracing::info!("[Mutation] retagged {} as <{}> {}", node_id, tag, replacement);
    Ok(replacement)
}

/// Replace all children of `node_id` with a single text node
pub fn set_text(doc: &mut Document, node_id: NodeId, text: &str) -> Result<()> {
    let (arena, ids) = doc.parts_mut();
    check_element(arena, node_id)?;

    for child_id in arena.take_children(node_id)? {
        let removed = arena.drop_subtree(child_id)?;
        ids.purge(&removed);
    }
    let text_node = arena.create_text(text);
    arena.append_child(node_id, text_node)?;
    let empty = refresh_empty(arena, node_id)?;

    tracing::info!("[Mutation] set text of {} ({} chars, empty={})", node_id, text.chars().count(), empty);
    Ok(())
}

/// Detach and free `node_id` with its subtree
///
/// Returns where the cursor should go: the next element sibling, else
/// the previous one, else the parent.
pub fn remove_node(doc: &mut Document, node_id: NodeId) -> Result<NodeId> {
    let (arena, ids) = doc.parts_mut();
    let (parent, _) = check_movable(arena, node_id, "Cannot remove root node")?;

    let target = match next_element_sibling(arena, node_id)? {
        Some(next) => next,
        None => prev_element_sibling(arena, node_id)?.unwrap_or(parent),
    };

    arena.detach(node_id)?;
    let removed = arena.drop_subtree(node_id)?;
    let purged = ids.purge(&removed);
    refresh_empty(arena, parent)?;

    tracing::info!(
        "[Mutation] removed {} ({} nodes, {} ids), focus {}",
        node_id,
        removed.len(),
        purged,
        target
    );
    Ok(target)
}

/// Assign, change or (with `""`) clear the id of `node_id`
///
/// Never takes an id from another element: that is a `DuplicateId`.
pub fn set_id(doc: &mut Document, node_id: NodeId, new_id: &str) -> Result<()> {
    let (arena, ids) = doc.parts_mut();
    check_element(arena, node_id)?;

    if new_id.is_empty() {
        if let Some(old) = arena.element_mut(node_id)?.id.take() {
            ids.remove(&old);
            tracing::info!("[Mutation] cleared id {:?} from {}", old, node_id);
        }
        return Ok(());
    }

    if !is_valid_id(new_id) {
        return Err(EditError::InvalidId);
    }
    match ids.get(new_id) {
        Some(owner) if owner != node_id => return Err(EditError::DuplicateId(new_id.to_string())),
        Some(_) => return Ok(()),
        None => {}
    }

    if let Some(old) = arena.element_mut(node_id)?.id.replace(new_id.to_string()) {
        ids.remove(&old);
    }
    ids.insert(new_id, node_id)?;

    tracing::info!("[Mutation] set id {:?} on {}", new_id, node_id);
    Ok(())
}
