//! Editor context
//!
//! Owns the document, the cursor and the pending-input slot. A command
//! either runs to completion or, for the three commands that need a
//! value from the user, suspends:
//!
//! ```text
//! execute(Retag) ──→ Outcome::Pending(request)      frozen
//!                         │
//! resume(ticket, answer) ─┴─→ Applied | Cancelled   thawed
//! ```
//!
//! While frozen every other `execute` is refused with `Frozen`. Only one
//! request can be outstanding because a second one can never be issued.

use crate::breadcrumb::{self, Crumb};
use crate::command::Command;
use crate::config::EditorConfig;
use crate::cursor::Cursor;
use crate::error::{EditError, Result};
use crate::events::{EditorEvent, EventBus};
use crate::input::{InputPurpose, InputRequest, InputTicket};
use crate::mutation;
use dom::{Document, DomArena, DomError, NodeId};

/// Result of a command that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Ran to completion; re-read the cursor and tree
    Applied,
    /// A new element exists; the cursor did not move
    Created(NodeId),
    /// Waiting for `resume` with a value
    Pending(InputRequest),
    /// The pending request was cancelled; nothing changed
    Cancelled,
}

#[derive(Debug, Clone)]
struct PendingInput {
    request: InputRequest,
    /// Node the answer applies to, fixed at request time
    target: NodeId,
}

pub struct Editor {
    config: EditorConfig,
    document: Document,
    cursor: Cursor,
    pending: Option<PendingInput>,
    next_ticket: u64,
    events: EventBus,
}

impl Editor {
    /// Editor over an empty document
    pub fn new(config: EditorConfig) -> Self {
        let document = Document::with_root(&config.root_tag);
        Self::with_document(config, document)
    }

    pub fn with_document(config: EditorConfig, document: Document) -> Self {
        tracing::debug!("[Editor] session {} opened", config.id);
        let events = EventBus::with_capacity(config.event_capacity);
        Self {
            config,
            document,
            cursor: Cursor::new(),
            pending: None,
            next_ticket: 1,
            events,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Node under the cursor, if any
    pub fn cursor(&self) -> Option<NodeId> {
        self.cursor.current()
    }

    /// True while an input request is outstanding
    pub fn is_frozen(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&InputRequest> {
        self.pending.as_ref().map(|p| &p.request)
    }

    /// Ancestor data from root to cursor; empty when unset
    pub fn breadcrumb(&self) -> Result<Vec<Crumb>> {
        match self.cursor.current() {
            Some(node_id) => Ok(breadcrumb::breadcrumb(&self.document, node_id)?),
            None => Ok(Vec::new()),
        }
    }

    /// Put the cursor on an attached element (e.g. a breadcrumb click)
    pub fn focus(&mut self, node_id: NodeId) -> Result<()> {
        self.ensure_thawed()?;
        let arena = self.document.arena();
        arena.element(node_id)?;
        if !arena.is_attached(node_id) {
            return Err(DomError::Detached(node_id).into());
        }
        self.move_cursor(Some(node_id));
        Ok(())
    }

    /// Put the cursor on whatever element sits at an index path
    pub fn focus_path(&mut self, path: &[usize]) -> Result<()> {
        let node_id = self
            .document
            .from_path(path)
            .ok_or_else(|| EditError::PathNotFound(path.to_vec()))?;
        self.focus(node_id)
    }

    fn ensure_thawed(&self) -> Result<()> {
        if self.is_frozen() {
            return Err(EditError::Frozen);
        }
        Ok(())
    }

    fn move_cursor(&mut self, node_id: Option<NodeId>) {
        self.cursor.set(node_id);
        self.events
            .publish(EditorEvent::CursorChanged { node: node_id });
    }

    fn tree_changed(&self, command: Command) {
        self.events.publish(EditorEvent::TreeChanged { command });
    }

    /// Run one command
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        if self.is_frozen() {
            tracing::warn!("[Editor] {} refused while waiting for input", command);
            return Err(EditError::Frozen);
        }

        let result = self.run(command);
        if let Err(err) = &result {
            tracing::warn!("[Editor] {} rejected: {}", command, err);
            self.events.publish(EditorEvent::CommandRejected {
                command,
                message: err.to_string(),
            });
        }
        result
    }

    fn run(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::MoveForward => self.navigate(command, Cursor::move_forward),
            Command::MoveBackward => self.navigate(command, Cursor::move_backward),
            Command::MoveChild => self.navigate(command, Cursor::move_child),
            Command::MoveUp => self.navigate(command, Cursor::move_up),
            Command::MoveSiblingNext => self.navigate(command, Cursor::move_sibling_next),
            Command::MoveSiblingPrev => self.navigate(command, Cursor::move_sibling_prev),
            Command::MoveFirst => self.navigate(command, Cursor::move_first),
            Command::MoveLast => self.navigate(command, Cursor::move_last),
            Command::ClearCursor => {
                if self.cursor.is_set() {
                    self.move_cursor(None);
                }
                Ok(Outcome::Applied)
            }
            Command::InsertPrev => self.insert(command, mutation::insert_before),
            Command::InsertNext => self.insert(command, mutation::insert_after),
            Command::InsertFirstChild => self.insert(command, mutation::insert_first_child),
            Command::InsertLastChild => self.insert(command, mutation::insert_last_child),
            Command::WrapInParent => {
                let node = self.cursor.selected()?;
                let focus = mutation::wrap_in_parent(&mut self.document, node, &self.config.default_tag)?;
                self.tree_changed(command);
                // Same node, new ancestry: the breadcrumb must refresh
                self.move_cursor(Some(focus));
                Ok(Outcome::Applied)
            }
            Command::RemoveNode => {
                let node = self.cursor.selected()?;
                let focus = mutation::remove_node(&mut self.document, node)?;
                self.tree_changed(command);
                self.move_cursor(Some(focus));
                Ok(Outcome::Applied)
            }
            Command::Retag => {
                let node = self.cursor.selected()?;
                if self.document.is_root(node) {
                    return Err(EditError::RootBoundary(
                        "Cannot change element type of root node",
                    ));
                }
                self.request_input(InputPurpose::TagName, node)
            }
            Command::SetText => {
                let node = self.cursor.selected()?;
                self.request_input(InputPurpose::Text, node)
            }
            Command::SetId => {
                let node = self.cursor.selected()?;
                self.request_input(InputPurpose::Id, node)
            }
        }
    }

    fn navigate(
        &mut self,
        command: Command,
        step: fn(&mut Cursor, &DomArena) -> Result<NodeId>,
    ) -> Result<Outcome> {
        let before = self.cursor.current();
        let after = step(&mut self.cursor, self.document.arena())?;

        tracing::debug!("[Cursor] {}: {:?} -> {}", command, before, after);
        if before != Some(after) {
            self.events
                .publish(EditorEvent::CursorChanged { node: Some(after) });
        }
        Ok(Outcome::Applied)
    }

    fn insert(
        &mut self,
        command: Command,
        op: fn(&mut Document, NodeId, &str) -> Result<NodeId>,
    ) -> Result<Outcome> {
        let node = self.cursor.selected()?;
        let created = op(&mut self.document, node, &self.config.default_tag)?;
        self.tree_changed(command);
        Ok(Outcome::Created(created))
    }

    fn request_input(&mut self, purpose: InputPurpose, target: NodeId) -> Result<Outcome> {
        let el = self.document.arena().element(target)?;
        let (prompt, initial) = match purpose {
            InputPurpose::TagName => (&self.config.prompts.tag_name, el.tag_name.clone()),
            InputPurpose::Id => (&self.config.prompts.id, el.id.clone().unwrap_or_default()),
            InputPurpose::Text => (
                &self.config.prompts.text,
                self.document.text_content(target)?,
            ),
        };

        let request = InputRequest {
            ticket: InputTicket(self.next_ticket),
            purpose,
            prompt: prompt.clone(),
            initial,
        };
        self.next_ticket += 1;

        tracing::debug!("[Editor] waiting for {:?} (ticket {})", purpose, request.ticket.0);
        self.events
            .publish(EditorEvent::InputRequested(request.clone()));
        self.pending = Some(PendingInput {
            request: request.clone(),
            target,
        });
        Ok(Outcome::Pending(request))
    }

    /// Answer the pending request; `None` cancels it
    ///
    /// The editor thaws whether the answer applies, is cancelled or is
    /// rejected.
    pub fn resume(&mut self, ticket: InputTicket, answer: Option<String>) -> Result<Outcome> {
        let pending = self.pending.take().ok_or(EditError::NoPendingInput)?;
        if pending.request.ticket != ticket {
            self.pending = Some(pending);
            return Err(EditError::TicketMismatch);
        }

        self.events.publish(EditorEvent::InputResolved {
            ticket,
            cancelled: answer.is_none(),
        });
        let Some(value) = answer else {
            tracing::debug!("[Editor] ticket {} cancelled", ticket.0);
            return Ok(Outcome::Cancelled);
        };

        let purpose = pending.request.purpose;
        let result = self.apply_input(purpose, pending.target, &value);
        if let Err(err) = &result {
            tracing::warn!("[Editor] input for ticket {} rejected: {}", ticket.0, err);
            self.events.publish(EditorEvent::CommandRejected {
                command: purpose.command(),
                message: err.to_string(),
            });
        }
        result
    }

    fn apply_input(&mut self, purpose: InputPurpose, target: NodeId, value: &str) -> Result<Outcome> {
        let doc = &mut self.document;
        match purpose {
            InputPurpose::TagName => {
                let replacement = mutation::retag(doc, target, value)?;
                self.tree_changed(purpose.command());
                self.move_cursor(Some(replacement));
            }
            InputPurpose::Text => {
                mutation::set_text(doc, target, value)?;
                self.tree_changed(purpose.command());
            }
            InputPurpose::Id => {
                mutation::set_id(doc, target, value)?;
                self.tree_changed(purpose.command());
            }
        }
        Ok(Outcome::Applied)
    }

    /// Take `id` from whichever element owns it and give it to the cursor
    ///
    /// Only ever called after the user agreed to the move.
    pub fn move_id_here(&mut self, id: &str) -> Result<Outcome> {
        self.ensure_thawed()?;
        let target = self.cursor.selected()?;
        if !mutation::is_valid_id(id) {
            return Err(EditError::InvalidId);
        }

        let doc = &mut self.document;
        if let Some(owner) = doc.lookup_id(id).filter(|&owner| owner != target) {
            mutation::set_id(doc, owner, "")?;
        }
        mutation::set_id(doc, target, id)?;

        tracing::info!("[Editor] moved id {:?} to {}", id, target);
        self.tree_changed(Command::SetId);
        Ok(Outcome::Applied)
    }
}
