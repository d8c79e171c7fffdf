//! Keyboard-driven structural editor engine
//!
//! A single cursor walks a `dom::Document`; commands move it or reshape
//! the tree around it.
//!
//! # Architecture
//!
//! 1. **Cursor**: one optional node, two families of moves (cyclic
//!    siblings, linear document order)
//! 2. **Mutation**: all-or-nothing edits that keep the emptiness markers
//!    and the id registry in step with the tree
//! 3. **Editor**: owns document + cursor, freezes while waiting for input
//! 4. **Dispatcher**: wires the editor to an input provider and an error sink

pub mod breadcrumb;
pub mod command;
pub mod config;
pub mod cursor;
pub mod dispatcher;
pub mod editor;
pub mod error;
pub mod events;
pub mod input;
pub mod mutation;

pub use breadcrumb::Crumb;
pub use command::Command;
pub use config::{EditorConfig, PromptConfig};
pub use cursor::Cursor;
pub use dispatcher::Dispatcher;
pub use editor::{Editor, Outcome};
pub use error::{EditError, Result};
pub use events::{EditorEvent, EventBus};
pub use input::{
    ErrorSink, InputProvider, InputPurpose, InputRequest, InputTicket, ScriptedInput, StatusLine,
};
