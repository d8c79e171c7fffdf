//! Error types for editor commands
//!
//! Every variant is a rejected command, never a fatal condition. The
//! Display text is the user-facing message; the dispatcher forwards it
//! to the error sink unmodified.

use dom::DomError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("No node selected")]
    NoSelection,

    #[error("{0}")]
    RootBoundary(&'static str),

    #[error("Node has no children")]
    NoChild,

    #[error("IDs must contain no space characters and be non-empty")]
    InvalidId,

    #[error("Invalid tag name: {0:?}")]
    InvalidTag(String),

    #[error("ID already exists in the document: {0}")]
    DuplicateId(String),

    #[error("Editor is waiting for input")]
    Frozen,

    #[error("No input request is pending")]
    NoPendingInput,

    #[error("Answer does not match the pending input request")]
    TicketMismatch,

    #[error("No node at index path {0:?}")]
    PathNotFound(Vec<usize>),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}
