//! Document tree model for keyboard-driven structural editing
//!
//! ## Core Design
//!
//! ```text
//! DocumentBuilder → DomArena (owned) ──→ Document { arena, IdRegistry }
//!                       ↓                    ↓
//!                 NodeId (u32)         emptiness markers, index paths
//! ```
//!
//! - The arena is a plain graph: parents, ordered children, no cycles.
//! - `Document` pairs it with the id registry; `emptiness` keeps the
//!   reserved `empty` class in step with each element's content.
//! - Index paths address "the node at this position" across edits that
//!   replace node identity.

pub mod arena;
pub mod builder;
pub mod document;
pub mod emptiness;
pub mod error;
pub mod path;
pub mod registry;
pub mod serializer;
pub mod types;

pub use arena::DomArena;
pub use builder::DocumentBuilder;
pub use document::Document;
pub use error::{DomError, Result};
pub use path::IndexPath;
pub use registry::{is_valid_id, IdRegistry};
pub use serializer::DomSerializer;
pub use types::*;
