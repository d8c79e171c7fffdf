//! Command surface
//!
//! One variant per user action. Key maps bind to these by name; an
//! unmapped name is an error instead of a silent no-op.

use crate::error::EditError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveForward,
    MoveBackward,
    MoveChild,
    MoveUp,
    MoveSiblingNext,
    MoveSiblingPrev,
    MoveFirst,
    MoveLast,
    ClearCursor,
    InsertPrev,
    InsertNext,
    InsertFirstChild,
    InsertLastChild,
    WrapInParent,
    SetId,
    RemoveNode,
    SetText,
    Retag,
}

impl Command {
    pub const ALL: &'static [Command] = &[
        Command::MoveForward,
        Command::MoveBackward,
        Command::MoveChild,
        Command::MoveUp,
        Command::MoveSiblingNext,
        Command::MoveSiblingPrev,
        Command::MoveFirst,
        Command::MoveLast,
        Command::ClearCursor,
        Command::InsertPrev,
        Command::InsertNext,
        Command::InsertFirstChild,
        Command::InsertLastChild,
        Command::WrapInParent,
        Command::SetId,
        Command::RemoveNode,
        Command::SetText,
        Command::Retag,
    ];

    /// Action name as used by key maps
    pub fn name(self) -> &'static str {
        match self {
            Command::MoveForward => "moveForward",
            Command::MoveBackward => "moveBackward",
            Command::MoveChild => "moveChild",
            Command::MoveUp => "moveUp",
            Command::MoveSiblingNext => "moveSiblingNext",
            Command::MoveSiblingPrev => "moveSiblingPrev",
            Command::MoveFirst => "moveFirst",
            Command::MoveLast => "moveLast",
            Command::ClearCursor => "clearCursor",
            Command::InsertPrev => "insertPrev",
            Command::InsertNext => "insertNext",
            Command::InsertFirstChild => "insertFirstChild",
            Command::InsertLastChild => "insertLastChild",
            Command::WrapInParent => "wrapInParent",
            Command::SetId => "setId",
            Command::RemoveNode => "removeNode",
            Command::SetText => "setText",
            Command::Retag => "retag",
        }
    }

    /// Changes the tree (as opposed to only the cursor)
    pub fn is_mutation(self) -> bool {
        !matches!(
            self,
            Command::MoveForward
                | Command::MoveBackward
                | Command::MoveChild
                | Command::MoveUp
                | Command::MoveSiblingNext
                | Command::MoveSiblingPrev
                | Command::MoveFirst
                | Command::MoveLast
                | Command::ClearCursor
        )
    }

    /// Fails with `NoSelection` when the cursor is unset
    pub fn needs_cursor(self) -> bool {
        self.is_mutation()
    }

    /// Suspends for a value from the input provider
    pub fn needs_input(self) -> bool {
        matches!(self, Command::SetId | Command::SetText | Command::Retag)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Command::ALL
            .iter()
            .copied()
            .find(|c| c.name() == trimmed)
            .ok_or_else(|| EditError::UnknownCommand(trimmed.to_string()))
    }
}
