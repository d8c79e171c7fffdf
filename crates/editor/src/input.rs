//! Collaborators the editor talks to
//!
//! The engine never blocks on user input itself. Commands that need a
//! value return an `InputRequest`; whoever owns the UI asks an
//! `InputProvider` and hands the answer back through `Editor::resume`.
//! Errors leave through an `ErrorSink`.

use crate::command::Command;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Matches an answer to the request that asked for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputTicket(pub u64);

/// What the requested value will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputPurpose {
    TagName,
    Text,
    Id,
}

impl InputPurpose {
    /// Command that asked for the value
    pub fn command(self) -> Command {
        match self {
            InputPurpose::TagName => Command::Retag,
            InputPurpose::Text => Command::SetText,
            InputPurpose::Id => Command::SetId,
        }
    }
}

/// An outstanding request for free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRequest {
    pub ticket: InputTicket,
    pub purpose: InputPurpose,
    pub prompt: String,
    /// Value to pre-fill
    pub initial: String,
}

/// Source of user-supplied values
pub trait InputProvider {
    /// `None` means the user cancelled
    fn request_text(&mut self, prompt: &str, initial: &str) -> Option<String>;

    fn request_confirmation(&mut self, prompt: &str) -> bool;
}

/// Where rejected-command messages go
pub trait ErrorSink {
    fn report(&mut self, message: &str);

    /// Hide whatever was last reported
    fn clear(&mut self);
}

/// Canned answers, consumed in order
///
/// Text answers run out as cancellations; confirmations as "no".
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    answers: VecDeque<Option<String>>,
    confirmations: VecDeque<bool>,
    /// Every prompt seen, with its initial value
    pub prompts: Vec<(String, String)>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, text: &str) -> Self {
        self.answers.push_back(Some(text.to_string()));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    pub fn confirm(mut self, yes: bool) -> Self {
        self.confirmations.push_back(yes);
        self
    }
}

impl InputProvider for ScriptedInput {
    fn request_text(&mut self, prompt: &str, initial: &str) -> Option<String> {
        self.prompts.push((prompt.to_string(), initial.to_string()));
        self.answers.pop_front().flatten()
    }

    fn request_confirmation(&mut self, prompt: &str) -> bool {
        self.prompts.push((prompt.to_string(), String::new()));
        self.confirmations.pop_front().unwrap_or(false)
    }
}

/// Keeps the currently shown message, like a status line
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub current: Option<String>,
    /// Everything ever reported
    pub history: Vec<String>,
}

impl ErrorSink for StatusLine {
    fn report(&mut self, message: &str) {
        tracing::debug!("[StatusLine] {}", message);
        self.current = Some(message.to_string());
        self.history.push(message.to_string());
    }

    fn clear(&mut self) {
        self.current = None;
    }
}
