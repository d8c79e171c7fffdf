//! Editor configuration

use crate::error::{EditError, Result};
use crate::mutation::normalize_tag;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prompt strings shown by the input provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub tag_name: String,
    pub text: String,
    pub id: String,
    /// Confirmation asked before taking an id from another element
    pub move_id: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            tag_name: "Tag name:(e.g. h1, p, ul, li)".to_string(),
            text: "Text contents:".to_string(),
            id: "Element ID:".to_string(),
            move_id: "ID already exists in the document. Move it to this element?".to_string(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Session id, used to tell editors apart in logs
    pub id: String,
    /// Tag of the root of a fresh document
    pub root_tag: String,
    /// Tag given to elements created by insert and wrap commands
    pub default_tag: String,
    /// Event bus buffer per subscriber
    pub event_capacity: usize,
    pub prompts: PromptConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            root_tag: dom::ROOT_TAG.to_string(),
            default_tag: dom::DEFAULT_TAG.to_string(),
            event_capacity: 1024,
            prompts: PromptConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EditError::InvalidConfig(e.to_string()))?;
        config.normalized()
    }

    /// Check and lowercase the configured tag names
    pub fn normalized(mut self) -> Result<Self> {
        self.root_tag = normalize_tag(&self.root_tag)?;
        self.default_tag = normalize_tag(&self.default_tag)?;
        Ok(self)
    }
}
