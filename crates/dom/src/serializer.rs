//! Markup serializer
//!
//! Renders a subtree as indented markup. Output is deterministic
//! (attributes sorted by name) so two renders of an unchanged tree are
//! byte-for-byte equal, which is what snapshot tests compare.

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::*;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    pub indent: usize,
    /// Keep editor markers such as `empty` in the class list
    pub include_internal_classes: bool,
    pub max_text_length: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            include_internal_classes: true,
            max_text_length: 200,
        }
    }
}

/// Cap text length (in chars) to keep output readable
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

fn escape_into(output: &mut String, text: &str, quote: bool) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' if quote => output.push_str("&quot;"),
            _ => output.push(c),
        }
    }
}

/// Document tree serializer
pub struct DomSerializer {
    config: SerializerConfig,
}

impl DomSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Serialize the whole attached tree
    pub fn serialize(&self, arena: &DomArena) -> Result<String> {
        self.serialize_subtree(arena, arena.root_id())
    }

    /// Serialize one node and everything under it
    pub fn serialize_subtree(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(1024);
        self.serialize_node(arena, node_id, 0, &mut output)?;
        Ok(output)
    }

    fn serialize_node(
        &self,
        arena: &DomArena,
        node_id: NodeId,
        depth: usize,
        output: &mut String,
    ) -> Result<()> {
        let node = arena.get(node_id)?;
        let indent = " ".repeat(depth * self.config.indent);

        match &node.data {
            NodeData::Element(el) => {
                // Format: <tag id="123" class="foo">
                output.push_str(&indent);
                output.push('<');
                output.push_str(&el.tag_name);

                if let Some(id) = &el.id {
                    output.push_str(" id=\"");
                    escape_into(output, id, true);
                    output.push('"');
                }

                let classes: Vec<&str> = el
                    .classes
                    .iter()
                    .map(String::as_str)
                    .filter(|c| self.config.include_internal_classes || !is_internal_class(c))
                    .collect();
                if !classes.is_empty() {
                    output.push_str(" class=\"");
                    escape_into(output, &classes.join(" "), true);
                    output.push('"');
                }

                let mut attrs: Vec<(&String, &String)> = el.attributes.iter().collect();
                attrs.sort();
                for (name, value) in attrs {
                    output.push(' ');
                    output.push_str(name);
                    output.push_str("=\"");
                    escape_into(output, value, true);
                    output.push('"');
                }

                output.push_str(">\n");

                for &child_id in &node.children_ids {
                    self.serialize_node(arena, child_id, depth + 1, output)?;
                }

                output.push_str(&indent);
                output.push_str("</");
                output.push_str(&el.tag_name);
                output.push_str(">\n");
            }
            NodeData::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    output.push_str(&indent);
                    escape_into(output, &cap_text_length(text, self.config.max_text_length), false);
                    output.push('\n');
                }
            }
        }

        Ok(())
    }
}

impl Default for DomSerializer {
    fn default() -> Self {
        Self::new()
    }
}
