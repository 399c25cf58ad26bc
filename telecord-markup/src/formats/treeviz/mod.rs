//! Treeviz formatter for formatting trees
//!
//! Treeviz is a visual representation of the tree, meant for eyeballing what the parser
//! made of a message. Each line is:
//!
//! <prefix><connector> <icon> <label>
//!
//! Labels are truncated to 30 characters and show newlines as `↵`.
//!
//! Example:
//!
//! ⧉ Message (3 nodes)
//! ├─ ◦ hello
//! ├─ 𝐁 Bold
//! │ └─ ◦ world
//! └─ ⊕ https://example.com (no preview)
//!   └─ ◦ https://example.com

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{MentionTarget, Node};

const LABEL_WIDTH: usize = 30;

fn truncate(text: &str) -> String {
    let flat = text.replace('\n', "↵");
    if flat.chars().count() <= LABEL_WIDTH {
        return flat;
    }
    let mut short: String = flat.chars().take(LABEL_WIDTH - 1).collect();
    short.push('…');
    short
}

fn icon(node: &Node) -> &'static str {
    match node {
        Node::Style(style, _) => get_icon(style.name()),
        other => get_icon(other.kind()),
    }
}

fn label(node: &Node) -> String {
    match node {
        Node::Text(text) => truncate(text),
        Node::Newline => "Newline".to_string(),
        Node::Style(style, _) => style.name().to_string(),
        Node::Code { language, body } => {
            let lines = body.lines().count();
            if language.is_empty() {
                format!("Code ({lines} lines)")
            } else {
                format!("Code {language} ({lines} lines)")
            }
        }
        Node::Link {
            url, hide_preview, ..
        } => {
            if *hide_preview {
                format!("{} (no preview)", truncate(url))
            } else {
                truncate(url)
            }
        }
        Node::Mention(MentionTarget::User(id)) => format!("@{id}"),
        Node::Mention(MentionTarget::Everyone) => "@everyone".to_string(),
        Node::Mention(MentionTarget::Here) => "@here".to_string(),
        Node::Channel(id) => format!("#{id}"),
        Node::Role(id) => format!("&{id}"),
        Node::CustomEmoji(name) => format!(":{name}:"),
        Node::Container(children) => format!("{} items", children.len()),
    }
}

/// Format a single node and its descendants
fn format_node(node: &Node, prefix: &str, child_index: usize, child_count: usize) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };

    let mut output = format!("{}{} {} {}\n", prefix, connector, icon(node), label(node));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    output.push_str(&format_children(&node.children(), &child_prefix));
    output
}

fn format_children(children: &[&Node], prefix: &str) -> String {
    let mut output = String::new();
    for (i, child) in children.iter().enumerate() {
        output.push_str(&format_node(child, prefix, i, children.len()));
    }
    output
}

/// Render a tree as treeviz text. A top-level container is shown as the message itself.
pub fn to_treeviz_str(tree: &Node) -> String {
    let top: Vec<&Node> = match tree {
        Node::Container(children) => children.iter().collect(),
        other => vec![other],
    };
    let mut output = format!("{} Message ({} nodes)\n", get_icon("Message"), top.len());
    output.push_str(&format_children(&top, ""));
    output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree))
    }
}
