//! Core data structures for the formatting tree.
//!
//! A tree is built once per parse call and never mutated afterwards. Only `Style`, `Link`
//! and `Container` carry descendants; every other variant is a leaf.

use serde::Serialize;

/// Inline styles recognised by the Discord grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Style {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Mono,
    MultiMono,
    BlockQuote,
    InlineCode,
    Spoiler,
}

impl Style {
    pub const ALL: [Style; 9] = [
        Style::Bold,
        Style::Italic,
        Style::Underline,
        Style::Strikethrough,
        Style::Mono,
        Style::MultiMono,
        Style::BlockQuote,
        Style::InlineCode,
        Style::Spoiler,
    ];

    /// Bit used by the parser to remember which styles are open on a branch.
    pub fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub fn name(self) -> &'static str {
        match self {
            Style::Bold => "Bold",
            Style::Italic => "Italic",
            Style::Underline => "Underline",
            Style::Strikethrough => "Strikethrough",
            Style::Mono => "Mono",
            Style::MultiMono => "MultiMono",
            Style::BlockQuote => "BlockQuote",
            Style::InlineCode => "InlineCode",
            Style::Spoiler => "Spoiler",
        }
    }
}

/// Who a mention points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MentionTarget {
    User(u64),
    Everyone,
    Here,
}

/// A node of the formatting tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    Text(String),
    /// Explicit line break (two trailing spaces before a newline)
    Newline,
    Style(Style, Box<Node>),
    Code {
        language: String,
        body: String,
    },
    Link {
        url: String,
        child: Box<Node>,
        hide_preview: bool,
    },
    Mention(MentionTarget),
    Channel(u64),
    Role(u64),
    CustomEmoji(String),
    Container(Vec<Node>),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn styled(style: Style, child: Node) -> Self {
        Node::Style(style, Box::new(child))
    }

    /// A link whose visible content is the url itself.
    pub fn link(url: impl Into<String>, hide_preview: bool) -> Self {
        let url = url.into();
        Node::Link {
            child: Box::new(Node::Text(url.clone())),
            url,
            hide_preview,
        }
    }

    pub fn empty() -> Self {
        Node::Container(Vec::new())
    }

    /// Variant name, used by tree visualisation and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Text(_) => "Text",
            Node::Newline => "Newline",
            Node::Style(..) => "Style",
            Node::Code { .. } => "Code",
            Node::Link { .. } => "Link",
            Node::Mention(_) => "Mention",
            Node::Channel(_) => "Channel",
            Node::Role(_) => "Role",
            Node::CustomEmoji(_) => "CustomEmoji",
            Node::Container(_) => "Container",
        }
    }

    /// Direct descendants, in order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Style(_, child) => vec![child.as_ref()],
            Node::Link { child, .. } => vec![child.as_ref()],
            Node::Container(children) => children.iter().collect(),
            _ => Vec::new(),
        }
    }
}
