//! Tree transforms and one-call conversion helpers
//!
//! The helpers wire the Discord parser to a renderer for callers that only need a
//! string out. [`normalize`] and [`plain_text`] work on any tree.

use crate::error::FormatError;
use crate::formats::discord::DiscordParser;
use crate::formats::html::{serialize_to_html, HtmlOptions};
use crate::formats::telegram::{render_telegram, TelegramRender};
use crate::ir::nodes::{MentionTarget, Node};
use crate::ir::visit::Visitor;
use crate::resolve::{LiteralNames, NameResolver};
use std::borrow::Cow;

/// Parse Discord markdown and render it as HTML with default options
///
/// # Example
///
/// ```ignore
/// use telecord_markup::transforms::discord_to_html;
///
/// let html = discord_to_html("**hi**").unwrap();
/// assert_eq!(html, "<strong>hi</strong>");
/// ```
pub fn discord_to_html(source: &str) -> Result<String, FormatError> {
    let tree = DiscordParser::new().parse(source)?;
    serialize_to_html(&tree, &HtmlOptions::default(), &LiteralNames)
}

/// Parse Discord markdown and render it for Telegram, resolving names through `names`
pub fn discord_to_telegram(
    source: &str,
    names: &dyn NameResolver,
) -> Result<TelegramRender, FormatError> {
    let tree = DiscordParser::new().parse(source)?;
    Ok(render_telegram(&tree, names))
}

/// Flattens nested containers, drops empty text and merges adjacent text nodes.
///
/// A container left with a single child is replaced by that child. Subtrees that are
/// already normal are returned as-is.
pub fn normalize(tree: &Node) -> Node {
    Normalizer.visit(tree).into_owned()
}

struct Normalizer;

impl Visitor for Normalizer {
    fn visit_container<'a>(&mut self, node: &'a Node, children: &'a [Node]) -> Cow<'a, Node> {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match self.visit(child).into_owned() {
                Node::Container(inner) => {
                    for node in inner {
                        push_merged(&mut flat, node);
                    }
                }
                other => push_merged(&mut flat, other),
            }
        }
        if flat.len() == 1 {
            return Cow::Owned(flat.remove(0));
        }
        if flat.as_slice() == children {
            return Cow::Borrowed(node);
        }
        Cow::Owned(Node::Container(flat))
    }
}

fn push_merged(out: &mut Vec<Node>, node: Node) {
    if let Node::Text(text) = &node {
        if text.is_empty() {
            return;
        }
        if let Some(Node::Text(prev)) = out.last_mut() {
            prev.push_str(text);
            return;
        }
    }
    out.push(node);
}

/// Visible text of a tree, markup stripped. Ids are shown literally.
pub fn plain_text(tree: &Node) -> String {
    let mut collector = PlainText(String::new());
    collector.visit(tree);
    collector.0
}

struct PlainText(String);

impl Visitor for PlainText {
    fn visit_text<'a>(&mut self, node: &'a Node, text: &'a str) -> Cow<'a, Node> {
        self.0.push_str(text);
        Cow::Borrowed(node)
    }

    fn visit_newline<'a>(&mut self, node: &'a Node) -> Cow<'a, Node> {
        self.0.push('\n');
        Cow::Borrowed(node)
    }

    fn visit_code<'a>(&mut self, node: &'a Node, _language: &'a str, body: &'a str) -> Cow<'a, Node> {
        self.0.push_str(body);
        Cow::Borrowed(node)
    }

    fn visit_mention<'a>(&mut self, node: &'a Node, target: MentionTarget) -> Cow<'a, Node> {
        match target {
            MentionTarget::User(id) => self.0.push_str(&format!("@{id}")),
            MentionTarget::Everyone => self.0.push_str("@everyone"),
            MentionTarget::Here => self.0.push_str("@here"),
        }
        Cow::Borrowed(node)
    }

    fn visit_channel<'a>(&mut self, node: &'a Node, id: u64) -> Cow<'a, Node> {
        self.0.push_str(&format!("#{id}"));
        Cow::Borrowed(node)
    }

    fn visit_role<'a>(&mut self, node: &'a Node, id: u64) -> Cow<'a, Node> {
        self.0.push_str(&format!("@&{id}"));
        Cow::Borrowed(node)
    }

    fn visit_custom_emoji<'a>(&mut self, node: &'a Node, name: &'a str) -> Cow<'a, Node> {
        self.0.push_str(&format!(":{name}:"));
        Cow::Borrowed(node)
    }
}
