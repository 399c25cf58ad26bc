//! Traversal over the formatting tree.
//!
//! Every visit method receives the node being visited plus its destructured fields and
//! returns the (possibly rewritten) node. The defaults are identity: leaves come back
//! borrowed, and parents are rebuilt only if one of their children came back owned.
//! Renderers override the methods they care about and call the `walk_*` helpers to
//! descend, the same way a subclass would call its base implementation.

use crate::ir::nodes::{MentionTarget, Node, Style};
use std::borrow::Cow;

pub trait Visitor {
    fn visit<'a>(&mut self, node: &'a Node) -> Cow<'a, Node> {
        match node {
            Node::Text(text) => self.visit_text(node, text),
            Node::Newline => self.visit_newline(node),
            Node::Style(style, child) => self.visit_style(node, *style, child),
            Node::Code { language, body } => self.visit_code(node, language, body),
            Node::Link {
                url,
                child,
                hide_preview,
            } => self.visit_link(node, url, child, *hide_preview),
            Node::Mention(target) => self.visit_mention(node, *target),
            Node::Channel(id) => self.visit_channel(node, *id),
            Node::Role(id) => self.visit_role(node, *id),
            Node::CustomEmoji(name) => self.visit_custom_emoji(node, name),
            Node::Container(children) => self.visit_container(node, children),
        }
    }

    fn visit_text<'a>(&mut self, node: &'a Node, _text: &'a str) -> Cow<'a, Node> {
        Cow::Borrowed(node)
    }

    fn visit_newline<'a>(&mut self, node: &'a Node) -> Cow<'a, Node> {
        Cow::Borrowed(node)
    }

    fn visit_style<'a>(&mut self, node: &'a Node, style: Style, child: &'a Node) -> Cow<'a, Node> {
        walk_style(self, node, style, child)
    }

    fn visit_code<'a>(&mut self, node: &'a Node, _language: &'a str, _body: &'a str) -> Cow<'a, Node> {
        Cow::Borrowed(node)
    }

    fn visit_link<'a>(
        &mut self,
        node: &'a Node,
        url: &'a str,
        child: &'a Node,
        hide_preview: bool,
    ) -> Cow<'a, Node> {
        walk_link(self, node, url, child, hide_preview)
    }

    fn visit_mention<'a>(&mut self, node: &'a Node, _target: MentionTarget) -> Cow<'a, Node> {
        Cow::Borrowed(node)
    }

    fn visit_channel<'a>(&mut self, node: &'a Node, _id: u64) -> Cow<'a, Node> {
        Cow::Borrowed(node)
    }

    fn visit_role<'a>(&mut self, node: &'a Node, _id: u64) -> Cow<'a, Node> {
        Cow::Borrowed(node)
    }

    fn visit_custom_emoji<'a>(&mut self, node: &'a Node, _name: &'a str) -> Cow<'a, Node> {
        Cow::Borrowed(node)
    }

    fn visit_container<'a>(&mut self, node: &'a Node, children: &'a [Node]) -> Cow<'a, Node> {
        walk_container(self, node, children)
    }
}

pub fn walk_style<'a, V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &'a Node,
    style: Style,
    child: &'a Node,
) -> Cow<'a, Node> {
    match visitor.visit(child) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(child) => Cow::Owned(Node::styled(style, child)),
    }
}

pub fn walk_link<'a, V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &'a Node,
    url: &'a str,
    child: &'a Node,
    hide_preview: bool,
) -> Cow<'a, Node> {
    match visitor.visit(child) {
        Cow::Borrowed(_) => Cow::Borrowed(node),
        Cow::Owned(child) => Cow::Owned(Node::Link {
            url: url.to_string(),
            child: Box::new(child),
            hide_preview,
        }),
    }
}

pub fn walk_container<'a, V: Visitor + ?Sized>(
    visitor: &mut V,
    node: &'a Node,
    children: &'a [Node],
) -> Cow<'a, Node> {
    let visited: Vec<Cow<'a, Node>> = children.iter().map(|c| visitor.visit(c)).collect();
    if visited.iter().all(|c| matches!(c, Cow::Borrowed(_))) {
        return Cow::Borrowed(node);
    }
    Cow::Owned(Node::Container(
        visited.into_iter().map(Cow::into_owned).collect(),
    ))
}
