//! HTML serialization
//!
//! Pipeline: formatting tree → RcDom (via a [`Visitor`]) → HTML string

use super::HtmlOptions;
use crate::error::FormatError;
use crate::ir::nodes::{MentionTarget, Node, Style};
use crate::ir::visit::{walk_link, walk_style, Visitor};
use crate::resolve::NameResolver;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node as DomNode, NodeData, RcDom, SerializableHandle};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Serialize a formatting tree to an HTML fragment
pub fn serialize_to_html(
    tree: &Node,
    options: &HtmlOptions,
    names: &dyn NameResolver,
) -> Result<String, FormatError> {
    let dom = build_html_dom(tree, options, names);
    serialize_dom(&dom)
}

fn build_html_dom(tree: &Node, options: &HtmlOptions, names: &dyn NameResolver) -> RcDom {
    let dom = RcDom::default();
    let container = create_element("div", vec![]);

    let mut builder = DomBuilder {
        parents: vec![container.clone()],
        options,
        names,
    };
    builder.visit(tree);

    dom.document.children.borrow_mut().push(container);
    dom
}

struct DomBuilder<'r> {
    parents: Vec<Handle>,
    options: &'r HtmlOptions,
    names: &'r dyn NameResolver,
}

impl DomBuilder<'_> {
    fn append(&self, handle: Handle) {
        if let Some(parent) = self.parents.last() {
            parent.children.borrow_mut().push(handle);
        }
    }

    fn open(&mut self, tag: &str, attrs: Vec<(&str, &str)>) {
        let element = create_element(tag, attrs);
        self.append(element.clone());
        self.parents.push(element);
    }

    fn close(&mut self) {
        self.parents.pop();
    }

    fn labeled_span(&self, class: &str, label: String) {
        let span = create_element("span", vec![("class", class)]);
        span.children.borrow_mut().push(create_text(&label));
        self.append(span);
    }
}

impl Visitor for DomBuilder<'_> {
    fn visit_text<'a>(&mut self, node: &'a Node, text: &'a str) -> Cow<'a, Node> {
        self.append(create_text(text));
        Cow::Borrowed(node)
    }

    fn visit_newline<'a>(&mut self, node: &'a Node) -> Cow<'a, Node> {
        self.append(create_element("br", vec![]));
        Cow::Borrowed(node)
    }

    fn visit_style<'a>(&mut self, node: &'a Node, style: Style, child: &'a Node) -> Cow<'a, Node> {
        match style {
            Style::Bold => self.open("strong", vec![]),
            Style::Italic => self.open("em", vec![]),
            Style::Underline => self.open("u", vec![]),
            Style::Strikethrough => self.open("del", vec![]),
            Style::Mono | Style::InlineCode => self.open("code", vec![]),
            Style::MultiMono => self.open("pre", vec![]),
            Style::BlockQuote => self.open("blockquote", vec![]),
            Style::Spoiler => self.open("span", vec![("class", "d-spoiler")]),
        }
        let result = walk_style(self, node, style, child);
        self.close();
        result
    }

    fn visit_code<'a>(&mut self, node: &'a Node, language: &'a str, body: &'a str) -> Cow<'a, Node> {
        let class = if language.is_empty() {
            self.options.code_class.clone()
        } else {
            format!("{} {}", self.options.code_class, language)
        };
        self.open("pre", vec![]);
        self.open("code", vec![("class", &class)]);
        self.append(create_text(body));
        self.close();
        self.close();
        Cow::Borrowed(node)
    }

    fn visit_link<'a>(
        &mut self,
        node: &'a Node,
        url: &'a str,
        child: &'a Node,
        hide_preview: bool,
    ) -> Cow<'a, Node> {
        self.open("a", vec![("href", url)]);
        let result = walk_link(self, node, url, child, hide_preview);
        self.close();
        result
    }

    fn visit_mention<'a>(&mut self, node: &'a Node, target: MentionTarget) -> Cow<'a, Node> {
        let name = match target {
            MentionTarget::User(id) => self.names.user(id).unwrap_or_else(|| id.to_string()),
            MentionTarget::Everyone => "everyone".to_string(),
            MentionTarget::Here => "here".to_string(),
        };
        self.labeled_span("d-mention d-user", format!("@{name}"));
        Cow::Borrowed(node)
    }

    fn visit_channel<'a>(&mut self, node: &'a Node, id: u64) -> Cow<'a, Node> {
        let name = self.names.channel(id).unwrap_or_else(|| id.to_string());
        self.labeled_span("d-mention d-channel", format!("#{name}"));
        Cow::Borrowed(node)
    }

    fn visit_role<'a>(&mut self, node: &'a Node, id: u64) -> Cow<'a, Node> {
        let name = self.names.role(id).unwrap_or_else(|| id.to_string());
        self.labeled_span("d-mention d-role", format!("&{name}"));
        Cow::Borrowed(node)
    }

    fn visit_custom_emoji<'a>(&mut self, node: &'a Node, name: &'a str) -> Cow<'a, Node> {
        self.labeled_span("d-emoji", format!(":{name}:"));
        Cow::Borrowed(node)
    }
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(DomNode {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the children of the fragment container
fn serialize_dom(dom: &RcDom) -> Result<String, FormatError> {
    let mut output = Vec::new();

    let container = dom
        .document
        .children
        .borrow()
        .first()
        .ok_or_else(|| FormatError::SerializationError("Empty document".to_string()))?
        .clone();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}
