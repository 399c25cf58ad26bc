//! Telegram HTML serialization

use crate::common::escape::{escape_html, ZERO_WIDTH_SPACE};
use crate::common::utf16;
use crate::ir::nodes::{MentionTarget, Node, Style};
use crate::ir::visit::{walk_link, walk_style, Visitor};
use crate::resolve::NameResolver;
use std::borrow::Cow;
use tracing::debug;

const REDACTED: char = '█';

/// Result of rendering a tree for Telegram
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelegramRender {
    /// HTML body, without the author header
    pub text: String,
    /// Length of the visible text in UTF-16 units
    pub plain_len: usize,
    /// Set when an autolink asked for the link preview to be suppressed
    pub hide_preview: bool,
    /// Plain text with every non-space spoiler character replaced by `█`
    pub redacted: Option<String>,
    /// Plain text with spoilers shown
    pub revealed: Option<String>,
}

/// Render `tree` as Telegram HTML, resolving mention names through `names`.
pub fn render_telegram(tree: &Node, names: &dyn NameResolver) -> TelegramRender {
    let mut writer = TelegramWriter {
        names,
        out: TelegramRender::default(),
        plain: String::new(),
        redacted: String::new(),
        spoiler_depth: 0,
        seen_spoiler: false,
    };
    writer.visit(tree);
    writer.finish()
}

struct TelegramWriter<'r> {
    names: &'r dyn NameResolver,
    out: TelegramRender,
    plain: String,
    redacted: String,
    spoiler_depth: usize,
    seen_spoiler: bool,
}

impl TelegramWriter<'_> {
    fn markup(&mut self, markup: &str) {
        self.out.text.push_str(markup);
    }

    fn text(&mut self, text: &str) {
        self.out.plain_len += utf16::len(text);
        self.plain.push_str(text);
        if self.spoiler_depth > 0 {
            self.redacted.extend(
                text.chars()
                    .map(|c| if c.is_whitespace() { c } else { REDACTED }),
            );
        } else {
            self.redacted.push_str(text);
        }
        let escaped = escape_html(text).replace(ZERO_WIDTH_SPACE, "");
        self.out.text.push_str(&escaped);
    }

    fn code_label(&mut self, label: &str) {
        self.markup("<code>");
        self.text(label);
        self.markup("</code>");
    }

    fn finish(mut self) -> TelegramRender {
        if self.seen_spoiler {
            debug!("spoiler streams produced");
            self.out.redacted = Some(self.redacted);
            self.out.revealed = Some(self.plain);
        }
        self.out
    }
}

fn tag(style: Style) -> &'static str {
    match style {
        Style::Bold => "strong",
        Style::Italic => "em",
        Style::Underline => "u",
        Style::Strikethrough => "del",
        Style::Mono | Style::InlineCode => "code",
        Style::MultiMono | Style::BlockQuote => "pre",
        Style::Spoiler => "tg-spoiler",
    }
}

/// Normalizes a link target for an attribute value; unparsable targets pass through.
fn href(url: &str) -> String {
    let normalized = match url::Url::parse(url) {
        Ok(parsed) => parsed.to_string(),
        Err(err) => {
            debug!(url, %err, "link kept verbatim");
            url.to_string()
        }
    };
    escape_html(&normalized).replace('"', "&quot;")
}

impl Visitor for TelegramWriter<'_> {
    fn visit_text<'a>(&mut self, node: &'a Node, text: &'a str) -> Cow<'a, Node> {
        self.text(text);
        Cow::Borrowed(node)
    }

    fn visit_newline<'a>(&mut self, node: &'a Node) -> Cow<'a, Node> {
        self.text("\n");
        Cow::Borrowed(node)
    }

    fn visit_style<'a>(&mut self, node: &'a Node, style: Style, child: &'a Node) -> Cow<'a, Node> {
        let tag = tag(style);
        if style == Style::Spoiler {
            self.seen_spoiler = true;
            self.spoiler_depth += 1;
        }
        self.markup(&format!("<{tag}>"));
        let result = walk_style(self, node, style, child);
        self.markup(&format!("</{tag}>"));
        if style == Style::Spoiler {
            self.spoiler_depth -= 1;
        }
        result
    }

    fn visit_code<'a>(&mut self, node: &'a Node, language: &'a str, body: &'a str) -> Cow<'a, Node> {
        if language.is_empty() {
            self.markup("<pre><code>");
        } else {
            self.markup(&format!(
                "<pre><code class=\"language-{}\">",
                escape_html(language)
            ));
        }
        self.text(body);
        self.markup("</code></pre>");
        Cow::Borrowed(node)
    }

    fn visit_link<'a>(
        &mut self,
        node: &'a Node,
        url: &'a str,
        child: &'a Node,
        hide_preview: bool,
    ) -> Cow<'a, Node> {
        if hide_preview {
            self.out.hide_preview = true;
        }
        self.markup(&format!("<a href=\"{}\">", href(url)));
        let result = walk_link(self, node, url, child, hide_preview);
        self.markup("</a>");
        result
    }

    fn visit_mention<'a>(&mut self, node: &'a Node, target: MentionTarget) -> Cow<'a, Node> {
        let name = match target {
            MentionTarget::User(id) => self.names.user(id).unwrap_or_else(|| {
                debug!(id, "user name unresolved");
                id.to_string()
            }),
            MentionTarget::Everyone => "everyone".to_string(),
            MentionTarget::Here => "here".to_string(),
        };
        self.code_label(&format!("@{name}"));
        Cow::Borrowed(node)
    }

    fn visit_channel<'a>(&mut self, node: &'a Node, id: u64) -> Cow<'a, Node> {
        let name = self.names.channel(id).unwrap_or_else(|| {
            debug!(id, "channel name unresolved");
            id.to_string()
        });
        self.code_label(&format!("#{name}"));
        Cow::Borrowed(node)
    }

    fn visit_role<'a>(&mut self, node: &'a Node, id: u64) -> Cow<'a, Node> {
        let name = self.names.role(id).unwrap_or_else(|| {
            debug!(id, "role name unresolved");
            id.to_string()
        });
        self.code_label(&format!("@{name}"));
        Cow::Borrowed(node)
    }

    fn visit_custom_emoji<'a>(&mut self, node: &'a Node, name: &'a str) -> Cow<'a, Node> {
        self.markup("<b>");
        self.text(&format!(":{name}:"));
        self.markup("</b>");
        Cow::Borrowed(node)
    }
}
