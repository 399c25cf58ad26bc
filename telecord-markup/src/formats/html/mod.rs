//! HTML format implementation
//!
//! Renders a Discord formatting tree as an HTML fragment (no document wrapper), for web
//! views of bridged chat logs.
//!
//! # Library Choice
//!
//! The DOM is assembled with `markup5ever_rcdom` and written out by `html5ever`'s
//! serializer, which takes care of text and attribute escaping.
//!
//! # Element Mapping Table
//!
//! | Node                   | HTML                                                    |
//! |------------------------|---------------------------------------------------------|
//! | Text                   | escaped text                                            |
//! | Newline                | `<br>`                                                  |
//! | Bold                   | `<strong>`                                              |
//! | Italic                 | `<em>`                                                  |
//! | Underline              | `<u>`                                                   |
//! | Strikethrough          | `<del>`                                                 |
//! | Mono / InlineCode      | `<code>`                                                |
//! | MultiMono              | `<pre>`                                                 |
//! | BlockQuote             | `<blockquote>`                                          |
//! | Spoiler                | `<span class="d-spoiler">`                              |
//! | Code                   | `<pre><code class="hljs lang">`                         |
//! | Link                   | `<a href="url">`                                        |
//! | Mention                | `<span class="d-mention d-user">@name</span>`           |
//! | Role                   | `<span class="d-mention d-role">&name</span>`           |
//! | Channel                | `<span class="d-mention d-channel">#name</span>`        |
//! | CustomEmoji            | `<span class="d-emoji">:name:</span>`                   |
//!
//! Names come from a [`NameResolver`]; the format itself uses [`LiteralNames`], so
//! mentions show their numeric ids.

mod serializer;

pub use serializer::serialize_to_html;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Node;
use crate::resolve::LiteralNames;

/// Options for HTML serialization
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    /// Class on the `<code>` element of fenced blocks, for client-side highlighters
    pub code_class: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        HtmlOptions {
            code_class: "hljs".to_string(),
        }
    }
}

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        serialize_to_html(tree, &self.options, &LiteralNames)
    }
}
