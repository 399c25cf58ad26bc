//! Telegram HTML format
//!
//! Renders a Discord formatting tree in the HTML subset accepted by the Telegram Bot API
//! (`parse_mode=HTML`). The mapping mirrors the plain HTML format with a few tags swapped
//! for what Telegram supports: block quotes become `<pre>`, spoilers use `<tg-spoiler>`,
//! mentions become `<code>@name</code>`.
//!
//! Besides the markup the serializer reports the plain-text length (in UTF-16 units, the
//! unit Telegram's limits are expressed in), whether a link asked for its preview to be
//! suppressed, and, if the message had spoilers, two plain-text streams: one with the
//! spoiler text blanked out and one with it revealed.

mod serializer;

pub use serializer::{render_telegram, TelegramRender};

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Node;
use crate::resolve::LiteralNames;

/// Format implementation for Telegram HTML. Mentions render as their ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelegramFormat;

impl Format for TelegramFormat {
    fn name(&self) -> &str {
        "telegram"
    }

    fn description(&self) -> &str {
        "Telegram Bot API HTML"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tg"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        Ok(render_telegram(tree, &LiteralNames).text)
    }
}
