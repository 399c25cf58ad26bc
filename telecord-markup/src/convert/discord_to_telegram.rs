//! Discord message to Telegram HTML

use crate::common::escape::escape_html;
use crate::common::utf16;
use crate::error::ParseError;
use crate::formats::discord::DiscordParser;
use crate::formats::telegram::render_telegram;
use crate::resolve::NameResolver;
use serde::Serialize;
use tracing::debug;

/// A Discord message ready to send through the Bot API with HTML parse mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TelegramMessage {
    /// Author header followed by the HTML body
    pub text: String,
    /// Visible length of the body in UTF-16 units
    pub plain_len: usize,
    pub hide_preview: bool,
    /// Sent as a photo with `text` as its caption when set
    pub photo_url: Option<String>,
    /// Plain body with spoiler characters blacked out, when the message had spoilers
    pub redacted: Option<String>,
    /// Plain body with spoilers shown, when the message had spoilers
    pub revealed: Option<String>,
}

/// Parses Discord messages and renders them for Telegram.
pub struct DiscordReader<'r> {
    parser: DiscordParser,
    names: &'r dyn NameResolver,
    inline_header_limit: usize,
}

impl<'r> DiscordReader<'r> {
    pub fn new(names: &'r dyn NameResolver) -> Self {
        DiscordReader {
            parser: DiscordParser::new(),
            names,
            inline_header_limit: 60,
        }
    }

    /// Combined header and body length from which the body starts on its own line.
    pub fn with_inline_header_limit(mut self, limit: usize) -> Self {
        self.inline_header_limit = limit;
        self
    }

    /// Converts one message. A single attachment becomes the photo; several are listed
    /// as links after the body.
    pub fn read(
        &self,
        author: &str,
        content: &str,
        attachments: &[String],
    ) -> Result<TelegramMessage, ParseError> {
        let tree = self.parser.parse(content)?;
        let render = render_telegram(&tree, self.names);

        let mut body = render.text;
        let photo_url = match attachments {
            [single] => Some(single.clone()),
            _ => {
                for url in attachments {
                    if !body.is_empty() {
                        body.push_str("\n\n");
                    }
                    body.push_str(&escape_html(url));
                }
                None
            }
        };

        let header = format!("<b>{}</b>:", escape_html(author));
        let own_line = body.contains('\n')
            || render.plain_len + utf16::len(author) + 2 >= self.inline_header_limit;
        let separator = if own_line { "\n" } else { " " };
        debug!(
            plain_len = render.plain_len,
            spoiler = render.revealed.is_some(),
            "read discord message"
        );

        Ok(TelegramMessage {
            text: format!("{header}{separator}{body}"),
            plain_len: render.plain_len,
            hide_preview: render.hide_preview,
            photo_url,
            redacted: render.redacted,
            revealed: render.revealed,
        })
    }
}
