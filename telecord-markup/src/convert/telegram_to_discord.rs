//! Telegram message to Discord message parts

use crate::common::escape::escape_discord;
use crate::common::utf16;
use crate::entities::Message;
use crate::error::RenderError;
use crate::resolve::FileUrlGenerator;
use crate::slicer::{next_slice, quote_preview};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Discord's per-message cap, in UTF-16 units
    pub max_message_length: usize,
    /// Longest reply preview before it is cut with `...`
    pub quote_max_length: usize,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        ConverterOptions {
            max_message_length: 2000,
            quote_max_length: 50,
        }
    }
}

/// Image shown as a Discord embed rather than a bare link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub image_url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Converted {
    /// Discord messages to send, in order, each within the length cap
    pub parts: Vec<String>,
    /// Attached to the first part when present
    pub embed: Option<Embed>,
}

/// Converts Telegram messages into Discord message parts.
///
/// Every part starts with the bold sender name. A reply gets a one-line quote of the
/// replied-to message ahead of the first part, and media become either an embed or a
/// trailing link.
pub struct TelegramConverter<'f> {
    options: ConverterOptions,
    files: &'f dyn FileUrlGenerator,
}

impl<'f> TelegramConverter<'f> {
    pub fn new(options: ConverterOptions, files: &'f dyn FileUrlGenerator) -> Self {
        TelegramConverter { options, files }
    }

    pub fn convert(&self, message: &Message) -> Result<Converted, RenderError> {
        let mut header = format!("**{}**:", escape_discord(&message.sender_name()));

        if let Some(chat) = &message.forward_from_chat {
            let username = chat.username.as_deref().unwrap_or_default();
            let id = message.forward_from_message_id.unwrap_or_default();
            return Ok(Converted {
                parts: vec![format!("{header} https://t.me/{username}/{id}")],
                embed: None,
            });
        }

        let forward = forward_line(message);
        if let Some(forward) = &forward {
            header.push('\n');
            header.push_str(forward);
        }
        let header_len = utf16::len(&header);

        let (link, embed) = self.attachment(message);
        let mut quote = match &message.reply_to_message {
            Some(reply) => quote_preview(reply, self.options.quote_max_length)?,
            None => None,
        };

        let (text, entities) = message.text_and_entities();
        let units = utf16::encode(text.unwrap_or_default());
        let max = self.options.max_message_length;
        let mut parts: Vec<String> = Vec::new();
        let mut start = 0;
        loop {
            let lead = quote.take();
            let mut budget = max.saturating_sub(header_len + 1);
            if let Some(lead) = &lead {
                budget = budget.saturating_sub(utf16::len(lead));
            }

            let part = match (lead, next_slice(&units, entities, start, budget)?) {
                (None, None) => break,
                (Some(lead), None) => lead,
                (lead, Some(chunk)) => {
                    start = chunk.next;
                    lead.unwrap_or_default() + &chunk.text
                }
            };
            let separator = if forward.is_some() || part.contains('\n') {
                "\n"
            } else {
                " "
            };
            parts.push(format!("{header}{separator}{part}"));
        }

        match link {
            Some(link) => {
                let fits = parts
                    .last()
                    .is_some_and(|last| utf16::len(last) + utf16::len(&link) + 1 <= max);
                match parts.last_mut() {
                    Some(last) if fits => {
                        last.push('\n');
                        last.push_str(&link);
                    }
                    _ => {
                        let part = format!("{header} {link}");
                        parts.push(part);
                    }
                }
            }
            None if parts.is_empty() => parts.push(header),
            None => {}
        }

        debug!(
            parts = parts.len(),
            embed = embed.is_some(),
            "converted telegram message"
        );
        Ok(Converted { parts, embed })
    }

    /// Media as either a trailing link or an image embed.
    fn attachment(&self, message: &Message) -> (Option<String>, Option<Embed>) {
        let url = |file_id: &str, extension: Option<&str>| {
            self.files.file_url(file_id, extension, None, None)
        };
        let embed = |kind: &str, image_url: String| Embed {
            description: format!("[{kind}]({image_url})"),
            image_url,
        };

        if let Some(photos) = &message.photo {
            let photo = photos
                .iter()
                .find(|p| p.width == 800)
                .or_else(|| photos.iter().max_by_key(|p| p.width));
            if let Some(photo) = photo {
                return (None, Some(embed("photo", url(&photo.file_id, None))));
            }
        }
        if let Some(sticker) = &message.sticker {
            if sticker.is_animated {
                return (Some("\\<animated sticker\\>".to_string()), None);
            }
            return (None, Some(embed("sticker", url(&sticker.file_id, None))));
        }
        if let Some(animation) = &message.animation {
            return (Some(format!("GIF: {}", url(&animation.file_id, Some("mp4")))), None);
        }
        if let Some(voice) = &message.voice {
            return (Some(format!("Audio: {}", url(&voice.file_id, None))), None);
        }
        if let Some(video) = &message.video_note {
            return (Some(format!("Video: {}", url(&video.file_id, Some("mp4")))), None);
        }
        if let Some(document) = &message.document {
            let name = document.file_name.as_deref();
            let link = self.files.file_url(
                &document.file_id,
                None,
                document.mime_type.as_deref(),
                name,
            );
            let label = escape_discord(name.unwrap_or_default());
            return (Some(format!("File {label} {link}")), None);
        }
        (None, None)
    }
}

fn forward_line(message: &Message) -> Option<String> {
    if let Some(user) = &message.forward_from {
        let from = match &user.username {
            Some(username) => format!("@{}", escape_discord(username)),
            None => escape_discord(&user.display_name()),
        };
        return Some(format!("**Forwarded from {from}**"));
    }
    message
        .forward_sender_name
        .as_deref()
        .map(|name| format!("**Forwarded from {}**", escape_discord(name)))
}
