//! Telegram message entities and the message subset the converters read
//!
//! Entities are tagged `(offset, length)` ranges over the message text, measured in
//! UTF-16 code units. They are assumed to nest properly: two entities are either
//! disjoint or one contains the other.

pub mod message;

pub use message::{Chat, Document, FileRef, Message, PhotoSize, Sticker, User};

use serde::{Deserialize, Serialize};

/// Entity type tag. Unknown Bot API type strings are kept as [`EntityKind::Other`] so the
/// span renderer can reject them by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    Url,
    TextLink,
    TextMention,
    Mention,
    BotCommand,
    Hashtag,
    Cashtag,
    Email,
    PhoneNumber,
    CustomEmoji,
    Other(String),
}

impl EntityKind {
    pub fn as_str(&self) -> &str {
        match self {
            EntityKind::Bold => "bold",
            EntityKind::Italic => "italic",
            EntityKind::Underline => "underline",
            EntityKind::Strikethrough => "strikethrough",
            EntityKind::Spoiler => "spoiler",
            EntityKind::Code => "code",
            EntityKind::Pre => "pre",
            EntityKind::Url => "url",
            EntityKind::TextLink => "text_link",
            EntityKind::TextMention => "text_mention",
            EntityKind::Mention => "mention",
            EntityKind::BotCommand => "bot_command",
            EntityKind::Hashtag => "hashtag",
            EntityKind::Cashtag => "cashtag",
            EntityKind::Email => "email",
            EntityKind::PhoneNumber => "phone_number",
            EntityKind::CustomEmoji => "custom_emoji",
            EntityKind::Other(name) => name,
        }
    }
}

impl From<String> for EntityKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "bold" => EntityKind::Bold,
            "italic" => EntityKind::Italic,
            "underline" => EntityKind::Underline,
            "strikethrough" => EntityKind::Strikethrough,
            "spoiler" => EntityKind::Spoiler,
            "code" => EntityKind::Code,
            "pre" => EntityKind::Pre,
            "url" => EntityKind::Url,
            "text_link" => EntityKind::TextLink,
            "text_mention" => EntityKind::TextMention,
            "mention" => EntityKind::Mention,
            "bot_command" => EntityKind::BotCommand,
            "hashtag" => EntityKind::Hashtag,
            "cashtag" => EntityKind::Cashtag,
            "email" => EntityKind::Email,
            "phone_number" => EntityKind::PhoneNumber,
            "custom_emoji" => EntityKind::CustomEmoji,
            _ => EntityKind::Other(name),
        }
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One formatting span of a Telegram message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub offset: usize,
    pub length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_emoji_id: Option<String>,
}

impl MessageEntity {
    pub fn new(kind: EntityKind, offset: usize, length: usize) -> Self {
        MessageEntity {
            kind,
            offset,
            length,
            url: None,
            user: None,
            language: None,
            custom_emoji_id: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Exclusive end offset.
    pub fn finish(&self) -> usize {
        self.offset + self.length
    }

    /// Re-bases the entity onto the window `[start, start + length)`, trimming whatever
    /// falls outside it. Callers are expected to pass only intersecting entities.
    pub fn clip(&self, start: usize, length: usize) -> MessageEntity {
        let (offset, mut len) = if self.offset < start {
            (0, self.length.saturating_sub(start - self.offset))
        } else {
            (self.offset - start, self.length)
        };
        if offset + len > length {
            len = length.saturating_sub(offset);
        }
        MessageEntity {
            offset,
            length: len,
            ..self.clone()
        }
    }
}

/// Clips every entity intersecting `[start, start + length)` onto that window and drops
/// the rest.
pub fn clip_all(entities: &[MessageEntity], start: usize, length: usize) -> Vec<MessageEntity> {
    let end = start + length;
    entities
        .iter()
        .filter(|e| e.offset < end && start < e.finish())
        .map(|e| e.clip(start, length))
        .collect()
}
