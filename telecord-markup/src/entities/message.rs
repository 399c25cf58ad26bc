//! Serde model for the parts of a Bot API `Message` the converters use

use super::MessageEntity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl User {
    /// Username if set, else "first last".
    pub fn display_name(&self) -> String {
        if let Some(username) = &self.username {
            return username.clone();
        }
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Chat {
    #[serde(default)]
    pub id: i64,
    pub username: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sticker {
    pub file_id: String,
    #[serde(default)]
    pub is_animated: bool,
}

/// Animations, voice notes and video notes; only the handle matters here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileRef {
    pub file_id: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: i64,
    pub from: Option<User>,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub entities: Option<Vec<MessageEntity>>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub reply_to_message: Option<Box<Message>>,
    pub forward_from: Option<User>,
    pub forward_sender_name: Option<String>,
    pub forward_from_chat: Option<Chat>,
    pub forward_from_message_id: Option<i64>,
    pub photo: Option<Vec<PhotoSize>>,
    pub sticker: Option<Sticker>,
    pub animation: Option<FileRef>,
    pub voice: Option<FileRef>,
    pub video_note: Option<FileRef>,
    pub document: Option<Document>,
}

impl Message {
    /// Text or caption, with the matching entity list.
    pub fn text_and_entities(&self) -> (Option<&str>, &[MessageEntity]) {
        let text = self.text.as_deref().or(self.caption.as_deref());
        let entities = self
            .entities
            .as_deref()
            .or(self.caption_entities.as_deref())
            .unwrap_or(&[]);
        (text, entities)
    }

    /// Display name of the sender, empty for channel posts without one.
    pub fn sender_name(&self) -> String {
        self.from.as_ref().map(User::display_name).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let user = User {
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            ..User::default()
        };
        assert_eq!(user.display_name(), "Ada Lovelace");
        let user = User {
            username: Some("ada".to_string()),
            ..user
        };
        assert_eq!(user.display_name(), "ada");
    }

    #[test]
    fn test_caption_fallback() {
        let json = r#"{
            "message_id": 7,
            "from": {"id": 1, "is_bot": false, "first_name": "A"},
            "caption": "look",
            "caption_entities": [{"type": "bold", "offset": 0, "length": 4}],
            "photo": [{"file_id": "p", "width": 90, "height": 90}]
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        let (text, entities) = message.text_and_entities();
        assert_eq!(text, Some("look"));
        assert_eq!(entities.len(), 1);
        assert_eq!(message.sender_name(), "A");
    }
}
