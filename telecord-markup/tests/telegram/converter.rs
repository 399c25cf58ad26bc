//! Telegram message → Discord parts.

use telecord_markup::entities::{FileRef, PhotoSize, User};
use telecord_markup::{
    ConverterOptions, EntityKind, FileUrlGenerator, Message, MessageEntity, TelegramConverter,
};

struct FixedUrl(&'static str);

impl FileUrlGenerator for FixedUrl {
    fn file_url(&self, _: &str, _: Option<&str>, _: Option<&str>, _: Option<&str>) -> String {
        self.0.to_string()
    }
}

fn from(username: &str) -> Option<User> {
    Some(User {
        username: Some(username.to_string()),
        ..User::default()
    })
}

fn message(text: &str, entities: Vec<MessageEntity>) -> Message {
    Message {
        from: from("xx"),
        text: Some(text.to_string()),
        entities: Some(entities),
        ..Message::default()
    }
}

fn convert(max_message_length: usize, message: &Message) -> Vec<String> {
    let options = ConverterOptions {
        max_message_length,
        ..ConverterOptions::default()
    };
    TelegramConverter::new(options, &FixedUrl("URL"))
        .convert(message)
        .unwrap()
        .parts
}

fn bold(offset: usize, length: usize) -> MessageEntity {
    MessageEntity::new(EntityKind::Bold, offset, length)
}

#[test]
fn test_split_in_paragraphs() {
    let msg = message("12 34\n56789", vec![]);
    assert_eq!(convert(13, &msg), vec!["**xx**: 12 34", "**xx**: 56789"]);
    assert_eq!(convert(17, &msg), vec!["**xx**: 12 34", "**xx**: 56789"]);
}

#[test]
fn test_split_on_spaces() {
    let msg = message("12 34\n5678", vec![]);
    assert_eq!(
        convert(12, &msg),
        vec!["**xx**: 12", "**xx**: 34", "**xx**: 5678"]
    );
}

#[test]
fn test_split_on_letters() {
    assert_eq!(
        convert(12, &message("12 34\n56789", vec![])),
        vec!["**xx**: 12", "**xx**: 34", "**xx**: 5678", "**xx**: 9"]
    );
    assert_eq!(
        convert(12, &message("56789\n12 34", vec![])),
        vec!["**xx**: 5678", "**xx**: 9", "**xx**: 12", "**xx**: 34"]
    );
}

#[test]
fn test_split_markup() {
    assert_eq!(
        convert(16, &message("12 34\n5678", vec![bold(2, 9)])),
        vec!["**xx**: 12", "**xx**: **34**", "**xx**: **5678**"]
    );
    assert_eq!(
        convert(20, &message("12 34\n56789", vec![bold(2, 9)])),
        vec!["**xx**: 12 **34**", "**xx**: **56789**"]
    );
    assert_eq!(
        convert(
            20,
            &message("12 34\n56789", vec![MessageEntity::new(EntityKind::Code, 0, 11)])
        ),
        vec!["**xx**: ``12 34``", "**xx**: ``56789``"]
    );
}

#[test]
fn test_limit_too_small() {
    let converter = |max| {
        TelegramConverter::new(
            ConverterOptions {
                max_message_length: max,
                ..ConverterOptions::default()
            },
            &FixedUrl("URL"),
        )
        .convert(&message("123456789", vec![]))
        .is_err()
    };
    assert!(converter(5));
    assert!(converter(7));
    assert!(converter(8));

    let styled = TelegramConverter::new(
        ConverterOptions {
            max_message_length: 9,
            ..ConverterOptions::default()
        },
        &FixedUrl("URL"),
    )
    .convert(&message("123456789", vec![bold(2, 9)]));
    assert!(styled.is_err());
}

#[test]
fn test_link_in_the_last_part() {
    let msg = Message {
        animation: Some(FileRef::default()),
        ..message("1234567890xy\nabc456789", vec![])
    };
    assert_eq!(
        convert(27, &msg),
        vec!["**xx**: 1234567890xy", "**xx**: abc456789\nGIF: URL"]
    );
    assert_eq!(
        convert(25, &msg),
        vec!["**xx**: 1234567890xy", "**xx**: abc456789", "**xx**: GIF: URL"]
    );
}

#[test]
fn test_gif_without_text() {
    let msg = Message {
        from: from("xx"),
        animation: Some(FileRef::default()),
        ..Message::default()
    };
    assert_eq!(convert(100, &msg), vec!["**xx**: GIF: URL"]);
}

#[test]
fn test_photo_becomes_embed() {
    let msg = Message {
        from: from("xx"),
        photo: Some(vec![PhotoSize::default()]),
        ..Message::default()
    };
    let converted = TelegramConverter::new(ConverterOptions::default(), &FixedUrl("http://url/"))
        .convert(&msg)
        .unwrap();
    assert_eq!(converted.parts, vec!["**xx**:"]);
    let embed = converted.embed.unwrap();
    assert_eq!(embed.image_url, "http://url/");
}

#[test]
fn test_quote_skips_leading_blank_lines() {
    let reply = Message {
        from: from("yy"),
        text: Some(format!("{}123456789x123456789", "\n".repeat(40))),
        entities: Some(vec![bold(0, 50)]),
        ..Message::default()
    };
    let msg = Message {
        reply_to_message: Some(Box::new(reply)),
        ..message("zz", vec![])
    };
    assert_eq!(
        convert(100, &msg),
        vec!["**xx**:\n> **123456789x**123456789\nzz"]
    );
}

#[test]
fn test_long_quote_is_trimmed() {
    let xs = "x".repeat(40);
    let reply = Message {
        from: from("yy"),
        text: Some(format!("{xs}123456789x123456789y123456789")),
        entities: Some(vec![bold(0, 60)]),
        ..Message::default()
    };
    let msg = Message {
        reply_to_message: Some(Box::new(reply)),
        ..message("zz", vec![])
    };
    assert_eq!(
        convert(100, &msg),
        vec![format!("**xx**:\n> **{xs}1234567...**\nzz")]
    );
}
