//! Entity spans rendered as Discord markdown.

use telecord_markup::common::utf16;
use telecord_markup::spans::render;
use telecord_markup::{EntityKind, MessageEntity};

fn e(kind: EntityKind, offset: usize, length: usize) -> MessageEntity {
    MessageEntity::new(kind, offset, length)
}

fn expect(text: &str, entities: &[MessageEntity], markdown: &str) {
    let actual = render(&utf16::encode(text), entities, false).unwrap();
    assert_eq!(actual, markdown);
}

#[test]
fn test_lift_spaces() {
    expect("  123   ", &[e(EntityKind::Bold, 0, 5)], "  **123**   ");
    expect(
        "0 234 6",
        &[e(EntityKind::Italic, 0, 7), e(EntityKind::Bold, 1, 5)],
        "*0* ***234*** *6*",
    );
    expect(
        "0 234 6",
        &[e(EntityKind::Bold, 0, 7), e(EntityKind::Italic, 1, 5)],
        "**0** ***234*** **6**",
    );
}

#[test]
fn test_code_keeps_its_spaces() {
    expect(" 123 ", &[e(EntityKind::Code, 0, 5)], "`` 123 ``");
    expect(" 123 ", &[e(EntityKind::Pre, 0, 5)], "``` 123 ```");
}

#[test]
fn test_shared_start_nests_outer_first() {
    expect(
        "0123456",
        &[e(EntityKind::Bold, 0, 7), e(EntityKind::Italic, 0, 3)],
        "***012*3456**",
    );
    expect(
        "0123456",
        &[e(EntityKind::Italic, 0, 7), e(EntityKind::Bold, 0, 3)],
        "***012**3456*",
    );
}

#[test]
fn test_various_formatting() {
    expect(
        "This is just an example with nested tags!",
        &[
            e(EntityKind::Bold, 5, 2),
            e(EntityKind::Italic, 13, 2),
            e(EntityKind::Code, 15, 8),
            e(EntityKind::Bold, 23, 17),
            e(EntityKind::Italic, 24, 4),
            e(EntityKind::Italic, 29, 7),
            e(EntityKind::Italic, 36, 4),
        ],
        "This **is** just *an*`` example`` ***with*** ***nested*** ***tags***!",
    );
}

#[test]
fn test_custom_emoji_passes_through() {
    let mut emoji = e(EntityKind::CustomEmoji, 3, 2);
    emoji.custom_emoji_id = Some("5422352101885882552".to_string());
    expect("123\u{1f972}456", &[emoji], "123\u{1f972}456");
}

#[test]
fn test_text_link_lifts_spaces_and_appends_url() {
    expect(
        " please click here ",
        &[
            e(EntityKind::TextLink, 0, 19).with_url("http://blabla"),
            e(EntityKind::Bold, 7, 7),
        ],
        " please **click** here  (http://blabla)",
    );
}

#[test]
fn test_backticks_inside_pre_are_defused() {
    expect(
        "`12`34``5```6789`",
        &[e(EntityKind::Pre, 0, 17)],
        "````\u{200b}12`34`\u{200b}`5`\u{200b}`\u{200b}`6789`\u{200b}```",
    );
}

#[test]
fn test_markdown_characters_are_escaped_outside_code() {
    expect("a*b_c", &[], "a\\*b\\_c");
    expect("a*b", &[e(EntityKind::Code, 0, 3)], "``a*b``");
}

#[test]
fn test_quote_mode_wraps_urls() {
    let text = utf16::encode("see https://x.io");
    let url = [e(EntityKind::Url, 4, 12)];
    assert_eq!(render(&text, &url, true).unwrap(), "see <https://x.io>");
    assert_eq!(render(&text, &url, false).unwrap(), "see https://x.io");
}
