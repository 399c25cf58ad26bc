//! Discord message → Telegram HTML.

use telecord_markup::{DiscordReader, LiteralNames};

#[test]
fn test_link_with_quotes_is_percent_encoded_in_href() {
    let message = DiscordReader::new(&LiteralNames)
        .read(
            "xx",
            "Ссылка: <https://en.wikipedia.org/wiki/Special:Search/suicide_incategory:\"Transgender_and_transsexual_men\">",
            &[],
        )
        .unwrap();
    assert_eq!(
        message.text,
        "<b>xx</b>:\nСсылка: <a href=\"https://en.wikipedia.org/wiki/Special:Search/suicide_incategory:%22Transgender_and_transsexual_men%22\">https://en.wikipedia.org/wiki/Special:Search/suicide_incategory:\"Transgender_and_transsexual_men\"</a>"
    );
    assert!(message.hide_preview);
}

#[test]
fn test_spoiler_after_quote_reveals_plain_text() {
    let message = DiscordReader::new(&LiteralNames)
        .read(
            "xx",
            "> В мусульманских группах в социальных сетях появились призывы найти и наказать Илью Мэддисона, в том числе от сторонников ИГИЛ[33].\n||Наконец-то ИГИЛ сделал что-то хорошее.||",
            &[],
        )
        .unwrap();
    assert_eq!(
        message.revealed.as_deref(),
        Some("В мусульманских группах в социальных сетях появились призывы найти и наказать Илью Мэддисона, в том числе от сторонников ИГИЛ[33].\nНаконец-то ИГИЛ сделал что-то хорошее.")
    );
    let redacted = message.redacted.unwrap();
    assert!(redacted.ends_with("\n██████████ ████ ██████ ██████ ████████"));
}

#[test]
fn test_no_spoiler_streams_without_spoilers() {
    let message = DiscordReader::new(&LiteralNames)
        .read("xx", "**hi**", &[])
        .unwrap();
    assert_eq!(message.text, "<b>xx</b>: <strong>hi</strong>");
    assert_eq!(message.revealed, None);
    assert_eq!(message.redacted, None);
}
