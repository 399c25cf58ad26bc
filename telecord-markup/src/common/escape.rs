//! Escaping for the three output dialects.
//!
//! Discord markdown escaping backslash-prefixes every character that could be read as
//! syntax. Letters, decimal digits, whitespace, sentence punctuation and everything from
//! U+00FF upwards (emoji included) pass through untouched.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DISCORD_RESERVED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{Ll}\p{Lu}\p{Lt}\p{Lo}\p{Lm}\p{Nd}.,;!?\s\x{00FF}-\x{10FFFF}]").unwrap()
});

/// Zero-width space inserted after a backtick that could otherwise extend a fence.
pub const ZERO_WIDTH_SPACE: char = '\u{200b}';

/// Escapes `&`, `<` and `>` for HTML-flavoured output.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Backslash-escapes Discord markdown syntax characters.
pub fn escape_discord(text: &str) -> String {
    DISCORD_RESERVED
        .replace_all(text, |caps: &Captures| format!("\\{}", &caps[0]))
        .into_owned()
}

/// Defuses backticks inside a code span so they cannot close or extend its fence.
///
/// A zero-width space follows every backtick that is directly followed by another
/// backtick, that opens the text, or that ends it (a single trailing newline after the
/// final backtick still counts as the end).
pub fn defuse_backticks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let last = chars.len().checked_sub(1);
    let end_anchor = match chars.last() {
        Some('\n') => chars.len().checked_sub(2),
        _ => last,
    };

    let mut out = String::with_capacity(text.len());
    for (i, &ch) in chars.iter().enumerate() {
        out.push(ch);
        if ch != '`' {
            continue;
        }
        let followed = chars.get(i + 1) == Some(&'`');
        if followed || i == 0 || Some(i) == last || Some(i) == end_anchor {
            out.push(ZERO_WIDTH_SPACE);
        }
    }
    out
}
