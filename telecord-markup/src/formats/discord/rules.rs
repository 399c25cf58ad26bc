//! The Discord markdown rule table.
//!
//! Each rule is a plain data record: a priority tier, a matcher over the remaining input,
//! an optional quality scorer and a builder. The driver in `parser.rs` owns the selection
//! logic; nothing in here knows about other rules.
//!
//! Tiers (lower wins):
//!
//! | tier | rule          | tier | rule        |
//! |------|---------------|------|-------------|
//! | 4    | code block    | 21   | underline   |
//! | 5    | custom emoji  | 21   | italic      |
//! | 6    | block quote   | 21   | strike      |
//! | 10   | blank lines   | 23   | inline code |
//! | 12   | escape        | 24   | hard break  |
//! | 14   | autolink      | 25   | channel     |
//! | 16   | bare url      | 27   | kaomoji     |
//! | 21   | bold          | 29   | mention     |
//! | 30   | role          | 31   | spoiler     |
//! | 32   | text          |      |             |
//!
//! Bold, underline and italic share tier 21 and are disambiguated by quality: the match
//! length plus a small bonus (bold +0.1, italic +0.2). The bonuses decide inputs such as
//! `***x***` (italic wraps bold) and `***aaa*b**` (bold wraps italic), so they are part of
//! the observable contract.

use super::parser::{DiscordParser, ParseState};
use crate::common::utf16;
use crate::error::ParseError;
use crate::ir::nodes::{MentionTarget, Node, Style};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// A successful rule match against the head of the remaining input.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch<'t> {
    /// The consumed prefix
    pub text: &'t str,
    /// Capture groups, rule specific
    pub groups: Vec<&'t str>,
    /// Numeric id captured and range-checked by the matcher
    pub id: Option<u64>,
}

impl<'t> RuleMatch<'t> {
    fn new(text: &'t str, groups: Vec<&'t str>) -> Self {
        RuleMatch {
            text,
            groups,
            id: None,
        }
    }

    fn group(&self, index: usize) -> &'t str {
        self.groups.get(index).copied().unwrap_or_default()
    }
}

pub type Matcher = for<'t> fn(&'t str, &ParseState<'_>) -> Option<RuleMatch<'t>>;
pub type Scorer = fn(&RuleMatch<'_>) -> f64;
pub type Builder =
    for<'t> fn(&DiscordParser, &RuleMatch<'t>, ParseState<'t>) -> Result<Node, ParseError>;

pub struct Rule {
    pub name: &'static str,
    pub tier: u8,
    pub matcher: Matcher,
    pub quality: Option<Scorer>,
    pub build: Builder,
}

pub static RULES: &[Rule] = &[
    Rule {
        name: "blank_lines",
        tier: 10,
        matcher: blank_lines,
        quality: None,
        build: build_line_feed,
    },
    Rule {
        name: "hard_break",
        tier: 24,
        matcher: hard_break,
        quality: None,
        build: build_newline,
    },
    Rule {
        name: "escape",
        tier: 12,
        matcher: escape,
        quality: None,
        build: build_first_group,
    },
    Rule {
        name: "block_quote",
        tier: 6,
        matcher: block_quote,
        quality: None,
        build: build_block_quote,
    },
    Rule {
        name: "bold",
        tier: 21,
        matcher: bold,
        quality: Some(bold_quality),
        build: build_bold,
    },
    Rule {
        name: "underline",
        tier: 21,
        matcher: underline,
        quality: Some(length_quality),
        build: build_underline,
    },
    Rule {
        name: "italic",
        tier: 21,
        matcher: italic,
        quality: Some(italic_quality),
        build: build_italic,
    },
    Rule {
        name: "strike",
        tier: 21,
        matcher: strike,
        quality: None,
        build: build_strike,
    },
    Rule {
        name: "text",
        tier: 32,
        matcher: plain_text,
        quality: None,
        build: build_text,
    },
    Rule {
        name: "inline_code",
        tier: 23,
        matcher: inline_code,
        quality: None,
        build: build_inline_code,
    },
    Rule {
        name: "code_block",
        tier: 4,
        matcher: code_block,
        quality: None,
        build: build_code_block,
    },
    Rule {
        name: "kaomoji",
        tier: 27,
        matcher: kaomoji,
        quality: None,
        build: build_text,
    },
    Rule {
        name: "autolink",
        tier: 14,
        matcher: autolink,
        quality: None,
        build: build_autolink,
    },
    Rule {
        name: "url",
        tier: 16,
        matcher: bare_url,
        quality: None,
        build: build_url,
    },
    Rule {
        name: "spoiler",
        tier: 31,
        matcher: spoiler,
        quality: None,
        build: build_spoiler,
    },
    Rule {
        name: "mention",
        tier: 29,
        matcher: mention,
        quality: None,
        build: build_mention,
    },
    Rule {
        name: "channel",
        tier: 25,
        matcher: channel,
        quality: None,
        build: build_channel,
    },
    Rule {
        name: "role",
        tier: 30,
        matcher: role,
        quality: None,
        build: build_role,
    },
    Rule {
        name: "custom_emoji",
        tier: 5,
        matcher: custom_emoji,
        quality: None,
        build: build_custom_emoji,
    },
];

const KAOMOJI: &str = "¯\\_(ツ)_/¯";
const DISALLOWED_SCHEMES: &[&str] = &["file", "javascript", "vbscript", "data"];

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\n *)*\n").unwrap());
static HARD_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {2,}\n").unwrap());
static ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\\([^0-9A-Za-z\s])").unwrap());
static TRIPLE_QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *>>> +").unwrap());
static AUTOLINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<([^: >]+:/[^ >]+)>").unwrap());
static BARE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^https?://[^\s<]+[^<.,:;"')\]\s]"#).unwrap());
static USER_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<@!?([0-9]+)>").unwrap());
static SPECIAL_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@(?i:(everyone|here))").unwrap());
static CHANNEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<#([0-9]+)>").unwrap());
static ROLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<@&([0-9]+)>").unwrap());
static CUSTOM_EMOJI: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<a?:(\w+):([0-9]+)>").unwrap());

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn regex_match<'t>(regex: &Regex, text: &'t str) -> Option<RuleMatch<'t>> {
    let caps = regex.captures(text)?;
    let whole = caps.get(0)?;
    let groups = caps
        .iter()
        .skip(1)
        .map(|g| g.map_or("", |g| g.as_str()))
        .collect();
    Some(RuleMatch::new(&text[..whole.end()], groups))
}

/// Runs a `<prefix digits>` pattern. Ids that overflow `u64` do not match.
fn numeric<'t>(regex: &Regex, text: &'t str) -> Option<RuleMatch<'t>> {
    let mut m = regex_match(regex, text)?;
    m.id = Some(m.group(0).parse().ok()?);
    Some(m)
}

/// Applies a style unless it is already open on this branch, in which case the inner
/// text is parsed without re-wrapping. This is what makes `**aa **bb cc**` close on the
/// first pair instead of nesting bold in bold.
fn styled<'t>(
    parser: &DiscordParser,
    inner: &'t str,
    style: Style,
    mut state: ParseState<'t>,
) -> Result<Node, ParseError> {
    if state.styles & style.bit() != 0 {
        return parser.parse_with(inner, state);
    }
    state.styles |= style.bit();
    state.nested = true;
    Ok(Node::styled(style, parser.parse_with(inner, state)?))
}

fn bold_quality(m: &RuleMatch<'_>) -> f64 {
    utf16::len(m.text) as f64 + 0.1
}

fn italic_quality(m: &RuleMatch<'_>) -> f64 {
    utf16::len(m.text) as f64 + 0.2
}

fn length_quality(m: &RuleMatch<'_>) -> f64 {
    utf16::len(m.text) as f64
}

fn build_line_feed<'t>(
    _: &DiscordParser,
    _: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    Ok(Node::text("\n"))
}

fn build_newline<'t>(
    _: &DiscordParser,
    _: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    Ok(Node::Newline)
}

fn build_text<'t>(
    _: &DiscordParser,
    m: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    Ok(Node::text(m.text))
}

fn build_first_group<'t>(
    _: &DiscordParser,
    m: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    Ok(Node::text(m.group(0)))
}

fn build_bold<'t>(
    parser: &DiscordParser,
    m: &RuleMatch<'t>,
    state: ParseState<'t>,
) -> Result<Node, ParseError> {
    styled(parser, m.group(0), Style::Bold, state)
}

fn build_underline<'t>(
    parser: &DiscordParser,
    m: &RuleMatch<'t>,
    state: ParseState<'t>,
) -> Result<Node, ParseError> {
    styled(parser, m.group(0), Style::Underline, state)
}

fn build_italic<'t>(
    parser: &DiscordParser,
    m: &RuleMatch<'t>,
    state: ParseState<'t>,
) -> Result<Node, ParseError> {
    styled(parser, m.group(0), Style::Italic, state)
}

fn build_strike<'t>(
    parser: &DiscordParser,
    m: &RuleMatch<'t>,
    state: ParseState<'t>,
) -> Result<Node, ParseError> {
    styled(parser, m.group(0), Style::Strikethrough, state)
}

fn build_spoiler<'t>(
    parser: &DiscordParser,
    m: &RuleMatch<'t>,
    state: ParseState<'t>,
) -> Result<Node, ParseError> {
    styled(parser, m.group(0), Style::Spoiler, state)
}

fn build_inline_code<'t>(
    _: &DiscordParser,
    m: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    Ok(Node::styled(Style::InlineCode, Node::text(m.group(0))))
}

fn build_code_block<'t>(
    _: &DiscordParser,
    m: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    Ok(Node::Code {
        language: m.group(0).trim().to_string(),
        body: m.group(1).to_string(),
    })
}

fn build_url<'t>(
    _: &DiscordParser,
    m: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    Ok(Node::link(m.text, false))
}

fn build_mention<'t>(
    _: &DiscordParser,
    m: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    let target = match m.id {
        Some(id) => MentionTarget::User(id),
        None if m.group(0).eq_ignore_ascii_case("here") => MentionTarget::Here,
        None => MentionTarget::Everyone,
    };
    Ok(Node::Mention(target))
}

fn build_channel<'t>(
    _: &DiscordParser,
    m: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    Ok(m.id.map_or_else(|| Node::text(m.text), Node::Channel))
}

fn build_role<'t>(
    _: &DiscordParser,
    m: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    Ok(m.id.map_or_else(|| Node::text(m.text), Node::Role))
}

fn build_custom_emoji<'t>(
    _: &DiscordParser,
    m: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    Ok(Node::CustomEmoji(m.group(0).to_string()))
}

fn underline<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    delimited(text, "__", Some('_'))
}

fn strike<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    delimited(text, "~~", Some('_'))
}

fn spoiler<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    delimited(text, "||", None)
}

fn channel<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    numeric(&CHANNEL, text)
}

fn role<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    numeric(&ROLE, text)
}

fn blank_lines<'t>(text: &'t str, state: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    if !state.last_match.is_some_and(|m| m.ends_with('\n')) {
        return None;
    }
    regex_match(&BLANK_LINES, text)
}

fn hard_break<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    regex_match(&HARD_BREAK, text)
}

fn escape<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    regex_match(&ESCAPE, text)
}

fn kaomoji<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    text.starts_with(KAOMOJI)
        .then(|| RuleMatch::new(&text[..KAOMOJI.len()], Vec::new()))
}

fn custom_emoji<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    regex_match(&CUSTOM_EMOJI, text)
}

fn mention<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    numeric(&USER_MENTION, text).or_else(|| regex_match(&SPECIAL_MENTION, text))
}

fn bare_url<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    regex_match(&BARE_URL, text)
}

fn autolink<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    regex_match(&AUTOLINK, text)
}

fn build_autolink<'t>(
    _: &DiscordParser,
    m: &RuleMatch<'t>,
    _: ParseState<'t>,
) -> Result<Node, ParseError> {
    let url = m.group(0);
    match url::Url::parse(url) {
        Ok(parsed) if !DISALLOWED_SCHEMES.contains(&parsed.scheme()) => Ok(Node::link(url, true)),
        _ => {
            debug!(url, "autolink degraded to text");
            Ok(Node::text(url))
        }
    }
}

/// Length of one ` *>(?!>>) +[^\n]*` quote line at the head of `text`.
fn quote_line(text: &str) -> Option<usize> {
    let indent = text.len() - text.trim_start_matches(' ').len();
    let rest = text[indent..].strip_prefix('>')?;
    if rest.starts_with(">>") {
        return None;
    }
    let gap = rest.len() - rest.trim_start_matches(' ').len();
    if gap == 0 {
        return None;
    }
    let line = &rest[gap..];
    Some(indent + 1 + gap + line.find('\n').unwrap_or(line.len()))
}

/// Quotes start only at a line boundary, and never inside another quote or a styled span.
fn block_quote<'t>(text: &'t str, state: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    let at_line_start = match state.last_match {
        None => true,
        Some(prev) => prev.is_empty() || prev.trim_end_matches(' ').ends_with('\n'),
    };
    if !at_line_start || state.in_quote || state.nested {
        return None;
    }

    if TRIPLE_QUOTE.is_match(text) {
        return Some(RuleMatch::new(text, Vec::new()));
    }

    let mut end = quote_line(text)?;
    while text[end..].starts_with('\n') {
        match quote_line(&text[end + 1..]) {
            Some(len) => end += 1 + len,
            None => break,
        }
    }
    if text[end..].starts_with('\n') {
        end += 1;
    }
    Some(RuleMatch::new(&text[..end], Vec::new()))
}

fn strip_quote_marker(line: &str) -> &str {
    let trimmed = line.trim_start_matches(' ');
    match trimmed.strip_prefix('>') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

fn build_block_quote<'t>(
    parser: &DiscordParser,
    m: &RuleMatch<'t>,
    mut state: ParseState<'t>,
) -> Result<Node, ParseError> {
    let trimmed = m.text.trim_start_matches(' ');
    let body = match trimmed.strip_prefix(">>>") {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest).to_string(),
        None => m
            .text
            .split('\n')
            .map(strip_quote_marker)
            .collect::<Vec<_>>()
            .join("\n"),
    };
    state.in_quote = true;
    let inner = parser.parse_with(&body, state)?;
    Ok(Node::styled(Style::BlockQuote, inner))
}

/// `**body**` where the body is a lazy run of escapes or non-backslash characters and the
/// closing pair is not followed by a third `*`.
fn bold<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    let body = text.strip_prefix("**")?;
    let mut i = 0;
    loop {
        let rest = &body[i..];
        if i > 0 && rest.starts_with("**") && !rest[2..].starts_with('*') {
            return Some(RuleMatch::new(&text[..i + 4], vec![&body[..i]]));
        }
        let mut chars = rest.chars();
        i += match chars.next()? {
            '\\' => 1 + chars.next()?.len_utf8(),
            c => c.len_utf8(),
        };
    }
}

/// `<delim>body<delim>` with a lazy non-empty body. With a guard, the closing delimiter
/// must not be followed by that character.
fn delimited<'t>(text: &'t str, delim: &str, guard: Option<char>) -> Option<RuleMatch<'t>> {
    let body = text.strip_prefix(delim)?;
    let mut i = body.chars().next()?.len_utf8();
    loop {
        let rest = &body[i..];
        if let Some(after) = rest.strip_prefix(delim) {
            if guard.map_or(true, |g| !after.starts_with(g)) {
                let end = delim.len() * 2 + i;
                return Some(RuleMatch::new(&text[..end], vec![&body[..i]]));
            }
        }
        i += rest.chars().next()?.len_utf8();
    }
}

fn italic<'t>(text: &'t str, state: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    if text.starts_with('_') {
        let after_word = state.boundary.is_some_and(is_word);
        if after_word {
            return None;
        }
        underscore_italic(text)
    } else {
        asterisk_italic(text)
    }
}

/// `_body_` bounded by non-word characters on the outside.
fn underscore_italic(text: &str) -> Option<RuleMatch<'_>> {
    let body = text.strip_prefix('_')?;
    let mut i = 0;
    loop {
        let rest = &body[i..];
        if i > 0 {
            if let Some(after) = rest.strip_prefix('_') {
                if !after.chars().next().is_some_and(is_word) {
                    return Some(RuleMatch::new(&text[..i + 2], vec![&body[..i]]));
                }
            }
        }
        if rest.starts_with("__") {
            i += 2;
            continue;
        }
        let mut chars = rest.chars();
        i += match chars.next()? {
            '\\' => 1 + chars.next()?.len_utf8(),
            '_' => return None,
            c => c.len_utf8(),
        };
    }
}

/// `*body*` where the body starts with a non-space, may embed `**`, and any whitespace run
/// must be followed by a non-space, non-`*` character or by `**`.
fn asterisk_italic(text: &str) -> Option<RuleMatch<'_>> {
    let body = text.strip_prefix('*')?;
    if body.chars().next().map_or(true, char::is_whitespace) {
        return None;
    }
    let mut i = 0;
    loop {
        let rest = &body[i..];
        if i > 0 && rest.starts_with('*') && !rest[1..].starts_with('*') {
            return Some(RuleMatch::new(&text[..i + 2], vec![&body[..i]]));
        }
        if rest.starts_with("**") {
            i += 2;
            continue;
        }
        let c = rest.chars().next()?;
        if c == '*' {
            return None;
        }
        if !c.is_whitespace() {
            i += c.len_utf8();
            continue;
        }
        let run = rest.len() - rest.trim_start_matches(char::is_whitespace).len();
        let after = &rest[run..];
        if after.starts_with("**") {
            i += run + 2;
        } else {
            match after.chars().next() {
                Some(next) if next != '*' => i += run + next.len_utf8(),
                _ => return None,
            }
        }
    }
}

/// Backtick fences, longest first. The body must end in a non-backtick and the closing
/// fence must be exactly as long as the opening one.
fn inline_code<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    let run = text.len() - text.trim_start_matches('`').len();
    for fence in (1..=run).rev() {
        let mut chars = text[fence..].char_indices().map(|(i, c)| (i + fence, c));
        while let Some((i, c)) = chars.next() {
            let end = i + c.len_utf8();
            if c == '`' {
                continue;
            }
            let closing = &text[end..];
            let ticks = closing.len() - closing.trim_start_matches('`').len();
            if ticks == fence {
                return Some(RuleMatch::new(
                    &text[..end + fence],
                    vec![&text[fence..end]],
                ));
            }
        }
    }
    None
}

fn is_language_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '.')
}

/// Fenced block: "```", an optional language line, leading newlines skipped, then the
/// shortest body (starting with a non-newline) that is followed by newlines and "```".
fn code_block<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    let after = text.strip_prefix("```")?;
    if let Some(newline) = after.find('\n') {
        let language = &after[..newline];
        if !language.is_empty() && language.chars().all(is_language_char) {
            if let Some((body, end)) = code_body(text, 3 + newline + 1) {
                return Some(RuleMatch::new(&text[..end], vec![language, body]));
            }
        }
    }
    let (body, end) = code_body(text, 3)?;
    Some(RuleMatch::new(&text[..end], vec!["", body]))
}

fn code_body(text: &str, from: usize) -> Option<(&str, usize)> {
    let start = from + (text[from..].len() - text[from..].trim_start_matches('\n').len());
    let first = text[start..].chars().next()?;
    let min_end = start + first.len_utf8();
    let close = min_end + text[min_end..].find("```")?;
    let body_end = min_end.max(text[..close].trim_end_matches('\n').len());
    Some((&text[start..body_end], close + 3))
}

/// Catch-all: at least one character, stopping before the next character that might
/// start another rule.
fn plain_text<'t>(text: &'t str, _: &ParseState<'_>) -> Option<RuleMatch<'t>> {
    let mut chars = text.char_indices();
    let (_, first) = chars.next()?;
    let mut end = first.len_utf8();
    for (i, c) in chars {
        if stops_text(c, &text[i..]) {
            break;
        }
        end = i + c.len_utf8();
    }
    Some(RuleMatch::new(&text[..end], Vec::new()))
}

fn stops_text(c: char, rest: &str) -> bool {
    let special = !c.is_ascii_alphanumeric() && !c.is_whitespace() && u32::from(c) < 0xC0;
    special || rest.starts_with("\n\n") || HARD_BREAK.is_match(rest) || word_colon_ahead(rest)
}

/// `\w+:\S` at the head of `rest`, the shape of a bare scheme such as `https:/`.
fn word_colon_ahead(rest: &str) -> bool {
    let word = rest.len() - rest.trim_start_matches(is_word).len();
    if word == 0 {
        return false;
    }
    let mut after = rest[word..].chars();
    after.next() == Some(':') && after.next().is_some_and(|c| !c.is_whitespace())
}
