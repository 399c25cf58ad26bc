//! Rule-driven parser for Discord markdown
//!
//! The driver walks the input left to right. At each position it scans the rule table by
//! ascending tier and stops at the first tier that produced a match; inside that tier the
//! highest quality wins, ties going to the rule declared first. The winner's builder
//! produces one node, possibly by recursing into a substring with a derived [`ParseState`].

use super::rules::{Rule, RuleMatch, RULES};
use crate::error::ParseError;
use crate::ir::nodes::Node;
use tracing::{trace, warn};

/// Per-branch parser context. Copied into every recursive call, never shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseState<'a> {
    /// Text consumed by the most recent match, across recursion levels
    pub last_match: Option<&'a str>,
    /// Last character consumed at the current recursion level
    pub boundary: Option<char>,
    pub in_quote: bool,
    /// Set once the parse descends into a styled span
    pub nested: bool,
    /// Bitmask of [`crate::ir::nodes::Style::bit`] values open on this branch
    pub styles: u16,
}

/// Discord markdown parser over the static rule table.
pub struct DiscordParser {
    rules: Vec<&'static Rule>,
}

impl DiscordParser {
    pub fn new() -> Self {
        let mut rules: Vec<&'static Rule> = RULES.iter().collect();
        rules.sort_by_key(|rule| (rule.tier, rule.quality.is_none()));
        DiscordParser { rules }
    }

    /// Parse a complete message.
    pub fn parse(&self, text: &str) -> Result<Node, ParseError> {
        self.parse_with(text, ParseState::default())
    }

    /// Parse `text` under an explicit state. Builders call this to parse span bodies.
    pub fn parse_with<'a>(
        &self,
        text: &'a str,
        mut state: ParseState<'a>,
    ) -> Result<Node, ParseError> {
        if text.is_empty() {
            return Ok(Node::empty());
        }

        state.boundary = None;
        let mut nodes = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            let (rule, m) = self.select(rest, &state).ok_or_else(|| {
                warn!(remainder = rest, "no rule matched");
                ParseError::GrammarExhausted {
                    remainder: rest.to_string(),
                }
            })?;
            trace!(rule = rule.name, matched = m.text, "rule selected");

            state.last_match = Some(m.text);
            nodes.push((rule.build)(self, &m, state)?);
            state.boundary = m.text.chars().last();
            rest = &rest[m.text.len()..];
        }

        if nodes.len() == 1 {
            return Ok(nodes.remove(0));
        }
        Ok(Node::Container(nodes))
    }

    fn select<'t>(
        &self,
        text: &'t str,
        state: &ParseState<'_>,
    ) -> Option<(&'static Rule, RuleMatch<'t>)> {
        let mut best: Option<(&'static Rule, RuleMatch<'t>, f64)> = None;
        for &rule in &self.rules {
            if best.as_ref().is_some_and(|(winner, ..)| rule.tier > winner.tier) {
                break;
            }
            let Some(m) = (rule.matcher)(text, state) else {
                continue;
            };
            // An empty match would never advance the cursor.
            if m.text.is_empty() {
                continue;
            }
            let quality = rule.quality.map_or(0.0, |score| score(&m));
            if best.as_ref().map_or(true, |(.., q)| quality > *q) {
                best = Some((rule, m, quality));
            }
        }
        best.map(|(rule, m, _)| (rule, m))
    }
}

impl Default for DiscordParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::Style;

    #[test]
    fn test_empty_input_is_empty_container() {
        let parser = DiscordParser::new();
        assert_eq!(parser.parse("").unwrap(), Node::empty());
    }

    #[test]
    fn test_single_node_is_not_wrapped() {
        let parser = DiscordParser::new();
        assert_eq!(parser.parse("plain").unwrap(), Node::text("plain"));
    }

    #[test]
    fn test_rules_sorted_by_tier() {
        let parser = DiscordParser::new();
        let tiers: Vec<u8> = parser.rules.iter().map(|r| r.tier).collect();
        let mut sorted = tiers.clone();
        sorted.sort();
        assert_eq!(tiers, sorted);
        assert_eq!(parser.rules[0].name, "code_block");
        assert_eq!(parser.rules.last().map(|r| r.name), Some("text"));
    }

    #[test]
    fn test_italic_quality_beats_bold_on_triple_star() {
        let parser = DiscordParser::new();
        let tree = parser.parse("***x***").unwrap();
        assert_eq!(
            tree,
            Node::styled(Style::Italic, Node::styled(Style::Bold, Node::text("x")))
        );
    }

    #[test]
    fn test_underscore_italic_at_start_of_quote() {
        let parser = DiscordParser::new();
        let tree = parser.parse("> _x_").unwrap();
        assert_eq!(
            tree,
            Node::styled(
                Style::BlockQuote,
                Node::styled(Style::Italic, Node::text("x"))
            )
        );
    }
}
