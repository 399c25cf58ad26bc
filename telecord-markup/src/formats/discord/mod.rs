//! Discord markdown format
//!
//! Parsing only. Discord markdown is recovered from raw text by the rule table in
//! [`rules`], driven by [`DiscordParser`].

pub mod parser;
pub mod rules;

pub use parser::{DiscordParser, ParseState};

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Node;

/// Format implementation for Discord message markdown
#[derive(Default)]
pub struct DiscordFormat {
    parser: DiscordParser,
}

impl Format for DiscordFormat {
    fn name(&self) -> &str {
        "discord"
    }

    fn description(&self) -> &str {
        "Discord chat markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "discord"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Node, FormatError> {
        Ok(self.parser.parse(source)?)
    }
}
