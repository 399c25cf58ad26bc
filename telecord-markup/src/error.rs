//! Error types for parsing, rendering and format operations

use std::fmt;

/// Errors raised by the Discord grammar engine
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No rule matched at the cursor. The catch-all text rule makes this unreachable
    /// for well-formed rule tables, so hitting it means the table itself is broken.
    GrammarExhausted { remainder: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::GrammarExhausted { remainder } => {
                write!(f, "No matching rule was found while parsing `{remainder}`")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while turning trees or span lists into output text
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A close was requested against an empty or mismatched marker stack
    SpanStack(String),
    /// A span type the renderer has no rule for
    UnsupportedEntity(String),
    /// The slicer could not fit a single unit of text under the budget
    BudgetUnsatisfiable { max_length: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SpanStack(msg) => write!(f, "Span stack inconsistency: {msg}"),
            RenderError::UnsupportedEntity(kind) => write!(f, "Unknown entity type: {kind}"),
            RenderError::BudgetUnsatisfiable { max_length } => {
                write!(f, "Maximum length {max_length} can't be achieved")
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested direction
    NotSupported(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<ParseError> for FormatError {
    fn from(err: ParseError) -> Self {
        FormatError::ParseError(err.to_string())
    }
}

impl From<RenderError> for FormatError {
    fn from(err: RenderError) -> Self {
        FormatError::SerializationError(err.to_string())
    }
}
