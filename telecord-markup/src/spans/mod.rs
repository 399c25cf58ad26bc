//! Telegram entity spans to Discord markdown
//!
//! [`render`] walks a text and its entity list in a single pass, emitting Discord
//! delimiters through a [`writer::MarkupWriter`]. Delimiters are only written once
//! visible text lands inside them, so an entity that covers nothing but whitespace
//! leaves no `****` behind.

pub mod renderer;
pub mod writer;

pub use renderer::render;
pub use writer::MarkupWriter;
