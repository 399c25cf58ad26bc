//! Format implementations
//!
//! `discord` is the only parser; every other format renders the formatting tree it
//! produces.

pub mod discord;
pub mod html;
pub mod icons;
pub mod json;
pub mod telegram;
pub mod treeviz;

pub use discord::DiscordFormat;
pub use html::{HtmlFormat, HtmlOptions};
pub use json::JsonFormat;
pub use telegram::TelegramFormat;
pub use treeviz::TreevizFormat;
