//! Message-level conversion in both directions
//!
//! [`TelegramConverter`] turns a Telegram message into one or more Discord messages;
//! [`DiscordReader`] turns a Discord message into Telegram HTML.

pub mod discord_to_telegram;
pub mod telegram_to_discord;

pub use discord_to_telegram::{DiscordReader, TelegramMessage};
pub use telegram_to_discord::{Converted, ConverterOptions, Embed, TelegramConverter};
