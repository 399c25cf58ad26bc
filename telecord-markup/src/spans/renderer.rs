//! Single-pass entity walk

use super::writer::MarkupWriter;
use crate::common::escape::{defuse_backticks, escape_discord};
use crate::common::utf16;
use crate::entities::{EntityKind, MessageEntity};
use crate::error::RenderError;
use tracing::debug;

/// Renders `text` (UTF-16 units) with its entities as Discord markdown.
///
/// In quote mode bare URLs are wrapped in `<...>` so Discord does not unfurl them.
/// Entities are sorted by start, then by descending end, so an outer span always opens
/// before the spans it contains.
pub fn render(
    text: &[u16],
    entities: &[MessageEntity],
    quote_mode: bool,
) -> Result<String, RenderError> {
    let mut order: Vec<(usize, &MessageEntity)> = entities.iter().enumerate().collect();
    order.sort_by(|(ia, a), (ib, b)| {
        a.offset
            .cmp(&b.offset)
            .then(b.finish().cmp(&a.finish()))
            .then(ia.cmp(ib))
    });

    let mut renderer = SpanRenderer {
        text,
        quote_mode,
        stack: Vec::new(),
        offset: 0,
        writer: MarkupWriter::new(),
    };
    for (_, entity) in order {
        renderer.enter(entity)?;
    }
    while !renderer.stack.is_empty() {
        renderer.pop()?;
    }
    renderer.text(renderer.offset, text.len())?;
    renderer.writer.finish()
}

struct SpanRenderer<'t> {
    text: &'t [u16],
    quote_mode: bool,
    stack: Vec<&'t MessageEntity>,
    offset: usize,
    writer: MarkupWriter,
}

/// Discord delimiter for a kind. `Some(None)` marks kinds that render as bare text.
fn delimiter(kind: &EntityKind) -> Option<Option<&'static str>> {
    match kind {
        EntityKind::Bold => Some(Some("**")),
        EntityKind::Italic => Some(Some("*")),
        EntityKind::Underline => Some(Some("__")),
        EntityKind::Strikethrough => Some(Some("~~")),
        EntityKind::Spoiler => Some(Some("||")),
        EntityKind::Code => Some(Some("``")),
        EntityKind::Pre => Some(Some("```")),
        EntityKind::Mention
        | EntityKind::BotCommand
        | EntityKind::Cashtag
        | EntityKind::Email
        | EntityKind::Hashtag
        | EntityKind::PhoneNumber
        | EntityKind::Url
        | EntityKind::CustomEmoji => Some(None),
        _ => None,
    }
}

fn is_code(entity: &MessageEntity) -> bool {
    matches!(entity.kind, EntityKind::Code | EntityKind::Pre)
}

fn is_space(unit: u16) -> bool {
    unit == u16::from(b' ')
}

impl<'t> SpanRenderer<'t> {
    fn clamp(&self, offset: usize) -> usize {
        offset.min(self.text.len())
    }

    fn enter(&mut self, entity: &'t MessageEntity) -> Result<(), RenderError> {
        let offset = self.clamp(entity.offset);
        while let Some(top) = self.stack.last() {
            if self.clamp(top.finish()) > offset {
                break;
            }
            self.pop()?;
        }
        if self.offset < offset {
            self.text(self.offset, offset)?;
            self.offset = offset;
        }
        self.stack.push(entity);
        self.start(entity, true)
    }

    fn pop(&mut self) -> Result<(), RenderError> {
        let Some(&top) = self.stack.last() else {
            return Ok(());
        };
        let finish = self.clamp(top.finish());
        if self.offset < finish {
            self.text(self.offset, finish)?;
            self.offset = finish;
        }
        self.stack.pop();
        self.end(top, true)
    }

    /// Writes `text[from..to]`, moving leading and trailing spaces outside the open
    /// delimiters. Code spans keep their spaces.
    fn text(&mut self, from: usize, to: usize) -> Result<(), RenderError> {
        let all: &'t [u16] = self.text;
        let units = &all[from..to];
        if self.stack.last().is_some_and(|e| is_code(e)) {
            self.text_only(&utf16::decode(units));
            return Ok(());
        }

        let leading = units.iter().take_while(|&&u| is_space(u)).count();
        self.restart(leading)?;
        let units = &units[leading..];

        let trailing = units.iter().rev().take_while(|&&u| is_space(u)).count();
        self.text_only(&utf16::decode(&units[..units.len() - trailing]));
        self.restart(trailing)
    }

    fn text_only(&mut self, text: &str) {
        match self.stack.last().map(|e| &e.kind) {
            Some(EntityKind::Url) => self.writer.text(text),
            Some(EntityKind::Code | EntityKind::Pre) => self.writer.text(&defuse_backticks(text)),
            _ => self.writer.text(&escape_discord(text)),
        }
    }

    /// Closes every open delimiter, writes `spaces` spaces, then reopens them.
    fn restart(&mut self, spaces: usize) -> Result<(), RenderError> {
        if spaces == 0 {
            return Ok(());
        }
        let open = self.stack.clone();
        for entity in open.iter().rev() {
            self.end(entity, false)?;
        }
        self.text_only(&" ".repeat(spaces));
        for entity in &open {
            self.start(entity, false)?;
        }
        Ok(())
    }

    fn start(&mut self, entity: &MessageEntity, is_final: bool) -> Result<(), RenderError> {
        if self.quote_mode && entity.kind == EntityKind::Url {
            self.writer.start("<");
            return Ok(());
        }
        match delimiter(&entity.kind) {
            Some(Some(marker)) => self.writer.start(marker),
            Some(None) => {}
            None => match &entity.kind {
                EntityKind::TextLink => {}
                EntityKind::TextMention => self.writer.start(if is_final { "\\@" } else { "" }),
                other => return Err(unsupported(other)),
            },
        }
        Ok(())
    }

    fn end(&mut self, entity: &MessageEntity, is_final: bool) -> Result<(), RenderError> {
        if self.quote_mode && entity.kind == EntityKind::Url {
            return self.writer.end(">");
        }
        match delimiter(&entity.kind) {
            Some(Some(marker)) => self.writer.end(marker),
            Some(None) => Ok(()),
            None => match &entity.kind {
                EntityKind::TextLink => {
                    if is_final {
                        let url = entity.url.as_deref().unwrap_or_default();
                        self.writer.text(&format!(" ({url})"));
                    }
                    Ok(())
                }
                EntityKind::TextMention => self.writer.end(""),
                other => Err(unsupported(other)),
            },
        }
    }
}

fn unsupported(kind: &EntityKind) -> RenderError {
    debug!(kind = kind.as_str(), "entity kind has no discord rendering");
    RenderError::UnsupportedEntity(kind.as_str().to_string())
}
