//! Length-bounded slicing of formatted Telegram text
//!
//! Discord caps messages at a fixed number of characters, and the cap applies to the
//! rendered markdown, delimiters and escapes included. The slicer picks a cut in the
//! source text, renders that window, and shrinks the cut until the rendering fits.
//! Cuts prefer the last newline, then the last space, then a hard break.

use crate::common::utf16;
use crate::entities::{clip_all, EntityKind, Message, MessageEntity};
use crate::error::RenderError;
use crate::spans::render;
use tracing::trace;

/// A rendered window and the source offset just past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub next: usize,
}

const NEWLINE: u16 = b'\n' as u16;
const SPACE: u16 = b' ' as u16;

/// Renders the next window of `text` starting at `start` whose markdown fits in
/// `max_length` UTF-16 units. Returns `None` once only whitespace remains.
pub fn next_slice(
    text: &[u16],
    entities: &[MessageEntity],
    start: usize,
    max_length: usize,
) -> Result<Option<Chunk>, RenderError> {
    if max_length == 0 {
        return Err(RenderError::BudgetUnsatisfiable { max_length });
    }

    let mut start = start.min(text.len());
    while start < text.len() && utf16::is_whitespace(text[start]) {
        start += 1;
    }
    let remaining = text.len() - start;
    let mut length = max_length.min(remaining);
    if length == 0 {
        return Ok(None);
    }

    loop {
        if length < remaining {
            let window = &text[start..start + length + 1];
            length = window
                .iter()
                .rposition(|&u| u == NEWLINE)
                .or_else(|| window.iter().rposition(|&u| u == SPACE))
                .unwrap_or(length);
        }
        length = utf16::align_cut(&text[start..], length);
        if length == 0 {
            return Err(RenderError::BudgetUnsatisfiable { max_length });
        }

        let entities = clip_all(entities, start, length);
        let rendered = render(&text[start..start + length], &entities, false)?;
        if utf16::len(&rendered) <= max_length {
            return Ok(Some(Chunk {
                text: rendered,
                next: start + length,
            }));
        }

        trace!(start, length, max_length, "window too long after rendering");
        length -= 1;
        if length == 0 {
            return Err(RenderError::BudgetUnsatisfiable { max_length });
        }
    }
}

/// Slices the whole text into renderings of at most `max_length` units each.
pub fn slice_all(
    text: &str,
    entities: &[MessageEntity],
    max_length: usize,
) -> Result<Vec<String>, RenderError> {
    let units = utf16::encode(text);
    let mut chunks = Vec::new();
    let mut start = 0;
    while let Some(chunk) = next_slice(&units, entities, start, max_length)? {
        start = chunk.next;
        chunks.push(chunk.text);
    }
    Ok(chunks)
}

/// One-line `> ` preview of a replied-to message, trailing newline included.
///
/// Bot messages that open with a bold author name skip it along with the `: ` after
/// it. Leading `pre` blocks and blank lines are skipped too, and only the first line
/// is kept. Previews longer than `max_length` end in `...`.
pub fn quote_preview(reply: &Message, max_length: usize) -> Result<Option<String>, RenderError> {
    let (Some(text), entities) = reply.text_and_entities() else {
        return Ok(None);
    };
    let units = utf16::encode(text);

    let mut start = 0;
    let from_bot = reply.from.as_ref().is_some_and(|u| u.is_bot);
    if let Some(first) = entities.first().filter(|e| from_bot && e.kind == EntityKind::Bold) {
        start = first.finish() + 2;
    }

    start = entities
        .iter()
        .skip_while(|e| e.finish() < start)
        .take_while(|e| e.kind == EntityKind::Pre)
        .map(MessageEntity::finish)
        .fold(start, usize::max)
        .min(units.len());
    while start < units.len() && units[start] == NEWLINE {
        start += 1;
    }

    let end = units[start..]
        .iter()
        .position(|&u| u == NEWLINE)
        .map_or(units.len(), |i| start + i);
    let mut window = units[start..end].to_vec();
    if window.len() > max_length {
        let keep = utf16::align_cut(&units, (start + max_length).saturating_sub(3)).max(start);
        window = units[start..keep].to_vec();
        window.extend("...".encode_utf16());
    }
    if window.is_empty() {
        return Ok(None);
    }

    let entities = clip_all(entities, start, window.len());
    let rendered = render(&window, &entities, true)?;
    Ok(Some(format!("> {rendered}\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::User;

    fn bold(offset: usize, length: usize) -> MessageEntity {
        MessageEntity::new(EntityKind::Bold, offset, length)
    }

    #[test]
    fn test_zero_budget_fails() {
        let text = utf16::encode("abc");
        assert_eq!(
            next_slice(&text, &[], 0, 0),
            Err(RenderError::BudgetUnsatisfiable { max_length: 0 })
        );
    }

    #[test]
    fn test_whitespace_tail_yields_none() {
        let text = utf16::encode("ab \n ");
        assert_eq!(next_slice(&text, &[], 2, 10).unwrap(), None);
    }

    #[test]
    fn test_prefers_newline_then_space() {
        assert_eq!(
            slice_all("12 34\n56789", &[], 4).unwrap(),
            vec!["12", "34", "5678", "9"]
        );
    }

    #[test]
    fn test_shrinks_until_markup_fits() {
        let entities = [bold(2, 9)];
        assert_eq!(
            slice_all("12 34\n5678", &entities, 8).unwrap(),
            vec!["12", "**34**", "**5678**"]
        );
    }

    #[test]
    fn test_never_splits_surrogate_pairs() {
        let chunks = slice_all("a🥲b", &[], 2).unwrap();
        assert_eq!(chunks, vec!["a", "🥲", "b"]);
    }

    #[test]
    fn test_quote_keeps_first_line() {
        let reply = Message {
            text: Some("first line\nsecond".to_string()),
            ..Message::default()
        };
        assert_eq!(
            quote_preview(&reply, 50).unwrap().as_deref(),
            Some("> first line\n")
        );
    }

    #[test]
    fn test_quote_skips_bot_author() {
        let reply = Message {
            from: Some(User {
                is_bot: true,
                ..User::default()
            }),
            text: Some("bob: hi there".to_string()),
            entities: Some(vec![bold(0, 3)]),
            ..Message::default()
        };
        assert_eq!(
            quote_preview(&reply, 50).unwrap().as_deref(),
            Some("> hi there\n")
        );
    }

    #[test]
    fn test_quote_truncates_with_ellipsis() {
        let reply = Message {
            text: Some("abcdefghij".to_string()),
            ..Message::default()
        };
        assert_eq!(
            quote_preview(&reply, 6).unwrap().as_deref(),
            Some("> abc...\n")
        );
    }
}
