//! Delimiter stack with deferred openers

use crate::error::RenderError;

#[derive(Debug)]
struct Opener {
    marker: String,
    flushed: bool,
}

/// Accumulates Discord markdown while tracking which delimiters are open.
///
/// `start` only records an opener. The next non-empty `text` call writes every pending
/// opener, outermost first. `end` writes its closer only when the matching opener was
/// actually written, so delimiter pairs wrapping no text vanish.
#[derive(Debug, Default)]
pub struct MarkupWriter {
    out: String,
    stack: Vec<Opener>,
}

impl MarkupWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, marker: &str) {
        self.stack.push(Opener {
            marker: marker.to_string(),
            flushed: false,
        });
    }

    pub fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        // Pending openers always sit contiguously on top of the stack.
        for opener in self.stack.iter_mut().filter(|o| !o.flushed) {
            self.out.push_str(&opener.marker);
            opener.flushed = true;
        }
        self.out.push_str(text);
    }

    pub fn end(&mut self, closing: &str) -> Result<(), RenderError> {
        let opener = self
            .stack
            .pop()
            .ok_or_else(|| RenderError::SpanStack(format!("`{closing}` closes nothing")))?;
        if opener.flushed {
            self.out.push_str(closing);
        }
        Ok(())
    }

    pub fn finish(self) -> Result<String, RenderError> {
        if !self.stack.is_empty() {
            let open: Vec<&str> = self.stack.iter().map(|o| o.marker.as_str()).collect();
            return Err(RenderError::SpanStack(format!(
                "unclosed markers: {}",
                open.join(" ")
            )));
        }
        Ok(self.out)
    }
}
