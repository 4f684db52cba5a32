//! Text accumulation for the renderer.

use std::fmt::Write;

use crate::Error;

/// Accumulates the human-readable description of one decoded value.
///
/// Decoders append label fragments and host dump output; field-level read failures are
/// recorded as inline markers so sibling fields still contribute to the final text.
#[derive(Debug, Default)]
pub(crate) struct Report {
    buf: String,
}

impl Report {
    pub(crate) fn new() -> Self {
        Report { buf: String::new() }
    }

    /// Appends a fragment without a line break.
    pub(crate) fn write(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Appends a full line.
    pub(crate) fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Appends formatted fragments; infallible on a String sink.
    pub(crate) fn write_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        let _ = self.buf.write_fmt(args);
    }

    /// Appends host dump output, normalizing the trailing line break.
    pub(crate) fn append_dump(&mut self, text: &str) {
        self.buf.push_str(text);
        if !text.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    /// Records a field-level read failure inline and lets the render continue.
    pub(crate) fn note_unreadable(&mut self, err: &Error) {
        self.line(&format!("<unreadable: {err}>"));
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}
