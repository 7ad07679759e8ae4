//! Case-insensitive token cursor over report text.
//!
//! The report is not valid markup, so it is treated as plain text with a
//! handful of recognised ASCII tokens. All offsets are byte offsets into the
//! original text; tokens are ASCII, so every offset returned here is a valid
//! `str` boundary.

/// Byte range of a located token, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Forward-only cursor over an immutable text.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to `pos`, clamped to the end of the text.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.text.len());
    }

    /// Finds the next occurrence of `token` at or after the cursor,
    /// ignoring ASCII case.
    pub fn find_ci(&self, token: &str) -> Option<Span> {
        find_ci_from(self.text, token, self.pos)
    }

    /// Like [`find_ci`](Self::find_ci), but only accepts matches that end a
    /// tag name: the next byte must be `>`, `/` or ASCII whitespace.
    ///
    /// `<li` therefore matches `<li>` and `<LI class="x">` but not `<link>`.
    pub fn find_tag_ci(&self, token: &str) -> Option<Span> {
        let bytes = self.text.as_bytes();
        let mut from = self.pos;
        while let Some(span) = find_ci_from(self.text, token, from) {
            match bytes.get(span.end) {
                Some(b'>') | Some(b'/') => return Some(span),
                Some(b) if b.is_ascii_whitespace() => return Some(span),
                _ => from = span.start + 1,
            }
        }
        None
    }

    /// Finds `byte` at or after absolute offset `from`.
    pub fn find_byte_from(&self, from: usize, byte: u8) -> Option<usize> {
        let bytes = self.text.as_bytes();
        if from >= bytes.len() {
            return None;
        }
        bytes[from..]
            .iter()
            .position(|b| *b == byte)
            .map(|offset| from + offset)
    }
}

fn find_ci_from(text: &str, token: &str, from: usize) -> Option<Span> {
    let haystack = text.as_bytes();
    let needle = token.as_bytes();
    if needle.is_empty() || from >= haystack.len() || haystack.len() - from < needle.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|offset| Span {
            start: from + offset,
            end: from + offset + needle.len(),
        })
}
