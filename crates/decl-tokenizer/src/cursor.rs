//! Character cursors shared by every tokenizer in this crate.
//!
//! A cursor hands out one character at a time, offers a single character of
//! lookahead and accumulates the characters consumed since the last call to
//! [`Cursor::take_text`]. Borrowed input yields borrowed token text, streamed
//! input has to copy.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::str::Chars;

use text_size::TextSize;

/// Returned by [`Cursor::first`] and [`Cursor::second`] past the end of input.
///
/// The input may legitimately contain NUL, so loops terminate on
/// [`Cursor::is_eof`] rather than on this value.
pub const EOF_CHAR: char = '\0';

pub trait Cursor<'a> {
    /// The character under the cursor, not consumed.
    fn first(&self) -> char;

    /// The character after [`Cursor::first`], not consumed.
    fn second(&self) -> char;

    fn is_eof(&self) -> bool;

    /// Consumes the character under the cursor.
    fn bump(&mut self) -> Option<char>;

    /// Byte offset of the cursor from the start of input.
    fn offset(&self) -> TextSize;

    /// Returns everything consumed since the previous call and starts a new
    /// token at the current position.
    fn take_text(&mut self) -> Cow<'a, str>;

    fn bump_while(&mut self, f: impl Fn(char) -> bool) {
        while !self.is_eof() && f(self.first()) {
            self.bump();
        }
    }
}

/// Cursor over borrowed text; token text is a slice of the input.
#[derive(Clone, Debug)]
pub struct StrCursor<'a> {
    text: &'a str,
    chars: Chars<'a>,
    token_start: usize,
}

impl<'a> StrCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, chars: text.chars(), token_start: 0 }
    }

    fn pos(&self) -> usize {
        self.text.len() - self.chars.as_str().len()
    }
}

impl<'a> Cursor<'a> for StrCursor<'a> {
    fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    fn second(&self) -> char {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn offset(&self) -> TextSize {
        TextSize::new(self.pos() as u32)
    }

    fn take_text(&mut self) -> Cow<'a, str> {
        let end = self.pos();
        let text = &self.text[self.token_start..end];
        self.token_start = end;
        Cow::Borrowed(text)
    }
}

/// Cursor over a buffered reader, pulling one line at a time.
///
/// Read failures (including invalid UTF-8) end the input early; the error is
/// kept and handed back by [`StreamCursor::finish`].
#[derive(Debug)]
pub struct StreamCursor<R> {
    reader: R,
    line: String,
    pending: VecDeque<char>,
    token: String,
    offset: TextSize,
    reader_done: bool,
    error: Option<io::Error>,
}

impl<R: BufRead> StreamCursor<R> {
    pub fn new(reader: R) -> Self {
        let mut cursor = Self {
            reader,
            line: String::new(),
            pending: VecDeque::new(),
            token: String::new(),
            offset: TextSize::new(0),
            reader_done: false,
            error: None,
        };
        cursor.fill();
        cursor
    }

    /// Keeps at least two characters buffered so that `second` never has to
    /// touch the reader.
    fn fill(&mut self) {
        while self.pending.len() < 2 && !self.reader_done {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => self.reader_done = true,
                Ok(_) => self.pending.extend(self.line.chars()),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    self.error = Some(err);
                    self.reader_done = true;
                }
            }
        }
    }

    /// Hands back the read error that cut the input short, if any.
    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<R: BufRead> Cursor<'static> for StreamCursor<R> {
    fn first(&self) -> char {
        self.pending.front().copied().unwrap_or(EOF_CHAR)
    }

    fn second(&self) -> char {
        self.pending.get(1).copied().unwrap_or(EOF_CHAR)
    }

    fn is_eof(&self) -> bool {
        self.pending.is_empty()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.pending.pop_front()?;
        self.token.push(c);
        self.offset += TextSize::of(c);
        self.fill();
        Some(c)
    }

    fn offset(&self) -> TextSize {
        self.offset
    }

    fn take_text(&mut self) -> Cow<'static, str> {
        Cow::Owned(std::mem::take(&mut self.token))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor as IoCursor;

    use super::*;

    fn drain<'a>(cursor: &mut impl Cursor<'a>) -> Vec<(char, char)> {
        let mut seen = Vec::new();
        while !cursor.is_eof() {
            seen.push((cursor.first(), cursor.second()));
            cursor.bump();
        }
        seen
    }

    #[test]
    fn str_and_stream_agree() {
        let text = "a\r\nb\n\nä{";
        let from_str = drain(&mut StrCursor::new(text));
        let from_stream = drain(&mut StreamCursor::new(IoCursor::new(text)));
        assert_eq!(from_str, from_stream);
        assert_eq!(from_str.last(), Some(&('{', EOF_CHAR)));
    }

    #[test]
    fn take_text_splits_consumed_input() {
        let mut cursor = StrCursor::new("key value");
        cursor.bump_while(|c| c != ' ');
        assert!(matches!(cursor.take_text(), Cow::Borrowed("key")));
        cursor.bump();
        assert_eq!(cursor.take_text(), " ");
        cursor.bump_while(|_| true);
        assert_eq!(cursor.take_text(), "value");
        assert_eq!(cursor.offset(), TextSize::new(9));
        assert!(cursor.is_eof());
    }

    #[test]
    fn stream_offsets_count_bytes() {
        let mut cursor = StreamCursor::new(IoCursor::new("ä\nb"));
        cursor.bump();
        assert_eq!(cursor.offset(), TextSize::new(2));
        cursor.bump_while(|_| true);
        assert_eq!(cursor.take_text(), "ä\nb");
        assert_eq!(cursor.offset(), TextSize::new(4));
        assert!(cursor.finish().is_ok());
    }

    #[test]
    fn stream_reports_invalid_utf8() {
        let bytes: &[u8] = b"ok\n\xff\xfe\n";
        let mut cursor = StreamCursor::new(bytes);
        cursor.bump_while(|_| true);
        assert_eq!(cursor.take_text(), "ok\n");
        let err = cursor.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
