//! Whitespace tokenizer for the contents of decl blocks.
//!
//! Splits on delimiters, hands back "kept" delimiters such as braces as
//! tokens of their own, drops comments and unquotes string literals. Unlike
//! [`crate::BlockSyntaxTokenizer`] this is lossy and meant for reading
//! values, not for rewriting files.

use crate::cursor::{Cursor, StrCursor};
use crate::stream::{TokenError, TokenFunc, TokenStream};

pub const WHITESPACE: &str = " \t\n\x0B\r";
pub const KEPT_DELIMITERS: &str = "{}()";

pub type DefTokens<'a, C> = TokenStream<'a, C, DefTokenizer>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Searching,
    TokenStarted,
    Quoted,
    AfterClosingQuote,
    SearchingForQuote,
}

#[derive(Clone, Debug)]
pub struct DefTokenizer {
    delimiters: Box<str>,
    kept_delimiters: Box<str>,
    error: Option<TokenError>,
}

impl Default for DefTokenizer {
    fn default() -> Self {
        Self::new(WHITESPACE, KEPT_DELIMITERS)
    }
}

impl DefTokenizer {
    pub fn new(delimiters: &str, kept_delimiters: &str) -> Self {
        Self { delimiters: delimiters.into(), kept_delimiters: kept_delimiters.into(), error: None }
    }

    pub fn tokens(text: &str) -> DefTokens<'_, StrCursor<'_>> {
        TokenStream::new(StrCursor::new(text), Self::default())
    }

    fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(c)
    }

    fn is_kept_delimiter(&self, c: char) -> bool {
        self.kept_delimiters.contains(c)
    }

    fn scan<'a>(&mut self, cursor: &mut impl Cursor<'a>) -> Option<String> {
        let mut state = State::Searching;
        let mut token = String::new();

        while !cursor.is_eof() {
            let c = cursor.first();

            match state {
                State::Searching => {
                    if self.is_delimiter(c) {
                        cursor.bump();
                    } else if self.is_kept_delimiter(c) {
                        cursor.bump();
                        return Some(c.to_string());
                    } else {
                        state = State::TokenStarted;
                    }
                }
                State::TokenStarted => {
                    if self.is_delimiter(c) || self.is_kept_delimiter(c) {
                        return Some(token);
                    }

                    match c {
                        '"' if !token.is_empty() => return Some(token),
                        '"' => {
                            cursor.bump();
                            state = State::Quoted;
                        }
                        '/' if matches!(cursor.second(), '*' | '/') => {
                            if !token.is_empty() {
                                return Some(token);
                            }
                            skip_comment(cursor);
                            state = State::Searching;
                        }
                        _ => {
                            cursor.bump();
                            token.push(c);
                        }
                    }
                }
                State::Quoted => {
                    cursor.bump();
                    match c {
                        '"' => state = State::AfterClosingQuote,
                        '\\' => {
                            if let Some(escaped) = cursor.bump() {
                                match escaped {
                                    'n' => token.push('\n'),
                                    't' => token.push('\t'),
                                    '"' => token.push('"'),
                                    other => {
                                        token.push('\\');
                                        token.push(other);
                                    }
                                }
                            }
                        }
                        _ => token.push(c),
                    }
                }
                State::AfterClosingQuote => {
                    if c == '\\' {
                        cursor.bump();
                        state = State::SearchingForQuote;
                    } else if self.is_delimiter(c) {
                        cursor.bump();
                    } else {
                        return Some(token);
                    }
                }
                State::SearchingForQuote => {
                    if self.is_delimiter(c) {
                        cursor.bump();
                    } else if c == '"' {
                        cursor.bump();
                        state = State::Quoted;
                    } else {
                        self.error = Some(TokenError::UnterminatedContinuation);
                        return None;
                    }
                }
            }
        }

        match state {
            // An empty quoted string is still a token.
            State::AfterClosingQuote => Some(token),
            State::SearchingForQuote => {
                self.error = Some(TokenError::UnterminatedContinuation);
                None
            }
            _ => (!token.is_empty()).then_some(token),
        }
    }
}

impl<'a, C: Cursor<'a>> TokenFunc<'a, C> for DefTokenizer {
    type Token = String;

    fn next_token(&mut self, cursor: &mut C) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        let token = self.scan(cursor);
        // Skipped delimiters and comments are never handed out.
        cursor.take_text();
        token
    }

    fn take_error(&mut self) -> Option<TokenError> {
        self.error.take()
    }
}

/// Skips a `//` or `/* */` comment starting at the cursor.
pub(crate) fn skip_comment<'a>(cursor: &mut impl Cursor<'a>) {
    cursor.bump();
    if cursor.bump() == Some('*') {
        while !cursor.is_eof() {
            if cursor.first() == '*' && cursor.second() == '/' {
                cursor.bump();
                cursor.bump();
                return;
            }
            cursor.bump();
        }
    } else {
        cursor.bump_while(|c| c != '\r' && c != '\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        DefTokenizer::tokens(text).collect()
    }

    #[test]
    fn splits_on_whitespace_and_keeps_braces() {
        assert_eq!(
            tokens("entityDef foo {\n\t\"key\" \"val\"\n}"),
            ["entityDef", "foo", "{", "key", "val", "}"]
        );
        assert_eq!(tokens("f(a)"), ["f", "(", "a", ")"]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(tokens("a // comment\nb /* block\n */ c"), ["a", "b", "c"]);
        assert_eq!(tokens("a/*x*/b"), ["a", "b"]);
        assert_eq!(tokens("textures/common/caulk"), ["textures/common/caulk"]);
        assert!(tokens("// only a comment").is_empty());
    }

    #[test]
    fn quoted_strings_are_unescaped() {
        assert_eq!(tokens(r#""a b" "tab\there" "say \"hi\"" "c:\dir""#), [
            "a b",
            "tab\there",
            "say \"hi\"",
            "c:\\dir"
        ]);
        assert_eq!(tokens(r#""" next"#), ["", "next"]);
        assert_eq!(tokens(r#"key"value""#), ["key", "value"]);
    }

    #[test]
    fn backslash_continues_quoted_strings() {
        assert_eq!(tokens("\"first \" \\\n  \"second\" tail"), ["first second", "tail"]);
    }

    #[test]
    fn broken_continuation_is_an_error() {
        let mut stream = DefTokenizer::tokens("\"a\" \\ b");
        assert_eq!(stream.next_token(), Err(TokenError::UnterminatedContinuation));
        assert!(stream.is_exhausted());
    }

    #[test]
    fn strict_helpers() {
        let mut stream = DefTokenizer::tokens("table t { { 1, 2 } }");
        assert_eq!(stream.peek().map(String::as_str), Ok("table"));
        stream.skip_tokens(2).unwrap();
        stream.assert_next_token("{").unwrap();
        stream.assert_next_token("{").unwrap();
        assert_eq!(
            stream.assert_next_token("}"),
            Err(TokenError::Mismatch { expected: "}".into(), found: "1,".into() })
        );
        stream.skip_tokens(3).unwrap();
        assert_eq!(stream.next_token(), Err(TokenError::Exhausted));
        assert_eq!(stream.skip_tokens(1), Err(TokenError::Exhausted));
    }

    #[test]
    fn custom_delimiters() {
        let stream = TokenStream::new(StrCursor::new("a,b;c"), DefTokenizer::new(",", ";"));
        assert_eq!(stream.collect::<Vec<_>>(), ["a", "b", ";", "c"]);
    }
}
