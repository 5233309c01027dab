//! Splits a decl file into named blocks.
//!
//! Comments outside blocks are skipped. Everything between the header and
//! the opening brace is folded into the block name, so `entityDef foo` comes
//! back as a single name. Block contents are returned raw, nested braces
//! included, without the outer pair.

use crate::cursor::{Cursor, StrCursor};
use crate::def::{WHITESPACE, skip_comment};
use crate::stream::{TokenFunc, TokenStream};

pub type DefBlockTokens<'a, C> = TokenStream<'a, C, DefBlockTokenizer>;

/// A named block, e.g. `entityDef foo` with the text between its braces.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DefBlock {
    pub name: String,
    pub contents: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    SearchingName,
    Name,
    SearchingBlock,
    Contents,
}

#[derive(Clone, Debug)]
pub struct DefBlockTokenizer {
    delimiters: Box<str>,
    block_start: char,
    block_end: char,
}

impl Default for DefBlockTokenizer {
    fn default() -> Self {
        Self::new(WHITESPACE, '{', '}')
    }
}

impl DefBlockTokenizer {
    pub fn new(delimiters: &str, block_start: char, block_end: char) -> Self {
        Self { delimiters: delimiters.into(), block_start, block_end }
    }

    pub fn tokens(text: &str) -> DefBlockTokens<'_, StrCursor<'_>> {
        TokenStream::new(StrCursor::new(text), Self::default())
    }

    fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(c)
    }

    fn scan<'a>(&self, cursor: &mut impl Cursor<'a>) -> Option<DefBlock> {
        let mut state = State::SearchingName;
        let mut block = DefBlock::default();
        let mut depth = 0usize;

        while !cursor.is_eof() {
            let c = cursor.first();
            let comment = c == '/' && matches!(cursor.second(), '*' | '/');

            match state {
                State::SearchingName => {
                    if self.is_delimiter(c) {
                        cursor.bump();
                    } else if comment {
                        skip_comment(cursor);
                    } else {
                        state = State::Name;
                    }
                }
                State::Name => {
                    if self.is_delimiter(c) {
                        state = State::SearchingBlock;
                    } else if c == self.block_start {
                        cursor.bump();
                        depth = 1;
                        state = State::Contents;
                    } else if comment {
                        skip_comment(cursor);
                        state = State::SearchingBlock;
                    } else {
                        cursor.bump();
                        block.name.push(c);
                    }
                }
                State::SearchingBlock => {
                    if self.is_delimiter(c) {
                        cursor.bump();
                    } else if comment {
                        skip_comment(cursor);
                    } else if c == self.block_start {
                        state = State::Name;
                    } else {
                        // Another header word extends the name.
                        block.name.push(' ');
                        state = State::Name;
                    }
                }
                State::Contents => {
                    cursor.bump();
                    if c == self.block_end {
                        depth -= 1;
                        if depth == 0 {
                            return Some(block);
                        }
                    } else if c == self.block_start {
                        depth += 1;
                    }
                    block.contents.push(c);
                }
            }
        }

        // Input ended inside a block or after a dangling name.
        (state == State::Contents || !block.name.is_empty()).then_some(block)
    }
}

impl<'a, C: Cursor<'a>> TokenFunc<'a, C> for DefBlockTokenizer {
    type Token = DefBlock;

    fn next_token(&mut self, cursor: &mut C) -> Option<DefBlock> {
        let block = self.scan(cursor);
        cursor.take_text();
        block
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor as IoCursor;

    use super::*;
    use crate::cursor::StreamCursor;

    fn block(name: &str, contents: &str) -> DefBlock {
        DefBlock { name: name.to_owned(), contents: contents.to_owned() }
    }

    fn blocks(text: &str) -> Vec<DefBlock> {
        DefBlockTokenizer::tokens(text).collect()
    }

    #[test]
    fn empty_input() {
        assert!(blocks("").is_empty());
        assert!(blocks(" \n\t// only a comment\n/* and another */").is_empty());
    }

    #[test]
    fn type_and_name_are_joined() {
        assert_eq!(blocks("entityDef foo\n{\n\t\"key\" \"val\"\n}"), [block(
            "entityDef foo",
            "\n\t\"key\" \"val\"\n"
        )]);
        assert_eq!(blocks("table   t{ 1 }"), [block("table t", " 1 ")]);
    }

    #[test]
    fn comments_between_name_and_brace() {
        assert_eq!(
            blocks("// leading\nmodel /* c */ m // eol\n{ a }\n/* trailing */"),
            [block("model m", " a ")]
        );
        assert_eq!(blocks("textures/common/caulk { }"), [block("textures/common/caulk", " ")]);
    }

    #[test]
    fn nested_braces_stay_in_contents() {
        assert_eq!(blocks("particle p { { count 1 } more }\nskin s {}"), [
            block("particle p", " { count 1 } more "),
            block("skin s", ""),
        ]);
    }

    #[test]
    fn comments_inside_blocks_are_kept() {
        assert_eq!(blocks("m { // note\n a /* b */ }"), [block("m", " // note\n a /* b */ ")]);
    }

    #[test]
    fn truncated_input() {
        assert_eq!(blocks("m { { a"), [block("m", " { a")]);
        assert_eq!(blocks("dangling"), [block("dangling", "")]);
        assert_eq!(blocks("{ anonymous }"), [block("", " anonymous ")]);
    }

    #[test]
    fn stream_input_matches_string_input() {
        let text = "entityDef a {\n \"k\" \"v\"\n}\r\n// c\ntable b { { 0 } }\n";
        let from_stream: Vec<_> =
            TokenStream::new(StreamCursor::new(IoCursor::new(text)), DefBlockTokenizer::default())
                .collect();
        assert_eq!(from_stream, blocks(text));
        assert_eq!(from_stream.len(), 2);
    }

    #[test]
    fn strict_helpers_report_exhaustion() {
        let mut stream = DefBlockTokenizer::tokens("a {}");
        assert_eq!(stream.next_token().map(|b| b.name), Ok("a".to_owned()));
        assert!(stream.is_exhausted());
        assert!(stream.next_token().is_err());
    }
}
