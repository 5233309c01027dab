//! Lossless classifier for decl files.
//!
//! Every character of the input lands in exactly one token, so the text of
//! all produced tokens concatenates back to the input. Brace blocks are kept
//! whole: nested braces, quoted strings and comments inside them never end
//! the block early.

use text_size::TextRange;

use crate::cursor::{Cursor, StrCursor};
use crate::stream::{TokenFunc, TokenStream};
use crate::token::{Token, TokenKind};

pub type BlockTokens<'a, C> = TokenStream<'a, C, BlockSyntaxTokenizer>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum State {
    #[default]
    Searching,
    Whitespace,
    Token,
    BracedBlock,
    QuotedStringWithinBlock,
    BlockCommentWithinBlock,
    EolCommentWithinBlock,
    BlockComment,
    EolComment,
}

#[derive(Clone, Debug, Default)]
pub struct BlockSyntaxTokenizer {
    state: State,
    depth: usize,
}

impl BlockSyntaxTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(text: &str) -> BlockTokens<'_, StrCursor<'_>> {
        TokenStream::new(StrCursor::new(text), Self::new())
    }

    fn scan<'a>(&mut self, cursor: &mut impl Cursor<'a>) -> TokenKind {
        use TokenKind::*;

        self.state = State::Searching;
        self.depth = 0;
        let mut kind = Nothing;

        while !cursor.is_eof() {
            let c = cursor.first();

            match self.state {
                State::Searching => {
                    self.state = if is_whitespace(c) {
                        kind = Whitespace;
                        State::Whitespace
                    } else if c == '{' {
                        cursor.bump();
                        self.depth = 1;
                        kind = BracedBlock;
                        State::BracedBlock
                    } else if c == '/' && cursor.second() == '*' {
                        bump_n(cursor, 2);
                        kind = BlockComment;
                        State::BlockComment
                    } else if c == '/' && cursor.second() == '/' {
                        bump_n(cursor, 2);
                        kind = EolComment;
                        State::EolComment
                    } else {
                        // The first character always belongs to the token, a
                        // stray `}` included.
                        cursor.bump();
                        kind = Token;
                        State::Token
                    };
                }
                State::Whitespace => {
                    if !is_whitespace(c) {
                        return kind;
                    }
                    cursor.bump();
                }
                State::Token => {
                    if is_whitespace(c) || c == '{' || c == '}' || starts_comment(cursor) {
                        return kind;
                    }
                    cursor.bump();
                }
                State::BracedBlock => match c {
                    '{' => {
                        cursor.bump();
                        self.depth += 1;
                    }
                    '}' => {
                        cursor.bump();
                        self.depth -= 1;
                        if self.depth == 0 {
                            return kind;
                        }
                    }
                    '"' => {
                        cursor.bump();
                        self.state = State::QuotedStringWithinBlock;
                    }
                    '/' if cursor.second() == '*' => {
                        bump_n(cursor, 2);
                        self.state = State::BlockCommentWithinBlock;
                    }
                    '/' if cursor.second() == '/' => {
                        bump_n(cursor, 2);
                        self.state = State::EolCommentWithinBlock;
                    }
                    _ => {
                        cursor.bump();
                    }
                },
                State::QuotedStringWithinBlock => {
                    cursor.bump();
                    match c {
                        '\\' => {
                            cursor.bump();
                        }
                        '"' => self.state = State::BracedBlock,
                        _ => {}
                    }
                }
                State::BlockCommentWithinBlock => {
                    if ends_block_comment(cursor) {
                        bump_n(cursor, 2);
                        self.state = State::BracedBlock;
                    } else {
                        cursor.bump();
                    }
                }
                State::EolCommentWithinBlock => {
                    if is_newline(c) {
                        self.state = State::BracedBlock;
                    } else {
                        cursor.bump();
                    }
                }
                State::BlockComment => {
                    if ends_block_comment(cursor) {
                        bump_n(cursor, 2);
                        return kind;
                    }
                    cursor.bump();
                }
                State::EolComment => {
                    if is_newline(c) {
                        return kind;
                    }
                    cursor.bump();
                }
            }
        }

        kind
    }
}

impl<'a, C: Cursor<'a>> TokenFunc<'a, C> for BlockSyntaxTokenizer {
    type Token = Token<'a>;

    fn next_token(&mut self, cursor: &mut C) -> Option<Token<'a>> {
        let start = cursor.offset();
        let kind = self.scan(cursor);
        let text = cursor.take_text();

        if text.is_empty() {
            return None;
        }

        Some(Token { kind, text, range: TextRange::new(start, cursor.offset()) })
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\r')
}

fn is_newline(c: char) -> bool {
    matches!(c, '\r' | '\n')
}

fn starts_comment<'a>(cursor: &impl Cursor<'a>) -> bool {
    cursor.first() == '/' && matches!(cursor.second(), '*' | '/')
}

fn ends_block_comment<'a>(cursor: &impl Cursor<'a>) -> bool {
    cursor.first() == '*' && cursor.second() == '/'
}

fn bump_n<'a>(cursor: &mut impl Cursor<'a>, n: usize) {
    for _ in 0..n {
        cursor.bump();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor as IoCursor;

    use super::*;
    use crate::cursor::StreamCursor;
    use crate::token::TokenKind::*;

    fn tokens(text: &str) -> Vec<(TokenKind, String)> {
        BlockSyntaxTokenizer::tokens(text).map(|token| (token.kind, token.text.into_owned())).collect()
    }

    fn expect_single(text: &str, kind: TokenKind, expected: &str) {
        let stream = BlockSyntaxTokenizer::tokens(text);
        let token = stream.current().unwrap_or_else(|| panic!("no token for {text:?}"));
        assert_eq!(token.kind, kind, "input: {text:?}");
        assert_eq!(token.text(), expected, "input: {text:?}");
    }

    fn expect_sequence(text: &str, expected: &[(TokenKind, &str)]) {
        let actual = tokens(text);
        let actual = actual.iter().map(|(kind, text)| (*kind, text.as_str())).collect::<Vec<_>>();
        assert_eq!(actual, expected);
    }

    #[test]
    fn empty_text_yields_nothing() {
        let stream = BlockSyntaxTokenizer::tokens("");
        assert!(stream.is_exhausted());
        assert!(stream.current().is_none());
    }

    #[test]
    fn whitespace() {
        for text in [" ", "\t", "\n", "\r\n", "\t\t\r\n", "\t \t \r\n  \t\n  \n", "\x0B"] {
            expect_single(text, Whitespace, text);
        }
    }

    #[test]
    fn single_tokens() {
        expect_single("test", Token, "test");
        expect_single("textures/common", Token, "textures/common");
        expect_single("m/is/leading*/token/", Token, "m/is/leading*/token/");

        expect_single("// EOL comment ", EolComment, "// EOL comment ");
        expect_single("//", EolComment, "//");
        expect_single("//EOLcomment", EolComment, "//EOLcomment");
        expect_single("/* block comment */", BlockComment, "/* block comment */");
        expect_single("/* bl/ock * * * comment */", BlockComment, "/* bl/ock * * * comment */");
        expect_single("/* blk \n test test\n\ncomment */", BlockComment, "/* blk \n test test\n\ncomment */");
        expect_single("/* starred **/", BlockComment, "/* starred **/");
        expect_single("/* this should not crash *", BlockComment, "/* this should not crash *");
    }

    #[test]
    fn eol_comment_leaves_the_newline() {
        expect_sequence(
            "// one\r\n// two\n",
            &[(EolComment, "// one"), (Whitespace, "\r\n"), (EolComment, "// two"), (Whitespace, "\n")],
        );
    }

    #[test]
    fn token_sequences() {
        expect_sequence(" test{}", &[(Whitespace, " "), (Token, "test"), (BracedBlock, "{}")]);

        expect_sequence(
            " test//comment\n{\n{\r\n   TESt \n}\n}",
            &[
                (Whitespace, " "),
                (Token, "test"),
                (EolComment, "//comment"),
                (Whitespace, "\n"),
                (BracedBlock, "{\n{\r\n   TESt \n}\n}"),
            ],
        );

        expect_sequence(
            "/*comment*/\ntest/* comment */{{//",
            &[
                (BlockComment, "/*comment*/"),
                (Whitespace, "\n"),
                (Token, "test"),
                (BlockComment, "/* comment */"),
                (BracedBlock, "{{//"),
            ],
        );

        expect_sequence(
            "test\n{\n    \"some to//kens {{\" \"containing /* control characters */\" // test\n}\r\n\r\n",
            &[
                (Token, "test"),
                (Whitespace, "\n"),
                (
                    BracedBlock,
                    "{\n    \"some to//kens {{\" \"containing /* control characters */\" // test\n}",
                ),
                (Whitespace, "\r\n\r\n"),
            ],
        );
    }

    #[test]
    fn decl_file_sequence() {
        let text = "// Test declarations\n\ndecl/exporttest/guisurf1\n{\n    guiSurf\tguis/lvlmaps/genericmap.gui\n}\n\ntestdecl2 decltable2 { { 0, 0, 0, 0, 1, 1 } }\n";

        expect_sequence(
            text,
            &[
                (EolComment, "// Test declarations"),
                (Whitespace, "\n\n"),
                (Token, "decl/exporttest/guisurf1"),
                (Whitespace, "\n"),
                (BracedBlock, "{\n    guiSurf\tguis/lvlmaps/genericmap.gui\n}"),
                (Whitespace, "\n\n"),
                (Token, "testdecl2"),
                (Whitespace, " "),
                (Token, "decltable2"),
                (Whitespace, " "),
                (BracedBlock, "{ { 0, 0, 0, 0, 1, 1 } }"),
                (Whitespace, "\n"),
            ],
        );
    }

    #[test]
    fn quotes_inside_block_comments_are_comment_text() {
        expect_sequence(
            "model m { skin \"s\" // uses \"quoted comment text\n }",
            &[
                (Token, "model"),
                (Whitespace, " "),
                (Token, "m"),
                (Whitespace, " "),
                (BracedBlock, "{ skin \"s\" // uses \"quoted comment text\n }"),
            ],
        );

        expect_sequence(
            "{ /* \" } */ } x",
            &[(BracedBlock, "{ /* \" } */ }"), (Whitespace, " "), (Token, "x")],
        );
    }

    #[test]
    fn escaped_quotes_stay_inside_the_string() {
        expect_sequence(
            "{ \"a \\\" } b\" } tail",
            &[(BracedBlock, "{ \"a \\\" } b\" }"), (Whitespace, " "), (Token, "tail")],
        );
    }

    #[test]
    fn nested_braces_close_at_depth_zero() {
        expect_sequence(
            "particle p { { nested } more }",
            &[
                (Token, "particle"),
                (Whitespace, " "),
                (Token, "p"),
                (Whitespace, " "),
                (BracedBlock, "{ { nested } more }"),
            ],
        );
    }

    #[test]
    fn stray_closing_brace_is_a_token() {
        expect_sequence(
            "x} }y",
            &[(Token, "x"), (Token, "}"), (Whitespace, " "), (Token, "}y")],
        );
    }

    #[test]
    fn ranges_cover_the_input() {
        let text = "a /*b*/ {c}\n";
        let mut end = text_size::TextSize::new(0);
        for token in BlockSyntaxTokenizer::tokens(text) {
            assert_eq!(token.range.start(), end);
            assert_eq!(&text[token.range], token.text());
            end = token.range.end();
        }
        assert_eq!(usize::from(end), text.len());
    }

    #[test]
    fn stream_input_matches_string_input() {
        let text = "material m\n{\n\tdiffusemap \"x/{y}\" // c\n}\n/* trailing";
        let from_stream = TokenStream::new(StreamCursor::new(IoCursor::new(text)), BlockSyntaxTokenizer::new())
            .map(|token| (token.kind, token.text.into_owned(), token.range))
            .collect::<Vec<_>>();
        let from_str = BlockSyntaxTokenizer::tokens(text)
            .map(|token| (token.kind, token.text.into_owned(), token.range))
            .collect::<Vec<_>>();
        assert_eq!(from_stream, from_str);
    }
}
