use std::borrow::Cow;

use text_size::TextRange;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    /// Placeholder for a token that has not been produced yet.
    Nothing,
    Whitespace,
    /// A whole balanced `{ ... }` span, braces included.
    BracedBlock,
    /// A bare run of non-whitespace characters.
    Token,
    EolComment,
    BlockComment,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, Self::EolComment | Self::BlockComment)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Exact source text of the token, delimiters included.
    pub text: Cow<'a, str>,
    /// Where the token sat in the original input.
    pub range: TextRange,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: impl Into<Cow<'a, str>>, range: TextRange) -> Self {
        Self { kind, text: text.into(), range }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_owned(self) -> Token<'static> {
        Token { kind: self.kind, text: Cow::Owned(self.text.into_owned()), range: self.range }
    }
}

impl AsRef<str> for Token<'_> {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
