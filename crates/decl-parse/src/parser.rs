use decl_errors::{Diagnostic, TextRange};
use decl_syntax::{Builder, NodeId, SyntaxKind};
use decl_tokenizer::{BlockSyntaxTokenizer, BlockTokens, Cursor, Token, TokenKind, TokenStream};

use crate::Parse;

pub(crate) struct Parser<'a, C: Cursor<'a>> {
    tokens: BlockTokens<'a, C>,
    builder: Builder<'a>,
    diagnostics: Vec<Diagnostic>,
}

/// Fragments seen between the first bare token of a decl and its block.
#[derive(Default)]
struct Header<'a> {
    fragments: Vec<Token<'a>>,
    type_index: Option<usize>,
    name_index: Option<usize>,
    bare_tokens: usize,
}

impl<'a> Header<'a> {
    /// A lone bare token is the name; a second one turns the first into the
    /// type. Anything after that is ignored.
    fn push(&mut self, token: Token<'a>) {
        if token.kind == TokenKind::Token {
            let index = self.fragments.len();
            match self.bare_tokens {
                0 => self.name_index = Some(index),
                1 => {
                    self.type_index = self.name_index;
                    self.name_index = Some(index);
                }
                _ => {}
            }
            self.bare_tokens += 1;
        }
        self.fragments.push(token);
    }

    fn range(&self) -> TextRange {
        match (self.fragments.first(), self.fragments.last()) {
            (Some(first), Some(last)) => first.range.cover(last.range),
            _ => TextRange::default(),
        }
    }
}

impl<'a, C: Cursor<'a>> Parser<'a, C> {
    pub(crate) fn new(cursor: C) -> Self {
        Self {
            tokens: TokenStream::new(cursor, BlockSyntaxTokenizer::new()),
            builder: Builder::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn parse(mut self) -> (Parse<'a>, C) {
        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::Whitespace | TokenKind::EolComment | TokenKind::BlockComment => {
                    self.attach_leaf(trivia_kind(token.kind), token)
                }
                TokenKind::BracedBlock => {
                    self.warn("decl block has no name", token.range);
                    let block = self.builder.decl_block(Vec::new(), None, None, token);
                    self.builder.attach(block);
                }
                TokenKind::Token => self.decl_block(token),
                TokenKind::Nothing => unreachable!("the tokenizer never yields empty tokens"),
            }
        }

        let tree = self.builder.finish();
        tracing::debug!(
            blocks = tree.blocks().count(),
            nodes = tree.node_count(),
            warnings = self.diagnostics.len(),
            "parsed decl source"
        );

        (Parse { tree, diagnostics: self.diagnostics }, self.tokens.into_cursor())
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        self.tokens.next_token().ok()
    }

    fn attach_leaf(&mut self, kind: SyntaxKind, token: Token<'a>) {
        let leaf = self.builder.leaf(kind, token);
        self.builder.attach(leaf);
    }

    fn decl_block(&mut self, first: Token<'a>) {
        let mut header = Header::default();
        header.push(first);

        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::BracedBlock => {
                    let (type_index, name_index) = (header.type_index, header.name_index);
                    let headers = self.header_nodes(header);
                    let block = self.builder.decl_block(headers, type_index, name_index, token);
                    self.builder.attach(block);
                    return;
                }
                TokenKind::Token if header.bare_tokens >= 2 => {
                    let message = format!("ignoring extra token `{}` in decl header", token.text());
                    self.warn(message, token.range);
                    header.push(token);
                }
                _ => header.push(token),
            }
        }

        self.warn("decl header is not followed by a block", header.range());
        for node in self.header_nodes(header) {
            self.builder.attach(node);
        }
    }

    /// Bare tokens past the name stay `DeclName` leaves so the text survives,
    /// but the block only ever refers to the one at `name_index`.
    fn header_nodes(&mut self, header: Header<'a>) -> Vec<NodeId> {
        let type_index = header.type_index;

        header
            .fragments
            .into_iter()
            .enumerate()
            .map(|(index, token)| {
                let kind = if Some(index) == type_index {
                    SyntaxKind::DeclType
                } else if token.kind == TokenKind::Token {
                    SyntaxKind::DeclName
                } else {
                    trivia_kind(token.kind)
                };
                self.builder.leaf(kind, token)
            })
            .collect()
    }

    fn warn(&mut self, message: impl Into<String>, range: TextRange) {
        let message = message.into();
        tracing::warn!(?range, "{message}");
        self.diagnostics.push(Diagnostic::warning(message, range));
    }
}

fn trivia_kind(kind: TokenKind) -> SyntaxKind {
    if kind.is_comment() {
        SyntaxKind::Comment
    } else {
        SyntaxKind::Whitespace
    }
}
