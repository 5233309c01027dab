use decl_tokenizer::Token;

use crate::{NodeId, SyntaxKind};

/// One node of the decl syntax tree.
///
/// Leaves own the token they were built from; rendering a node yields exactly
/// the text of the tokens below it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SyntaxNode<'a> {
    Root { children: Vec<NodeId> },
    Whitespace(Token<'a>),
    Comment(Token<'a>),
    DeclType(Token<'a>),
    DeclName(Token<'a>),
    DeclBlock(DeclBlockSyntax<'a>),
}

impl<'a> SyntaxNode<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Root { .. } => SyntaxKind::Root,
            Self::Whitespace(_) => SyntaxKind::Whitespace,
            Self::Comment(_) => SyntaxKind::Comment,
            Self::DeclType(_) => SyntaxKind::DeclType,
            Self::DeclName(_) => SyntaxKind::DeclName,
            Self::DeclBlock(_) => SyntaxKind::DeclBlock,
        }
    }

    /// The wrapped token of a leaf node.
    pub fn token(&self) -> Option<&Token<'a>> {
        match self {
            Self::Whitespace(token)
            | Self::Comment(token)
            | Self::DeclType(token)
            | Self::DeclName(token) => Some(token),
            Self::Root { .. } | Self::DeclBlock(_) => None,
        }
    }

    /// Leaf text, `None` for nodes with children.
    pub fn text(&self) -> Option<&str> {
        self.token().map(Token::text)
    }

    pub(crate) fn into_owned(self) -> SyntaxNode<'static> {
        match self {
            Self::Root { children } => SyntaxNode::Root { children },
            Self::Whitespace(token) => SyntaxNode::Whitespace(token.into_owned()),
            Self::Comment(token) => SyntaxNode::Comment(token.into_owned()),
            Self::DeclType(token) => SyntaxNode::DeclType(token.into_owned()),
            Self::DeclName(token) => SyntaxNode::DeclName(token.into_owned()),
            Self::DeclBlock(block) => SyntaxNode::DeclBlock(block.into_owned()),
        }
    }
}

/// `<type>? <name> { ... }` with every header fragment kept in source order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeclBlockSyntax<'a> {
    pub(crate) headers: Vec<NodeId>,
    pub(crate) type_index: Option<usize>,
    pub(crate) name_index: Option<usize>,
    pub(crate) block: Token<'a>,
}

impl<'a> DeclBlockSyntax<'a> {
    /// Whitespace, comments, type and name in the order they were parsed.
    ///
    /// Bare tokens past the name also show up here as `DeclName` leaves.
    /// Only [`name_node`](Self::name_node) is the block's name.
    pub fn headers(&self) -> &[NodeId] {
        &self.headers
    }

    pub fn type_node(&self) -> Option<NodeId> {
        self.type_index.map(|index| self.headers[index])
    }

    pub fn name_node(&self) -> Option<NodeId> {
        self.name_index.map(|index| self.headers[index])
    }

    /// The raw block, braces included.
    pub fn block_token(&self) -> &Token<'a> {
        &self.block
    }

    /// The block text without its outer braces.
    ///
    /// A block cut short by the end of input has no closing brace; only the
    /// opening one is stripped then.
    pub fn contents(&self) -> &str {
        let text = self.block.text();
        let inner = text.strip_prefix('{').unwrap_or(text);
        inner.strip_suffix('}').unwrap_or(inner)
    }

    pub(crate) fn set_contents(&mut self, contents: &str) {
        self.block.text = format!("{{{contents}}}").into();
    }

    fn into_owned(self) -> DeclBlockSyntax<'static> {
        DeclBlockSyntax {
            headers: self.headers,
            type_index: self.type_index,
            name_index: self.name_index,
            block: self.block.into_owned(),
        }
    }
}
