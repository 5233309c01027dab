#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    Root,
    Whitespace,
    Comment,
    DeclType,
    DeclName,
    DeclBlock,
}
