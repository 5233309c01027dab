use thiserror::Error;

use crate::{NodeId, SyntaxKind};

/// Misuse of the tree API. Never caused by the parsed text itself.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SyntaxError {
    #[error("{0:?} does not belong to this tree")]
    UnknownNode(NodeId),
    #[error("expected a decl block, found {0:?}")]
    NotADeclBlock(SyntaxKind),
    #[error("expected a decl name, found {0:?}")]
    NotADeclName(SyntaxKind),
    #[error("the decl block has no name")]
    UnnamedBlock,
}
