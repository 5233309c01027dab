//! Lossless, editable syntax tree for decl files.
//!
//! Nodes live in an arena owned by the [`SyntaxTree`] and refer to each other
//! through [`NodeId`]s. Rendering the tree reproduces the parsed text exactly,
//! apart from the fragments changed through the mutation methods.

mod arena;
pub mod ast;
mod error;
mod node;
mod syntax_kind;
mod tree;

pub use arena::NodeId;
pub use ast::{AstNode, DeclBlock};
pub use error::SyntaxError;
pub use node::{DeclBlockSyntax, SyntaxNode};
pub use syntax_kind::SyntaxKind;
pub use tree::{Builder, SyntaxTree};
