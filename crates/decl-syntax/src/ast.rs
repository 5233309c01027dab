//! Typed handles over raw [`SyntaxNode`]s.

use crate::{DeclBlockSyntax, NodeId, SyntaxKind, SyntaxNode, SyntaxTree};

pub trait AstNode: Copy {
    fn cast(tree: &SyntaxTree<'_>, id: NodeId) -> Option<Self>;

    fn syntax(self) -> NodeId;
}

/// A top-level decl block.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DeclBlock(NodeId);

impl AstNode for DeclBlock {
    fn cast(tree: &SyntaxTree<'_>, id: NodeId) -> Option<Self> {
        (tree.get(id)?.kind() == SyntaxKind::DeclBlock).then_some(Self(id))
    }

    fn syntax(self) -> NodeId {
        self.0
    }
}

impl DeclBlock {
    pub fn id(self) -> NodeId {
        self.0
    }

    pub fn block_syntax<'t, 'a>(self, tree: &'t SyntaxTree<'a>) -> &'t DeclBlockSyntax<'a> {
        match &tree[self.0] {
            SyntaxNode::DeclBlock(block) => block,
            node => unreachable!("DeclBlock handle points at {:?}", node.kind()),
        }
    }

    /// The declaration type, e.g. `entityDef` or `particle`.
    pub fn type_name<'t>(self, tree: &'t SyntaxTree<'_>) -> Option<&'t str> {
        self.block_syntax(tree).type_node().and_then(|id| tree[id].text())
    }

    pub fn name<'t>(self, tree: &'t SyntaxTree<'_>) -> Option<&'t str> {
        self.block_syntax(tree).name_node().and_then(|id| tree[id].text())
    }

    pub fn contents<'t>(self, tree: &'t SyntaxTree<'_>) -> &'t str {
        self.block_syntax(tree).contents()
    }

    pub fn render(self, tree: &SyntaxTree<'_>) -> String {
        tree.render_node(self.0)
    }
}
