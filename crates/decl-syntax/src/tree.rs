use std::fmt;
use std::ops::Index;

use decl_tokenizer::Token;

use crate::arena::Arena;
use crate::ast::{AstNode as _, DeclBlock};
use crate::{DeclBlockSyntax, NodeId, SyntaxError, SyntaxKind, SyntaxNode};

/// An editable, lossless syntax tree over one decl source.
///
/// The tree owns every node; handles are plain [`NodeId`]s. Borrowed input
/// keeps `'a` tied to the source text, [`SyntaxTree::into_owned`] detaches it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyntaxTree<'a> {
    nodes: Arena<SyntaxNode<'a>>,
    root: NodeId,
}

impl Default for SyntaxTree<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SyntaxTree<'a> {
    pub fn new() -> Self {
        let mut nodes = Arena::default();
        let root = nodes.alloc(SyntaxNode::Root { children: Vec::new() });
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Top-level nodes in source order.
    pub fn children(&self) -> &[NodeId] {
        match &self.nodes[self.root] {
            SyntaxNode::Root { children } => children,
            node => unreachable!("root slot holds {:?}", node.kind()),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode<'a>> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn render(&self) -> String {
        self.render_node(self.root)
    }

    pub fn render_node(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id] {
            SyntaxNode::Root { children } => {
                for &child in children {
                    self.write_node(child, out);
                }
            }
            SyntaxNode::DeclBlock(block) => {
                for &header in &block.headers {
                    self.write_node(header, out);
                }
                out.push_str(block.block.text());
            }
            SyntaxNode::Whitespace(token)
            | SyntaxNode::Comment(token)
            | SyntaxNode::DeclType(token)
            | SyntaxNode::DeclName(token) => out.push_str(token.text()),
        }
    }

    /// Top-level decl blocks in source order.
    pub fn blocks(&self) -> impl Iterator<Item = DeclBlock> + '_ {
        self.children().iter().filter_map(|&id| DeclBlock::cast(self, id))
    }

    pub fn for_each_block(&self, mut f: impl FnMut(DeclBlock)) {
        for block in self.blocks() {
            f(block);
        }
    }

    pub fn find_first_block(&self, mut predicate: impl FnMut(DeclBlock) -> bool) -> Option<DeclBlock> {
        self.blocks().find(|&block| predicate(block))
    }

    /// Case-sensitive lookup by decl name.
    pub fn find_first_named_block(&self, name: &str) -> Option<DeclBlock> {
        self.find_first_block(|block| block.name(self) == Some(name))
    }

    pub fn block(&self, id: NodeId) -> Result<DeclBlock, SyntaxError> {
        let node = self.get(id).ok_or(SyntaxError::UnknownNode(id))?;
        DeclBlock::cast(self, id).ok_or(SyntaxError::NotADeclBlock(node.kind()))
    }

    pub fn block_contents(&self, id: NodeId) -> Result<&str, SyntaxError> {
        Ok(self.block(id)?.contents(self))
    }

    /// Replaces everything between the braces of a decl block.
    pub fn set_block_contents(&mut self, id: NodeId, contents: &str) -> Result<(), SyntaxError> {
        match self.node_mut(id)? {
            SyntaxNode::DeclBlock(block) => {
                block.set_contents(contents);
                Ok(())
            }
            node => Err(SyntaxError::NotADeclBlock(node.kind())),
        }
    }

    /// Replaces the text of a `DeclName` node. The new text is not re-parsed.
    pub fn set_name(&mut self, id: NodeId, name: &str) -> Result<(), SyntaxError> {
        match self.node_mut(id)? {
            SyntaxNode::DeclName(token) => {
                token.text = name.to_owned().into();
                Ok(())
            }
            node => Err(SyntaxError::NotADeclName(node.kind())),
        }
    }

    pub fn rename_block(&mut self, id: NodeId, name: &str) -> Result<(), SyntaxError> {
        let name_node =
            self.block(id)?.block_syntax(self).name_node().ok_or(SyntaxError::UnnamedBlock)?;
        self.set_name(name_node, name)
    }

    pub fn into_owned(self) -> SyntaxTree<'static> {
        SyntaxTree { nodes: self.nodes.map(SyntaxNode::into_owned), root: self.root }
    }

    /// Indented dump of the tree, one node per line.
    pub fn debug_tree(&self) -> impl fmt::Display + '_ {
        DebugTree(self)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SyntaxNode<'a>, SyntaxError> {
        self.nodes.get_mut(id).ok_or(SyntaxError::UnknownNode(id))
    }
}

impl<'a> Index<NodeId> for SyntaxTree<'a> {
    type Output = SyntaxNode<'a>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id]
    }
}

struct DebugTree<'t, 'a>(&'t SyntaxTree<'a>);

impl DebugTree<'_, '_> {
    fn node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let indent = depth * 2;
        match &self.0[id] {
            SyntaxNode::Root { children } => {
                writeln!(f, "{:indent$}Root", "")?;
                for &child in children {
                    self.node(f, child, depth + 1)?;
                }
            }
            SyntaxNode::DeclBlock(block) => {
                writeln!(f, "{:indent$}DeclBlock", "")?;
                for &header in &block.headers {
                    self.node(f, header, depth + 1)?;
                }
                token(f, "BracedBlock", &block.block, indent + 2)?;
            }
            node => {
                if let Some(leaf) = node.token() {
                    token(f, &format!("{:?}", node.kind()), leaf, indent)?;
                }
            }
        }
        Ok(())
    }
}

fn token(f: &mut fmt::Formatter<'_>, label: &str, token: &Token<'_>, indent: usize) -> fmt::Result {
    writeln!(f, "{:indent$}{label}@{:?} {:?}", "", token.range, token.text())
}

impl fmt::Display for DebugTree<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node(f, self.0.root, 0)
    }
}

/// Assembles a [`SyntaxTree`] bottom-up.
///
/// Nodes are allocated first and attached to the root explicitly, so header
/// fragments can be collected before it is known whether a block follows.
#[derive(Debug, Default)]
pub struct Builder<'a> {
    tree: SyntaxTree<'a>,
}

impl<'a> Builder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a leaf node of `kind` around `token`.
    ///
    /// # Panics
    ///
    /// If `kind` is not a leaf kind.
    pub fn leaf(&mut self, kind: SyntaxKind, token: Token<'a>) -> NodeId {
        let node = match kind {
            SyntaxKind::Whitespace => SyntaxNode::Whitespace(token),
            SyntaxKind::Comment => SyntaxNode::Comment(token),
            SyntaxKind::DeclType => SyntaxNode::DeclType(token),
            SyntaxKind::DeclName => SyntaxNode::DeclName(token),
            SyntaxKind::Root | SyntaxKind::DeclBlock => panic!("{kind:?} is not a leaf kind"),
        };
        self.tree.nodes.alloc(node)
    }

    /// Allocates a decl block; `type_index` and `name_index` point into
    /// `headers`.
    pub fn decl_block(
        &mut self,
        headers: Vec<NodeId>,
        type_index: Option<usize>,
        name_index: Option<usize>,
        block: Token<'a>,
    ) -> NodeId {
        debug_assert!(type_index.is_none_or(|index| index < headers.len()));
        debug_assert!(name_index.is_none_or(|index| index < headers.len()));
        self.tree.nodes.alloc(SyntaxNode::DeclBlock(DeclBlockSyntax {
            headers,
            type_index,
            name_index,
            block,
        }))
    }

    /// Appends an allocated node to the root.
    pub fn attach(&mut self, id: NodeId) {
        let root = self.tree.root;
        match &mut self.tree.nodes[root] {
            SyntaxNode::Root { children } => children.push(id),
            node => unreachable!("root slot holds {:?}", node.kind()),
        }
    }

    pub fn finish(self) -> SyntaxTree<'a> {
        self.tree
    }
}
