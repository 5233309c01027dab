use std::fmt;
use std::ops::{Index, IndexMut};

/// Handle to a node stored in a [`SyntaxTree`](crate::SyntaxTree).
///
/// Only meaningful for the tree that handed it out.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Arena<T> {
    pub(crate) fn alloc(&mut self, value: T) -> NodeId {
        let idx = self.items.len() as u32;
        self.items.push(value);
        NodeId(idx)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        self.items.get(id.0 as usize)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.items.get_mut(id.0 as usize)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn map<U>(self, f: impl FnMut(T) -> U) -> Arena<U> {
        Arena { items: self.items.into_iter().map(f).collect() }
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.items[id.0 as usize]
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.items[id.0 as usize]
    }
}
