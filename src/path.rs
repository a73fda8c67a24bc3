//! The ordered result of traversals and range queries.

use std::slice;
use std::vec;

use crate::node::{Node, NodeId};
use crate::tree::Tree;
use crate::value::Value;

/// An ordered sequence of node handles produced by [`Tree::sort`] or [`Tree::find_range`].
///
/// A `Path` doesn't borrow the tree; resolve its handles with [`Path::nodes`] or [`Tree::get`]. Handles
/// whose nodes were removed since the path was built are skipped when resolving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, id: NodeId) {
        self.nodes.push(id);
    }

    /// Number of handles in the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the path holds no handles.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The handles in the order they were produced.
    pub fn iter(&self) -> std::iter::Copied<slice::Iter<'_, NodeId>> {
        self.nodes.iter().copied()
    }

    /// The first handle.
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// The last handle.
    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// The handles as a slice.
    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Resolves every live handle against `tree`.
    pub fn nodes<'a, P>(&'a self, tree: &'a Tree<P>) -> impl Iterator<Item = &'a Node<P>> + 'a {
        self.nodes.iter().filter_map(move |&id| tree.get(id))
    }

    /// The values of every live handle, in path order.
    ///
    /// # Examples
    ///
    /// ```
    /// use pbst::{Tree, Value};
    ///
    /// let tree = Tree::from_entries(vec![(2, ()), (1, ()), (3, ())]).unwrap();
    /// let sorted = tree.sort().unwrap();
    ///
    /// let values: Vec<&Value> = sorted.values(&tree).collect();
    /// assert_eq!(values, [&Value::from(1), &Value::from(2), &Value::from(3)]);
    /// ```
    pub fn values<'a, P>(&'a self, tree: &'a Tree<P>) -> impl Iterator<Item = &'a Value> + 'a {
        self.nodes(tree).map(Node::value)
    }
}

impl FromIterator<NodeId> for Path {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Path {
    type Item = NodeId;
    type IntoIter = vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
