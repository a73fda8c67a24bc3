//! A mutable, unbalanced BST whose nodes know their parents.
//!
//! Nodes are stored in an arena owned by the [`Tree`] and linked through [`NodeId`] handles, so the
//! `parent` back-reference never owns anything and handles to removed nodes simply stop resolving.
//!
//! # Examples
//!
//! ```
//! use pbst::{Tree, Value};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(1).unwrap(), None);
//!
//! let one = tree.insert(1, "one").unwrap();
//! assert_eq!(tree.find(1).unwrap(), Some(one));
//! assert_eq!(tree.get(one).unwrap().properties(), &"one");
//!
//! // Inserting the same value again adds a second node to the right.
//! let other_one = tree.insert(1, "uno").unwrap();
//! assert_eq!(tree.size(), 2);
//! assert_eq!(tree.get(one).unwrap().right(), Some(other_one));
//!
//! // Deleting a value removes one of its nodes and hands back its contents.
//! let removed = tree.delete(1).unwrap().unwrap();
//! assert_eq!(removed.value, Value::from(1));
//! assert_eq!(tree.size(), 1);
//! ```

use std::cmp::Ordering;

use generational_arena::Arena;
use tracing::trace;

use crate::error::{Error, Result};
use crate::node::{Node, NodeId, Side};
use crate::path::Path;
use crate::value::{Value, ValueFamily};

/// A Binary Search Tree over scalar [`Value`]s, each node carrying properties of type `P`.
///
/// No rebalancing is done: inserting sorted input yields a tree as deep as it is large. Every walk
/// (search, traversal, range queries) is iterative, so depth never threatens the call stack.
///
/// Duplicates are allowed and are always placed to the right of equal values.
#[derive(Debug, Clone)]
pub struct Tree<P> {
    pub(crate) nodes: Arena<Node<P>>,
    pub(crate) root: Option<NodeId>,
    /// Number of reachable nodes. Changed only by `insert` and `delete_node`.
    pub(crate) size: usize,
    /// Family fixed at construction, if any. Otherwise the root's family applies.
    family: Option<ValueFamily>,
}

impl<P> Default for Tree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Tree<P> {
    /// Generate a new, empty `Tree`. The first inserted value decides whether the tree holds numbers
    /// or text until it is empty again.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            size: 0,
            family: None,
        }
    }

    /// Generate a new, empty `Tree` that only ever accepts values of `family`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pbst::{Tree, ValueFamily};
    ///
    /// let mut tree: Tree<()> = Tree::with_family(ValueFamily::Text);
    /// assert!(tree.insert(1, ()).unwrap_err().is_invalid_argument());
    /// assert!(tree.insert("one", ()).is_ok());
    /// ```
    pub fn with_family(family: ValueFamily) -> Self {
        Self {
            family: Some(family),
            ..Self::new()
        }
    }

    /// Builds a tree by inserting every entry in iteration order.
    ///
    /// Fails on the first value that can't be inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use pbst::Tree;
    ///
    /// let entries: BTreeMap<&str, u32> = [("b", 2), ("a", 1)].into_iter().collect();
    /// let tree = Tree::from_entries(entries).unwrap();
    ///
    /// assert_eq!(tree.size(), 2);
    /// assert!(tree.has("a").unwrap());
    /// ```
    pub fn from_entries<I, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, P)>,
        V: Into<Value>,
    {
        let mut tree = Self::new();
        tree.merge(entries)?;
        Ok(tree)
    }

    /// Inserts every entry in iteration order. Duplicated values don't overwrite anything, each becomes
    /// its own node.
    ///
    /// Stops at the first value that can't be inserted; entries before it stay in the tree.
    pub fn merge<I, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (V, P)>,
        V: Into<Value>,
    {
        for (value, properties) in entries {
            self.insert(value, properties)?;
        }
        Ok(())
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The family of values this tree accepts, if it is decided yet.
    pub fn family(&self) -> Option<ValueFamily> {
        self.family
            .or_else(|| self.root.map(|root| self.node(root).value.family()))
    }

    /// Removes every node. Handles into the tree all become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.size = 0;
    }

    /// The root node's handle.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Resolves a handle. `None` if the node has been removed.
    pub fn get(&self, id: NodeId) -> Option<&Node<P>> {
        self.nodes.get(id.0)
    }

    /// Resolves a handle for mutation. Only the properties of a node can be changed through it.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<P>> {
        self.nodes.get_mut(id.0)
    }

    /// Looks up a node known to be live.
    ///
    /// ## Panics
    ///
    /// When `id` is stale. Only used on handles taken from links of live nodes.
    pub(crate) fn node(&self, id: NodeId) -> &Node<P> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<P> {
        &mut self.nodes[id.0]
    }

    /// Rejects values this tree can't order against its current contents.
    pub(crate) fn check(&self, value: &Value) -> Result<()> {
        value.check_ordered()?;
        match self.family() {
            Some(expected) if expected != value.family() => Err(Error::MixedFamily {
                value: value.clone(),
                expected,
                found: value.family(),
            }),
            _ => Ok(()),
        }
    }

    pub(crate) fn check_range(&self, start: &Value, end: &Value) -> Result<()> {
        self.check(start)?;
        self.check(end)?;
        if start.family() != end.family() {
            return Err(Error::MixedFamily {
                value: end.clone(),
                expected: start.family(),
                found: end.family(),
            });
        }
        if start > end {
            return Err(Error::InvalidRange {
                start: start.clone(),
                end: end.clone(),
            });
        }
        Ok(())
    }

    /// Whether some node holds `value`.
    pub fn has<V: Into<Value>>(&self, value: V) -> Result<bool> {
        self.find(value).map(|found| found.is_some())
    }

    /// Finds a node holding `value`. With duplicates, the one closest to the root is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use pbst::Tree;
    ///
    /// let tree = Tree::from_entries(vec![(5, ()), (3, ()), (8, ())]).unwrap();
    ///
    /// assert!(tree.find(3).unwrap().is_some());
    /// assert_eq!(tree.find(42).unwrap(), None);
    ///
    /// // The tree holds numbers, so text can't be looked up.
    /// assert!(tree.find("3").is_err());
    /// ```
    pub fn find<V: Into<Value>>(&self, value: V) -> Result<Option<NodeId>> {
        let value = value.into();
        self.check(&value)?;
        Ok(self.locate(&value))
    }

    pub(crate) fn locate(&self, value: &Value) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match node.value.cmp(value) {
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.left,
                Ordering::Less => node.right,
            };
        }
        None
    }

    /// Inserts a new node and returns its handle. Equal values are placed to the right, so inserting a
    /// value twice leaves two nodes.
    ///
    /// The handle stays valid until the node is deleted, but a later deletion of a node with two
    /// children may move other contents into it. See [`Deletion`][crate::Deletion].
    pub fn insert<V: Into<Value>>(&mut self, value: V, properties: P) -> Result<NodeId> {
        let value = value.into();
        self.check(&value)?;

        let mut slot = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            let side = if node.value > value {
                Side::Left
            } else {
                Side::Right
            };
            slot = Some((id, side));
            current = node.child(side);
        }

        trace!(%value, ?slot, "inserting");
        let parent = slot.map(|(parent, _)| parent);
        let id = NodeId(self.nodes.insert(Node::new(value, properties, parent)));
        match slot {
            Some((parent, side)) => *self.node_mut(parent).child_mut(side) = Some(id),
            None => self.root = Some(id),
        }
        self.size += 1;

        if cfg!(debug_assertions) {
            if let Some((parent, side)) = slot {
                let parent = self.node(parent);
                let value = &self.node(id).value;
                match side {
                    Side::Left => assert!(value < &parent.value),
                    Side::Right => assert!(value >= &parent.value),
                }
            }
        }

        Ok(id)
    }

    /// Every node in ascending order, or `None` for an empty tree.
    ///
    /// The traversal keeps its own stack, so degenerate trees of any depth are fine.
    pub fn sort(&self) -> Option<Path> {
        if self.is_empty() {
            return None;
        }
        Some(self.ids().collect())
    }

    /// Lazily walks node handles in ascending order.
    pub fn ids(&self) -> Ids<'_, P> {
        Ids {
            tree: self,
            stack: Vec::new(),
            current: self.root,
        }
    }

    /// Lazily walks nodes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<P>> + '_ {
        self.ids().map(move |id| self.node(id))
    }

    /// The node with the smallest value.
    pub fn min(&self) -> Option<NodeId> {
        self.root.map(|root| self.subtree_min(root))
    }

    /// The node with the largest value.
    pub fn max(&self) -> Option<NodeId> {
        self.root.map(|root| self.subtree_max(root))
    }

    pub(crate) fn subtree_min(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    pub(crate) fn subtree_max(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// The node right before `id` in sorted order. `None` if `id` is the minimum or stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use pbst::Tree;
    ///
    /// let tree = Tree::from_entries(vec![(5, ()), (3, ()), (4, ())]).unwrap();
    /// let five = tree.find(5).unwrap().unwrap();
    /// let four = tree.find(4).unwrap().unwrap();
    /// let three = tree.find(3).unwrap().unwrap();
    ///
    /// assert_eq!(tree.predecessor(five), Some(four));
    /// assert_eq!(tree.predecessor(four), Some(three));
    /// assert_eq!(tree.predecessor(three), None);
    /// ```
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Left)
    }

    /// The node right after `id` in sorted order. `None` if `id` is the maximum or stale.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Right)
    }

    /// Shared walk of `predecessor` (`Side::Left`) and `successor` (`Side::Right`): take the extreme of
    /// the subtree on `side` if there is one, otherwise climb until we come up from the other side.
    fn neighbour(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = self.get(id)?;
        if let Some(child) = node.child(side) {
            return Some(match side {
                Side::Left => self.subtree_max(child),
                Side::Right => self.subtree_min(child),
            });
        }

        let mut current = id;
        let mut parent = node.parent;
        while let Some(up) = parent {
            let up_node = self.node(up);
            if up_node.child(side) != Some(current) {
                return Some(up);
            }
            current = up;
            parent = up_node.parent;
        }
        None
    }

    /// All nodes with `start <= value <= end`, in ascending order. `None` if nothing matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use pbst::{Tree, Value};
    ///
    /// let tree = Tree::from_entries((1..=9).map(|v| (v, ()))).unwrap();
    /// let range = tree.find_range(3, 5).unwrap().unwrap();
    ///
    /// let values: Vec<&Value> = range.values(&tree).collect();
    /// assert_eq!(values, [&Value::from(3), &Value::from(4), &Value::from(5)]);
    ///
    /// assert_eq!(tree.find_range(20, 30).unwrap(), None);
    /// assert!(tree.find_range(5, 3).is_err());
    /// ```
    pub fn find_range<S, E>(&self, start: S, end: E) -> Result<Option<Path>>
    where
        S: Into<Value>,
        E: Into<Value>,
    {
        let (start, end) = (start.into(), end.into());
        self.check_range(&start, &end)?;

        let path = self.range_path(&start, &end);
        trace!(%start, %end, matches = path.len(), "range search");
        Ok(if path.is_empty() { None } else { Some(path) })
    }

    /// In-order walk that skips subtrees lying wholly outside `[start, end]`.
    ///
    /// Equal values can end up on either side of a node after a root deletion, so both bounds prune
    /// inclusively.
    pub(crate) fn range_path(&self, start: &Value, end: &Value) -> Path {
        let mut path = Path::new();
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(id) = current {
                stack.push(id);
                let node = self.node(id);
                current = if start <= &node.value { node.left } else { None };
            }
            let Some(id) = stack.pop() else {
                break;
            };
            let node = self.node(id);
            if start <= &node.value && &node.value <= end {
                path.push(id);
            }
            current = if &node.value <= end { node.right } else { None };
        }
        path
    }

    /// Number of nodes on the longest root-to-leaf path. 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(id);
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        height
    }

    /// Checks parent links, ordering and size accounting over the whole tree.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut reachable = 0;
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        if let Some(root) = self.root {
            assert_eq!(self.node(root).parent, None);
        }
        while let Some(id) = stack.pop() {
            reachable += 1;
            let node = self.node(id);
            if let Some(left) = node.left {
                assert_eq!(self.node(left).parent, Some(id));
                assert!(self.node(left).value <= node.value);
                stack.push(left);
            }
            if let Some(right) = node.right {
                assert_eq!(self.node(right).parent, Some(id));
                assert!(self.node(right).value >= node.value);
                stack.push(right);
            }
        }
        assert_eq!(reachable, self.size);
        assert_eq!(self.nodes.len(), self.size);
        assert_eq!(self.is_empty(), self.root.is_none());

        let values: Vec<&Value> = self.iter().map(Node::value).collect();
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}

/// In-order iterator over node handles, returned by [`Tree::ids`].
pub struct Ids<'a, P> {
    tree: &'a Tree<P>,
    stack: Vec<NodeId>,
    current: Option<NodeId>,
}

impl<'a, P> Iterator for Ids<'a, P> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = self.tree.node(id).left;
        }
        let id = self.stack.pop()?;
        self.current = self.tree.node(id).right;
        Some(id)
    }
}
