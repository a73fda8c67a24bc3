//! Deleting nodes from a [`Tree`].
//!
//! Removing a node with at most one child unlinks it and splices its child (if any) into its place.
//! Removing a node with two children is different: the node stays where it is and a neighbour is
//! unlinked instead, its value and properties moving into the targeted node. The root borrows from its
//! predecessor; every other node borrows from its successor. Either choice keeps the tree ordered.
//!
//! Callers that key anything on [`NodeId`]s learn about such moves through [`Deletion::Replaced`].
//!
//! # Examples
//!
//! ```
//! use pbst::{Deletion, Tree};
//!
//! let mut tree = Tree::from_entries(vec![(5, "five"), (3, "three"), (8, "eight")]).unwrap();
//! let root = tree.root().unwrap();
//! let three = tree.find(3).unwrap().unwrap();
//!
//! let removed = tree.delete(5).unwrap().unwrap();
//! assert_eq!(removed.properties, "five");
//! assert_eq!(
//!     removed.outcome,
//!     Deletion::Replaced { target: root, unlinked: three }
//! );
//!
//! // The root survived and now holds what used to be in its predecessor.
//! assert_eq!(tree.get(root).unwrap().properties(), &"three");
//! assert!(tree.get(three).is_none());
//! ```

use std::collections::HashMap;
use std::mem;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::node::NodeId;
use crate::tree::Tree;
use crate::value::Value;

/// How a deletion changed the tree's nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    /// The node was unlinked and its handle is now stale.
    Unlinked(NodeId),
    /// `target` had two children. It stays in the tree but now holds the value and properties of
    /// `unlinked`, whose handle is now stale.
    Replaced {
        /// The node that was asked to be deleted.
        target: NodeId,
        /// The neighbour whose contents moved into `target`.
        unlinked: NodeId,
    },
}

impl Deletion {
    /// The handle that no longer resolves.
    pub fn unlinked(&self) -> NodeId {
        match *self {
            Self::Unlinked(id) | Self::Replaced { unlinked: id, .. } => id,
        }
    }
}

/// The contents of a deleted node.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed<P> {
    /// The deleted value.
    pub value: Value,
    /// The properties that were stored with it.
    pub properties: P,
    /// Which node was physically unlinked.
    pub outcome: Deletion,
}

impl<P> Tree<P> {
    /// Deletes a node holding `value` and returns its contents. Deleting a value that isn't in the tree
    /// does nothing and returns `Ok(None)`.
    ///
    /// With duplicates, the node [`Tree::find`] returns is the one deleted.
    pub fn delete<V: Into<Value>>(&mut self, value: V) -> Result<Option<Removed<P>>> {
        let value = value.into();
        self.check(&value)?;
        Ok(self.locate(&value).and_then(|id| self.delete_node(id)))
    }

    /// Deletes the node behind `id`. Returns `None` if the handle is stale.
    ///
    /// The size of the tree drops by exactly one.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&mut self, id: NodeId) -> Option<Removed<P>> {
        let node = self.get(id)?;
        let (parent, left, right) = (node.parent, node.left, node.right);

        match (left, right) {
            (Some(left), Some(right)) => {
                let donor = match parent {
                    None => self.subtree_max(left),
                    Some(_) => self.subtree_min(right),
                };
                // The donor has at most one child, so this doesn't recurse further.
                let donated = self.delete_node(donor)?;

                let node = self.node_mut(id);
                let value = mem::replace(&mut node.value, donated.value);
                let properties = mem::replace(&mut node.properties, donated.properties);
                debug!(node = ?id, unlinked = ?donor, "moved neighbour contents into node");

                Some(Removed {
                    value,
                    properties,
                    outcome: Deletion::Replaced {
                        target: id,
                        unlinked: donor,
                    },
                })
            }
            (child, None) | (None, child) => {
                self.replace_child(parent, id, child);
                let node = self.nodes.remove(id.0)?;
                self.size -= 1;

                Some(Removed {
                    value: node.value,
                    properties: node.properties,
                    outcome: Deletion::Unlinked(id),
                })
            }
        }
    }

    /// Points whatever referenced `old` (its parent's child slot, or the root) at `new` and fixes the
    /// parent link of `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => {
                debug!(root = ?new, "replacing root");
                self.root = new;
            }
            Some(parent) => {
                let parent_node = self.node_mut(parent);
                let side = parent_node.side_of(old);
                *parent_node.child_mut(side) = new;
            }
        }

        if let Some(child) = new {
            self.node_mut(child).parent = parent;
        }
    }

    /// Deletes every node with `start <= value <= end` and returns how many were deleted.
    ///
    /// The matching nodes are collected up front. Deleting one of them may move a later match into an
    /// earlier, already deleted node (see [`Deletion::Replaced`]); such matches are followed to where
    /// they now live, so every match is deleted exactly once and nothing in the range survives.
    ///
    /// # Examples
    ///
    /// ```
    /// use pbst::Tree;
    ///
    /// let mut tree = Tree::from_entries((1..=9).map(|v| (v, ()))).unwrap();
    ///
    /// assert_eq!(tree.delete_range(3, 6).unwrap(), 4);
    /// assert_eq!(tree.size(), 5);
    /// assert_eq!(tree.find_range(3, 6).unwrap(), None);
    /// ```
    pub fn delete_range<S, E>(&mut self, start: S, end: E) -> Result<usize>
    where
        S: Into<Value>,
        E: Into<Value>,
    {
        let (start, end) = (start.into(), end.into());
        self.check_range(&start, &end)?;

        let mut pending: Vec<NodeId> = self.range_path(&start, &end).into_iter().collect();
        // Node currently holding each pending match -> its slot in `pending`.
        let mut slots: HashMap<NodeId, usize> = pending
            .iter()
            .enumerate()
            .map(|(slot, &id)| (id, slot))
            .collect();

        let mut removed = 0;
        for slot in 0..pending.len() {
            let id = pending[slot];
            slots.remove(&id);
            let Some(removal) = self.delete_node(id) else {
                continue;
            };
            removed += 1;

            if let Deletion::Replaced { target, unlinked } = removal.outcome {
                if let Some(moved) = slots.remove(&unlinked) {
                    pending[moved] = target;
                    slots.insert(target, moved);
                }
            }
        }

        debug!(%start, %end, removed, "deleted range");
        Ok(removed)
    }
}
