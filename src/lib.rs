//! This crate exposes a mutable Binary Search Tree (BST) whose nodes know their parents, meant to
//! be used as an in-memory ordered index over scalar values.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete stored
//! records. Each `Node` stores a value it is ordered by plus some properties, and has up to two child
//! `Node`s. The invariants kept here are:
//!
//! 1. For every `Node`, the `Node`s in its left subtree have a value less than its own value.
//! 2. For every `Node`, the `Node`s in its right subtree have a value greater than or equal to its
//!    own value. Inserting a value twice puts the second copy to the right of the first.
//! 3. Every `Node` except the root links back to its parent, and the parent links down to it.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values takes `O(height)` where `height` is the longest path from the root `Node` to a
//! leaf `Node`. This tree does *not* rebalance itself, so inserting sorted values produces a tree
//! whose height equals its size. Parent links make it cheap to step to the previous or next `Node`
//! in sorted order from any `Node`.
//!
//! ## Example
//!
//! ```
//! use pbst::{Tree, Value};
//!
//! let mut tree = Tree::new();
//! for value in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(value, ()).unwrap();
//! }
//!
//! let in_range = tree.find_range(3, 8).unwrap().unwrap();
//! let values: Vec<&Value> = in_range.values(&tree).collect();
//! assert_eq!(values.len(), 5);
//!
//! tree.delete(5).unwrap();
//! assert_eq!(tree.size(), 6);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod delete;
mod error;
mod node;
mod path;
mod tree;
mod value;

pub use delete::{Deletion, Removed};
pub use error::{Error, Result};
pub use node::{Node, NodeId};
pub use path::Path;
pub use tree::{Ids, Tree};
pub use value::{Value, ValueFamily};

#[cfg(test)]
mod test {
    pub(crate) mod logging;
    pub(crate) mod quick;
}
