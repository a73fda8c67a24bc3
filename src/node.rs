//! Tree vertices and the handles used to reach them.

use generational_arena::Index;

use crate::value::Value;

/// A handle to a node in a [`Tree`][crate::Tree].
///
/// Handles are cheap to copy and never dangle: once the node they point to is physically removed,
/// every lookup through the handle yields `None`, even if the slot is later reused.
///
/// Note that deleting a node with two children removes a *different* node and moves its contents into
/// the targeted one. The targeted handle stays valid but now carries another value. See
/// [`Deletion`][crate::Deletion].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// A vertex of the tree: a value, an opaque property bag, links to up to two children and a
/// back-reference to its parent.
///
/// Children are owned by the tree through its arena; `parent` is only a lookup link and is kept in sync on
/// every attach, detach and splice.
#[derive(Debug, Clone)]
pub struct Node<P> {
    pub(crate) value: Value,
    pub(crate) properties: P,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<P> Node<P> {
    pub(crate) fn new(value: Value, properties: P, parent: Option<NodeId>) -> Self {
        Self {
            value,
            properties,
            left: None,
            right: None,
            parent,
        }
    }

    /// The value this node is ordered by.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The properties attached when the node was inserted (or moved here by a deletion).
    pub fn properties(&self) -> &P {
        &self.properties
    }

    /// Mutable access to the properties. The tree never looks at them, so any change is safe.
    pub fn properties_mut(&mut self) -> &mut P {
        &mut self.properties
    }

    /// The left child, holding smaller values.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The right child, holding values greater than or equal to this one.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// The node whose `left` or `right` points here. `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Whether the node is the root of its tree.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// The side on which `child` hangs off this node.
    ///
    /// ## Panics
    ///
    /// In debug builds, when `child` isn't a child of this node.
    pub(crate) fn side_of(&self, child: NodeId) -> Side {
        debug_assert!(
            self.left == Some(child) || self.right == Some(child),
            "parent link out of sync with child links"
        );
        if self.left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }
}
