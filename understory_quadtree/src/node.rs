// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena nodes, stored items, and read-only node views.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::types::{Aabb, Quadrant};

/// Handle to a node of a [`QuadTree`](crate::QuadTree).
///
/// Consists of an arena slot and the tree epoch it was issued in. Nodes are never freed
/// individually, so a handle stays valid until [`QuadTree::clear`](crate::QuadTree::clear)
/// bumps the epoch; after that every older handle is stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32, u32);

impl NodeId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Node ids are intentionally 32-bit; a tree never grows past u32::MAX nodes."
    )]
    pub(crate) const fn new(idx: usize, epoch: u32) -> Self {
        Self(idx as u32, epoch)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn epoch(self) -> u32 {
        self.1
    }
}

/// A rectangle and its payload as stored in the tree.
///
/// Query results are clones; mutating one does not touch the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<T, P> {
    pub(crate) rect: Aabb<T>,
    pub(crate) payload: P,
    pub(crate) holder: Option<NodeId>,
}

impl<T: Copy, P> Item<T, P> {
    /// The item's rectangle.
    pub fn rect(&self) -> Aabb<T> {
        self.rect
    }

    /// The item's payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consume the item and return its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// The node holding the item when it was read.
    ///
    /// `None` for items kept in the crossing bucket, which belong to the tree rather than
    /// to a node.
    pub fn holder(&self) -> Option<NodeId> {
        self.holder
    }

    /// Move the item to a new rectangle.
    ///
    /// Stored items cannot be relocated; this always returns [`Error::Unsupported`].
    pub fn relocate(&mut self, _new_rect: Aabb<T>) -> Result<()> {
        Err(Error::Unsupported {
            operation: "relocate",
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T, P> {
    pub(crate) bounds: Aabb<T>,
    pub(crate) depth: u32,
    pub(crate) parent: Option<NodeId>,
    // First of four contiguous arena slots, NW/NE/SW/SE.
    pub(crate) children: Option<NodeId>,
    pub(crate) items: Vec<Item<T, P>>,
    pub(crate) subtree_count: usize,
}

impl<T, P> Node<T, P> {
    pub(crate) fn new(bounds: Aabb<T>, parent: Option<(NodeId, u32)>) -> Self {
        Self {
            bounds,
            depth: parent.map(|(_, d)| d + 1).unwrap_or(0),
            parent: parent.map(|(id, _)| id),
            children: None,
            items: Vec::new(),
            subtree_count: 0,
        }
    }

    pub(crate) fn child_ids(&self) -> Option<[NodeId; 4]> {
        let first = self.children?;
        Some(Quadrant::ALL.map(|q| NodeId::new(first.idx() + q.index(), first.epoch())))
    }
}

/// Read-only view of one node, handed out by traversal.
#[derive(Debug)]
pub struct NodeRef<'a, T, P> {
    pub(crate) id: NodeId,
    pub(crate) node: &'a Node<T, P>,
}

impl<T, P> Clone for NodeRef<'_, T, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, P> Copy for NodeRef<'_, T, P> {}

impl<'a, T: Copy, P> NodeRef<'a, T, P> {
    /// This node's handle.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Distance from the root; the root is at depth 0.
    pub fn depth(&self) -> u32 {
        self.node.depth
    }

    /// The region this node is responsible for.
    pub fn bounds(&self) -> Aabb<T> {
        self.node.bounds
    }

    /// The parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.node.parent
    }

    /// The four children in NW, NE, SW, SE order, or `None` for a leaf.
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.node.child_ids()
    }

    /// Whether this node has not been subdivided.
    pub fn is_leaf(&self) -> bool {
        self.node.children.is_none()
    }

    /// Items held directly at this node.
    ///
    /// For a subdivided node these are the items that straddle a quadrant boundary.
    pub fn items(&self) -> &'a [Item<T, P>] {
        &self.node.items
    }

    /// Items held at this node and everywhere beneath it.
    pub fn subtree_count(&self) -> usize {
        self.node.subtree_count
    }
}
