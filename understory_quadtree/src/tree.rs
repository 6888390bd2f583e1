// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: subdivision, insertion, region queries, traversal.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::config::Config;
use crate::dump::Dump;
use crate::error::{Error, Result};
use crate::node::{Item, Node, NodeId, NodeRef};
use crate::types::{Aabb, Quadrant, Scalar};

const ROOT: usize = 0;

/// Region quadtree over AABBs with payloads.
///
/// Nodes live in an arena owned by the tree. A subdivided node owns four contiguous slots
/// in NW, NE, SW, SE order; parent links and item holders are plain [`NodeId`]s.
pub struct QuadTree<T, P> {
    config: Config,
    arena: Vec<Node<T, P>>,
    crossing: Vec<Item<T, P>>,
    epoch: u32,
}

impl<T: Debug, P> Debug for QuadTree<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.arena[ROOT].bounds)
            .field("config", &self.config)
            .field("nodes", &self.arena.len())
            .field("items", &self.arena[ROOT].subtree_count)
            .field("crossing", &self.crossing.len())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar, P> QuadTree<T, P> {
    /// Create an empty tree covering `bounds` with the default [`Config`].
    pub fn new(bounds: Aabb<T>) -> Self {
        Self::with_config(bounds, Config::default())
    }

    /// Create an empty tree covering `bounds`.
    pub fn with_config(bounds: Aabb<T>, config: Config) -> Self {
        Self {
            config,
            arena: vec![Node::new(bounds, None)],
            crossing: Vec::new(),
            epoch: 0,
        }
    }

    /// The world bounds given at construction.
    pub fn bounds(&self) -> Aabb<T> {
        self.arena[ROOT].bounds
    }

    /// The settings this tree was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        NodeId::new(ROOT, self.epoch)
    }

    /// Number of stored items, crossing bucket included.
    pub fn len(&self) -> usize {
        self.arena[ROOT].subtree_count + self.crossing.len()
    }

    /// Whether no item has been accepted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Items that cross the world boundary, kept when
    /// [`TreeFlags::KEEP_CROSSING`](crate::TreeFlags::KEEP_CROSSING) is set.
    pub fn crossing(&self) -> &[Item<T, P>] {
        &self.crossing
    }

    /// Drop every node and item, leaving an empty root over the same bounds.
    ///
    /// All previously issued [`NodeId`]s become stale.
    pub fn clear(&mut self) {
        let bounds = self.bounds();
        self.arena.clear();
        self.arena.push(Node::new(bounds, None));
        self.crossing.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Read-only view of a node, or `None` if `id` is stale.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T, P>> {
        let idx = self.resolve(id).ok()?;
        Some(NodeRef {
            id,
            node: &self.arena[idx],
        })
    }

    /// Insert an item.
    ///
    /// Returns `false`, leaving the tree untouched, when `rect` is not contained by the
    /// world bounds. With [`TreeFlags::KEEP_CROSSING`](crate::TreeFlags::KEEP_CROSSING) an
    /// item that merely intersects the world is accepted into the crossing bucket instead.
    pub fn push(&mut self, rect: Aabb<T>, payload: P) -> bool {
        let bounds = self.arena[ROOT].bounds;
        if bounds.contains(&rect) {
            self.descend(ROOT, rect, payload);
            return true;
        }
        if self.config.keeps_crossing() && bounds.intersects(&rect) {
            self.crossing.push(Item {
                rect,
                payload,
                holder: None,
            });
            return true;
        }
        tracing::trace!(?rect, "rejected item outside quadtree bounds");
        false
    }

    /// Insert an item previously read out of a tree, such as a query result.
    ///
    /// Same contract as [`QuadTree::push`]; the stored copy gets a fresh holder.
    pub fn push_item(&mut self, item: Item<T, P>) -> bool {
        self.push(item.rect, item.payload)
    }

    /// Insert an item starting at an arbitrary node.
    ///
    /// Same contract as [`QuadTree::push`] against that node's bounds; the crossing bucket
    /// is never used. Ancestors' counts are kept in sync.
    pub fn push_at(&mut self, node: NodeId, rect: Aabb<T>, payload: P) -> Result<bool> {
        let idx = self.resolve(node)?;
        if !self.arena[idx].bounds.contains(&rect) {
            tracing::trace!(?node, ?rect, "rejected item outside node bounds");
            return Ok(false);
        }
        self.descend(idx, rect, payload);
        let mut up = self.arena[idx].parent;
        while let Some(p) = up {
            let n = &mut self.arena[p.idx()];
            n.subtree_count += 1;
            up = n.parent;
        }
        Ok(true)
    }

    /// Move a stored item to a new rectangle.
    ///
    /// Stored items cannot be relocated; this always returns [`Error::Unsupported`] and
    /// never modifies the tree.
    pub fn relocate(&mut self, _item: &Item<T, P>, _new_rect: Aabb<T>) -> Result<()> {
        Err(Error::Unsupported {
            operation: "relocate",
        })
    }

    /// Depth-first, pre-order walk over every node (children in NW, NE, SW, SE order).
    pub fn nodes(&self) -> DepthFirst<'_, T, P> {
        DepthFirst {
            tree: self,
            stack: vec![ROOT],
        }
    }

    /// Call `f` for every node, in the order of [`QuadTree::nodes`].
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(NodeRef<'_, T, P>),
    {
        for node in self.nodes() {
            f(node);
        }
    }

    /// Text rendering of the whole tree, one line per node.
    pub fn dump(&self) -> Dump<'_, T, P> {
        Dump::new(self)
    }

    // --- internals ---

    fn resolve(&self, id: NodeId) -> Result<usize> {
        if id.epoch() == self.epoch && id.idx() < self.arena.len() {
            Ok(id.idx())
        } else {
            Err(Error::StaleNode(id))
        }
    }

    /// First child of `at` whose bounds contain `rect`.
    fn child_for(&self, at: usize, rect: &Aabb<T>) -> Option<usize> {
        let first = self.arena[at].children?.idx();
        Quadrant::ALL
            .into_iter()
            .map(|q| first + q.index())
            .find(|&c| self.arena[c].bounds.contains(rect))
    }

    /// Store an item somewhere under `start`, whose bounds must contain `rect`.
    ///
    /// Counts are bumped on `start` and every node below it on the way down; ancestors of
    /// `start` are the caller's business.
    fn descend(&mut self, start: usize, rect: Aabb<T>, payload: P) {
        let mut at = start;
        loop {
            self.arena[at].subtree_count += 1;
            if self.arena[at].children.is_none() {
                let node = &self.arena[at];
                if node.items.len() < self.config.capacity()
                    || !self.config.may_subdivide(node.depth)
                {
                    break;
                }
                self.subdivide(at);
            }
            match self.child_for(at, &rect) {
                Some(child) => at = child,
                None => break,
            }
        }
        let holder = Some(NodeId::new(at, self.epoch));
        self.arena[at].items.push(Item {
            rect,
            payload,
            holder,
        });
    }

    /// Split a full leaf into four children and push its items down where they fit.
    ///
    /// The subtree count of `at` is unchanged: every item stays somewhere beneath it.
    fn subdivide(&mut self, at: usize) {
        let first = self.arena.len();
        let parent = (NodeId::new(at, self.epoch), self.arena[at].depth);
        let quads = self.arena[at].bounds.quadrants();
        for q in quads {
            self.arena.push(Node::new(q, Some(parent)));
        }
        self.arena[at].children = Some(NodeId::new(first, self.epoch));

        let held = core::mem::take(&mut self.arena[at].items);
        let total = held.len();
        let mut kept = Vec::new();
        for item in held {
            match self.child_for(at, &item.rect) {
                Some(child) => self.descend(child, item.rect, item.payload),
                None => kept.push(item),
            }
        }
        tracing::debug!(
            node = at,
            depth = self.arena[at].depth,
            bounds = ?self.arena[at].bounds,
            moved = total - kept.len(),
            kept = kept.len(),
            "subdivided quadtree node"
        );
        self.arena[at].items = kept;
    }
}

impl<T: Scalar, P: Clone> QuadTree<T, P> {
    /// Every stored item whose rectangle intersects `zone`.
    ///
    /// Items that only touch `zone` along an edge are excluded. Results are copies, and
    /// their order is stable for an unchanged tree and zone.
    ///
    /// When `zone` contains a node's bounds the whole subtree is returned without testing
    /// its items. A zero-area item lying exactly on the edge of `zone` is then included
    /// even though it does not [intersect](Aabb::intersects) `zone`.
    pub fn query_region(&self, zone: Aabb<T>) -> Vec<Item<T, P>> {
        let mut out = Vec::new();
        out.extend(
            self.crossing
                .iter()
                .filter(|item| item.rect.intersects(&zone))
                .cloned(),
        );
        self.collect_zone(ROOT, &zone, &mut out);
        out
    }

    /// Like [`QuadTree::query_region`] but limited to the subtree under `node`.
    ///
    /// The crossing bucket is not consulted.
    pub fn query_region_at(&self, node: NodeId, zone: Aabb<T>) -> Result<Vec<Item<T, P>>> {
        let idx = self.resolve(node)?;
        let mut out = Vec::new();
        self.collect_zone(idx, &zone, &mut out);
        Ok(out)
    }

    fn collect_zone(&self, at: usize, zone: &Aabb<T>, out: &mut Vec<Item<T, P>>) {
        let node = &self.arena[at];
        if zone.contains(&node.bounds) {
            // Everything under `at` is inside `node.bounds`, hence inside `zone`.
            tracing::trace!(node = at, count = node.subtree_count, "whole subtree in zone");
            out.reserve(node.subtree_count);
            self.collect_all(at, out);
            return;
        }
        out.extend(
            node.items
                .iter()
                .filter(|item| item.rect.intersects(zone))
                .cloned(),
        );
        let Some(first) = node.children else {
            return;
        };
        for q in Quadrant::ALL {
            let child = first.idx() + q.index();
            let bounds = &self.arena[child].bounds;
            if bounds.intersects(zone) {
                self.collect_zone(child, zone, out);
                // Quadrants are disjoint: no sibling can overlap a zone this one contains.
                if bounds.contains(zone) {
                    break;
                }
            }
        }
    }

    fn collect_all(&self, at: usize, out: &mut Vec<Item<T, P>>) {
        let node = &self.arena[at];
        out.extend(node.items.iter().cloned());
        if let Some(first) = node.children {
            for q in Quadrant::ALL {
                self.collect_all(first.idx() + q.index(), out);
            }
        }
    }
}

/// Depth-first iterator over the nodes of a [`QuadTree`].
///
/// Returned by [`QuadTree::nodes`].
pub struct DepthFirst<'a, T, P> {
    tree: &'a QuadTree<T, P>,
    stack: Vec<usize>,
}

impl<T, P> Debug for DepthFirst<'_, T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DepthFirst")
            .field("pending", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T, P> Iterator for DepthFirst<'a, T, P> {
    type Item = NodeRef<'a, T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let at = self.stack.pop()?;
        let node = &tree.arena[at];
        if let Some(first) = node.children {
            let slots = Quadrant::ALL.map(|q| first.idx() + q.index());
            self.stack.extend(slots.into_iter().rev());
        }
        Some(NodeRef {
            id: NodeId::new(at, tree.epoch),
            node,
        })
    }
}
