// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time tuning for a [`QuadTree`](crate::QuadTree).

bitflags::bitflags! {
    /// Optional behaviors layered on top of the plain capacity-driven quadtree.
    ///
    /// The empty set gives the classic behavior: items outside the world are rejected and
    /// depth is unbounded.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TreeFlags: u8 {
        /// Accept root-level items that cross the world boundary into a separate bucket.
        ///
        /// Items that do not touch the world at all are still rejected.
        const KEEP_CROSSING      = 0b0000_0001;
        /// Stop subdividing once a leaf reaches [`Config::max_levels`].
        ///
        /// Leaves at that depth keep growing past [`Config::max_objects`] instead.
        const ENFORCE_MAX_LEVELS = 0b0000_0010;
    }
}

/// Capacity and depth settings shared by every node of a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Items a leaf holds before it subdivides. Zero behaves as one.
    pub max_objects: usize,
    /// Depth limit. Advisory unless [`TreeFlags::ENFORCE_MAX_LEVELS`] is set.
    pub max_levels: u32,
    /// Optional behaviors.
    pub flags: TreeFlags,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_objects: 5,
            max_levels: 5,
            flags: TreeFlags::empty(),
        }
    }
}

impl Config {
    /// Set the per-leaf capacity.
    pub const fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = max_objects;
        self
    }

    /// Set the depth limit.
    pub const fn with_max_levels(mut self, max_levels: u32) -> Self {
        self.max_levels = max_levels;
        self
    }

    /// Replace the behavior flags.
    pub const fn with_flags(mut self, flags: TreeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub(crate) fn capacity(&self) -> usize {
        self.max_objects.max(1)
    }

    /// Whether a leaf at `depth` may split into four children.
    pub(crate) fn may_subdivide(&self, depth: u32) -> bool {
        !self.flags.contains(TreeFlags::ENFORCE_MAX_LEVELS) || depth < self.max_levels
    }

    pub(crate) fn keeps_crossing(&self) -> bool {
        self.flags.contains(TreeFlags::KEEP_CROSSING)
    }
}
