// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: an adaptive region quadtree over 2D AABBs.
//!
//! Understory Quadtree stores axis-aligned rectangles tagged with arbitrary payloads and answers
//! "which boxes overlap this region" without scanning everything.
//!
//! - Insert with [`QuadTree::push`]; a box is accepted only if the world bounds contain it.
//! - Query with [`QuadTree::query_region`]; boxes that merely touch the region are not returned.
//! - Inspect the structure with [`QuadTree::visit`] or print it with [`QuadTree::dump`].
//!
//! Each node holds up to [`Config::max_objects`] items. When a leaf overflows it splits into four
//! quadrants and pushes its items down; items that straddle a quadrant boundary stay with the
//! node. Queries skip subtrees whose bounds miss the region, take whole subtrees without testing
//! items when the region covers them, and stop scanning siblings once a single quadrant covers
//! the region.
//!
//! It is generic over the scalar type `T` (`f32`, `f64`, `i32`, `i64`) and the payload `P`.
//!
//! # Example
//!
//! ```rust
//! use understory_quadtree::{Aabb, QuadTree};
//!
//! let mut tree: QuadTree<f64, &str> = QuadTree::new(Aabb::new(0.0, 0.0, 500.0, 500.0));
//! assert!(tree.push(Aabb::new(20.0, 50.0, 1.0, 1.0), "near"));
//! assert!(tree.push(Aabb::new(350.0, 350.0, 125.0, 125.0), "far"));
//!
//! // Not contained by the world: rejected, nothing stored.
//! assert!(!tree.push(Aabb::new(-10.0, 0.0, 20.0, 20.0), "outside"));
//!
//! let hits = tree.query_region(Aabb::new(0.0, 0.0, 100.0, 100.0));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(*hits[0].payload(), "near");
//! ```
//!
//! ## Tuning
//!
//! ```rust
//! use understory_quadtree::{Aabb, Config, QuadTree, TreeFlags};
//!
//! let config = Config::default()
//!     .with_max_objects(8)
//!     .with_max_levels(6)
//!     .with_flags(TreeFlags::ENFORCE_MAX_LEVELS | TreeFlags::KEEP_CROSSING);
//! let mut tree: QuadTree<i64, u32> = QuadTree::with_config(Aabb::new(0, 0, 1024, 1024), config);
//!
//! // Crosses the right edge of the world: kept aside instead of rejected.
//! assert!(tree.push(Aabb::new(1000, 10, 100, 10), 1));
//! assert_eq!(tree.crossing().len(), 1);
//! ```
//!
//! Without flags, [`Config::max_levels`] is advisory and depth is unbounded.
//!
//! ## Limitations
//!
//! Stored items cannot be removed or moved; [`QuadTree::relocate`] always fails with
//! [`Error::Unsupported`]. With integer scalars, odd extents are halved with truncation, so the
//! four quadrants of such a node leave its last row or column uncovered.
//!
//! The tree is not internally synchronized; share it behind a single lock if needed.

#![no_std]

extern crate alloc;

pub mod config;
pub mod dump;
pub mod error;
pub mod node;
pub mod tree;
pub mod types;

pub use config::{Config, TreeFlags};
pub use dump::Dump;
pub use error::{Error, Result};
pub use node::{Item, NodeId, NodeRef};
pub use tree::{DepthFirst, QuadTree};
pub use types::{Aabb, Quadrant, Scalar};
