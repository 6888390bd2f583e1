// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-text rendering of a tree for debugging.

use core::fmt::{self, Display, Formatter};

use crate::node::Item;
use crate::tree::QuadTree;
use crate::types::Scalar;

/// Display adapter returned by [`QuadTree::dump`].
///
/// Writes one tab-separated line per node, depth first:
///
/// ```text
/// level 1	(0,0)	(250,250)	-	2	[ a b ]
/// ```
///
/// The columns are depth, top-left corner, bottom-right corner, one dash per level, the
/// number of items held at the node, and their payloads. When the tree keeps crossing
/// items they come first, on a `level x` line with infinite bounds.
#[derive(Debug)]
pub struct Dump<'a, T, P> {
    tree: &'a QuadTree<T, P>,
}

impl<'a, T, P> Dump<'a, T, P> {
    pub(crate) fn new(tree: &'a QuadTree<T, P>) -> Self {
        Self { tree }
    }
}

fn write_payloads<T, P: Display>(f: &mut Formatter<'_>, items: &[Item<T, P>]) -> fmt::Result {
    write!(f, "\t{}\t[", items.len())?;
    for item in items {
        write!(f, " {}", item.payload)?;
    }
    writeln!(f, " ]")
}

impl<T: Scalar + Display, P: Display> Display for Dump<'_, T, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.tree.config().keeps_crossing() {
            write!(f, "level x\t(-INF,-INF)\t(+INF,+INF)\t")?;
            write_payloads(f, self.tree.crossing())?;
        }
        for node in self.tree.nodes() {
            let b = node.bounds();
            write!(
                f,
                "level {}\t({},{})\t({},{})\t",
                node.depth(),
                b.x,
                b.y,
                b.right(),
                b.bottom()
            )?;
            for _ in 0..node.depth() {
                f.write_str("-")?;
            }
            write_payloads(f, node.items())?;
        }
        Ok(())
    }
}
