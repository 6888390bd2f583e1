// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for the fallible parts of the API.
//!
//! Rejected insertions are not errors; they are reported as `false` from `push`.

use crate::node::NodeId;

/// Errors reported by node-scoped and reserved operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The operation exists in the API but is not implemented by this tree.
    #[error("{operation} is not supported by the quadtree")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// The node identifier does not refer to a node of this tree.
    #[error("node {0:?} does not belong to this tree")]
    StaleNode(NodeId),
}

/// Result alias defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
