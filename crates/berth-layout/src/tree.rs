#![forbid(unsafe_code)]

//! Splitter-tree capability trait.
//!
//! The engine never holds widget references. The host implements
//! [`SplitterTree`] once over whatever its container hierarchy is; a node is
//! a splitter iff [`SplitterTree::splitter`] returns state for it. This
//! replaces runtime type inspection of tree nodes with a capability resolved
//! per node at traversal time.

use berth_core::geometry::Size;
use serde::{Deserialize, Serialize};

/// Stable identifier for a splitter-tree node.
///
/// Host-assigned, stable for the lifetime of the node. Snapshots store these
/// and restore through them, so they must not be reused while a snapshot that
/// mentions them is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a node ID from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Axis a splitter divides space along.
///
/// Vertical splits left/right: the extent along the split axis is the node's
/// width. Horizontal splits top/bottom: the extent is the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The extent of `size` along this orientation's split axis.
    #[inline]
    #[must_use]
    pub const fn extent_of(self, size: Size) -> f32 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }
}

/// Live state of one splitter node, resolved at traversal time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitterState {
    pub orientation: Orientation,
    /// Current sash offset along the split axis, in device units.
    pub sash_position: f32,
    /// Node size along the split axis, in device units.
    pub extent: f32,
}

/// Host-supplied view of a container tree with adjustable splitters.
///
/// `children` returns nodes in document order; the engine's traversals are
/// pre-order recursive descent over it.
pub trait SplitterTree {
    /// Root node of the tree.
    fn root(&self) -> NodeId;

    /// Child nodes of `node`, in document order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Splitter state of `node`, or `None` if it is not a splitter.
    ///
    /// Stale or unknown IDs must return `None`, not panic.
    fn splitter(&self, node: NodeId) -> Option<SplitterState>;

    /// Move the sash of a splitter node. No-op for non-splitters.
    fn set_sash_position(&mut self, node: NodeId, position: f32);

    /// Current pixel size of a node.
    fn node_size(&self, node: NodeId) -> Size;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_follows_orientation() {
        let size = Size::new(300.0, 200.0);
        assert_eq!(Orientation::Vertical.extent_of(size), 300.0);
        assert_eq!(Orientation::Horizontal.extent_of(size), 200.0);
    }

    #[test]
    fn node_id_roundtrip() {
        let id = NodeId::new(42);
        assert_eq!(id.get(), 42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        assert_eq!(serde_json::from_str::<NodeId>(&json).unwrap(), id);
    }
}
