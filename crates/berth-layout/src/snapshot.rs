#![forbid(unsafe_code)]

//! Proportional layout snapshots and their keyed cache.
//!
//! [`SnapshotCache`] makes resize-time restoration O(#splitters) instead of a
//! full relayout: capture normalizes every sash position to a ratio of its
//! splitter's extent, apply multiplies the ratio back against the *live*
//! extent. Keys are host-chosen strings (perspective names, container ids).
//!
//! # Invariants
//!
//! 1. A snapshot is valid iff it holds at least one record; applying an
//!    invalid or missing snapshot returns `false` and mutates nothing.
//! 2. Capturing under an existing key overwrites the previous snapshot.
//! 3. Apply never mutates the cache; records are read-only.
//! 4. Records are matched to live nodes by stored [`NodeId`], so nodes that
//!    vanished (or lost the splitter capability) since capture are skipped
//!    while surviving nodes still restore correctly.
//!
//! # Failure Modes
//!
//! Zero-extent splitters defuse the division at capture (ratio defaults to
//! 0.5) and degrade to position 0 at apply. Neither is an error; the
//! worst-case outcome is a skipped optimization, never a crash.

use berth_core::geometry::Size;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::tree::{NodeId, Orientation, SplitterTree};

/// Ratio used when a splitter's extent is zero at capture time
/// (degenerate/not-yet-laid-out container).
const DEGENERATE_RATIO: f32 = 0.5;

/// One captured splitter position, normalized to its extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitterRecord {
    pub node: NodeId,
    pub orientation: Orientation,
    /// Sash offset ÷ extent along the split axis at capture time, in [0, 1]
    /// for a sane tree. Out-of-range sash positions are recorded as-is.
    pub ratio: f32,
}

/// A captured, ratio-normalized record of a layout's splitter positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Container (root node) size at capture time. Informational; apply math
    /// uses live extents.
    pub container_size: Size,
    /// Records in pre-order traversal order.
    pub records: Vec<SplitterRecord>,
}

impl LayoutSnapshot {
    /// A snapshot is valid iff it recorded at least one splitter.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Tuning for snapshot application.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotConfig {
    /// Minimum sash movement (device units) before a splitter is actually
    /// updated; guards against redundant, jitter-inducing moves during
    /// continuous resize (default: 2.0).
    pub hysteresis: f32,
    /// Minimum pane extent kept on each side of a sash when the splitter is
    /// large enough to afford it. 0.0 disables the clamp (default).
    pub min_pane: f32,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            hysteresis: 2.0,
            min_pane: 0.0,
        }
    }
}

/// String-keyed cache of layout snapshots.
///
/// Unbounded by design: keys are host-chosen perspective names and few.
/// Eviction, if ever needed, is host policy.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCache {
    config: SnapshotConfig,
    entries: FxHashMap<String, LayoutSnapshot>,
}

impl SnapshotCache {
    /// Create an empty cache with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache with the given configuration.
    #[must_use]
    pub fn with_config(config: SnapshotConfig) -> Self {
        Self {
            config,
            entries: FxHashMap::default(),
        }
    }

    /// Capture the tree's current splitter positions under `key`.
    ///
    /// Walks the tree pre-order from the root; every node with the splitter
    /// capability contributes one record. Re-capturing a key overwrites the
    /// previous snapshot. A splitter-free tree stores an invalid (empty)
    /// snapshot whose apply returns `false`.
    pub fn capture(&mut self, key: &str, tree: &dyn SplitterTree) {
        let root = tree.root();
        let mut records = Vec::new();
        collect_splitters(tree, root, &mut records);

        let snapshot = LayoutSnapshot {
            container_size: tree.node_size(root),
            records,
        };
        tracing::debug!(
            key,
            splitters = snapshot.records.len(),
            "snapshot.capture"
        );
        self.entries.insert(key.to_owned(), snapshot);
    }

    /// Reapply the snapshot stored under `key` to the live tree.
    ///
    /// For each record the live splitter is looked up by node ID (vanished
    /// nodes are skipped) and its sash moved to `ratio × live extent`, but
    /// only when the move exceeds the hysteresis band. `target` is the
    /// container size the host is resizing to; it is logged, not used in the
    /// math.
    ///
    /// Returns `false` iff the key is missing or its snapshot is invalid.
    /// `true` includes the case where every record was already within
    /// hysteresis (zero moves).
    pub fn apply(&self, key: &str, tree: &mut dyn SplitterTree, target: Size) -> bool {
        let Some(snapshot) = self.entries.get(key) else {
            tracing::debug!(key, "snapshot.apply.miss");
            return false;
        };
        if !snapshot.is_valid() {
            tracing::debug!(key, "snapshot.apply.invalid");
            return false;
        }

        let mut moved = 0usize;
        for record in &snapshot.records {
            let Some(state) = tree.splitter(record.node) else {
                // Node vanished or lost the capability since capture.
                continue;
            };
            let mut new_pos = record.ratio * state.extent;
            let min_pane = self.config.min_pane;
            if min_pane > 0.0 && state.extent > min_pane * 2.0 {
                new_pos = new_pos.clamp(min_pane, state.extent - min_pane);
            }
            if (state.sash_position - new_pos).abs() > self.config.hysteresis {
                tree.set_sash_position(record.node, new_pos);
                moved += 1;
            }
        }
        tracing::debug!(
            key,
            moved,
            records = snapshot.records.len(),
            target_width = target.width,
            target_height = target.height,
            "snapshot.apply"
        );
        true
    }

    /// Drop all cached entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Remove one entry. Returns whether it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Whether a snapshot is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stored snapshot for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LayoutSnapshot> {
        self.entries.get(key)
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over stored keys (unordered).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Pre-order descent recording every splitter-capable node.
fn collect_splitters(tree: &dyn SplitterTree, node: NodeId, out: &mut Vec<SplitterRecord>) {
    if let Some(state) = tree.splitter(node) {
        let ratio = if state.extent > 0.0 {
            state.sash_position / state.extent
        } else {
            DEGENERATE_RATIO
        };
        out.push(SplitterRecord {
            node,
            orientation: state.orientation,
            ratio,
        });
    }
    for child in tree.children(node) {
        collect_splitters(tree, child, out);
    }
}
