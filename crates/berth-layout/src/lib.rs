#![forbid(unsafe_code)]

//! Layout side of the dock engine: splitter snapshots, resize strategy,
//! batched relayout, and resize profiling.
//!
//! # Role in berth
//! `berth-layout` consumes the host's splitter tree through the
//! [`SplitterTree`] capability trait and coordinates when and how the host
//! recomputes layout. It never paints and never owns widgets; the only calls
//! it makes back into the host are [`SplitterTree::set_sash_position`] and
//! the [`LayoutHost`] relayout/cleanup pair.
//!
//! # Primary responsibilities
//! - **SnapshotCache**: keyed, ratio-normalized capture/restore of splitter
//!   positions so a resize costs O(#splitters) instead of a full relayout.
//! - **ResizeProfiler**: phase-bracketed timing of resize operations with a
//!   bounded history.
//! - **Strategy selection**: pure classification of a size change into
//!   fixed-aspect / elastic / predictive handling.
//! - **BatchLayoutCoordinator**: reentrant suppression scopes and debounced
//!   relayout so bursts of mutations produce exactly one recompute.
//!
//! # Concurrency
//! Everything here assumes host-UI-thread confinement: no locks, no statics,
//! no background timers. Deadlines are plain [`web_time::Instant`] values the
//! host polls.

pub mod batch;
pub mod profile;
pub mod snapshot;
pub mod strategy;
pub mod tree;

pub use batch::{BatchConfig, BatchLayoutCoordinator, LayoutHost, ResizeThrottle};
pub use berth_core::geometry::{Point, Rect, Size};
pub use profile::{ResizeMetrics, ResizePhase, ResizeProfiler};
pub use snapshot::{LayoutSnapshot, SnapshotCache, SnapshotConfig, SplitterRecord};
pub use strategy::{ElasticTracker, ResizePredictor, ResizeStrategy, select};
pub use tree::{NodeId, Orientation, SplitterState, SplitterTree};
