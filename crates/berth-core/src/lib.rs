#![forbid(unsafe_code)]

//! Core: interaction state and gesture detection for dockable panels.
//!
//! # Role in berth
//! `berth-core` is the input-facing half of the engine. It owns the geometry
//! primitives, the per-panel interaction state registry, and the
//! drag-vs-click gesture detector. It knows nothing about splitter trees or
//! layout; that lives in `berth-layout`.
//!
//! # Primary responsibilities
//! - **InteractionTracker**: single source of truth for which panel is
//!   hovered/selected/dragged/focused, and which panels are locked.
//! - **DragDetector**: threshold-based disambiguation of drag gestures from
//!   clicks over raw pointer positions.
//! - **Geometry**: `Point`/`Size`/`Rect` in `f32` device units.
//!
//! # How it fits in the system
//! The host windowing layer pushes raw pointer positions and state
//! transitions into this crate and reads the resulting state back when
//! painting or starting a rearrange. `berth-layout` consumes the same
//! geometry types for snapshot and resize work.

pub mod drag;
pub mod geometry;
pub mod interaction;

pub use drag::{DragConfig, DragDetector, DragOutcome, DragPhase};
pub use geometry::{Point, Rect, Size};
pub use interaction::{ActiveState, InteractionKind, InteractionTracker};
