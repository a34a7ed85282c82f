#![forbid(unsafe_code)]

//! Resize-strategy classification and the helpers strategy handlers build on.
//!
//! [`select`] is a pure function of old/new container size: uniform scaling
//! gets [`ResizeStrategy::FixedAspect`] (scale child rects directly), large
//! non-uniform changes get [`ResizeStrategy::Predictive`] (extrapolate the
//! target size and precompute for it), everything else gets
//! [`ResizeStrategy::Elastic`] (interpolate toward the target over several
//! frames).
//!
//! The selector performs no layout itself; execution is delegated to
//! strategy-specific handlers the layout owner supplies. [`ElasticTracker`]
//! and [`ResizePredictor`] are the building blocks for two of those handlers.

use std::collections::VecDeque;

use berth_core::geometry::{Rect, Size};
use web_time::{Duration, Instant};

/// Aspect-ratio delta below which a resize counts as uniform.
pub const UNIFORM_ASPECT_DELTA: f32 = 0.1;

/// Per-axis scale deviation from 1.0 beyond which a resize counts as large.
pub const LARGE_CHANGE_RATIO: f32 = 0.3;

/// How a resize should be optimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeStrategy {
    /// No strategy chosen yet. Never produced by [`select`].
    #[default]
    None,
    /// Scale child rects by the size ratio directly; skip full recompute.
    FixedAspect,
    /// Interpolate toward the target size over several frames.
    Elastic,
    /// Extrapolate a settle size from resize velocity and precompute for it.
    Predictive,
    /// Tree too complex; defer to a full recompute. Never produced by
    /// [`select`], available as an explicit host default.
    DeferComplex,
}

/// Classify a resize from `old` to `new`.
///
/// Old extents ≤ 0 are defused to a ratio of 1 before division, so a resize
/// from a degenerate size classifies as a large change rather than producing
/// NaN comparisons.
#[must_use]
pub fn select(old: Size, new: Size) -> ResizeStrategy {
    let width_ratio = axis_ratio(new.width, old.width);
    let height_ratio = axis_ratio(new.height, old.height);
    let aspect_delta = (width_ratio - height_ratio).abs();

    if aspect_delta < UNIFORM_ASPECT_DELTA {
        ResizeStrategy::FixedAspect
    } else if (width_ratio - 1.0).abs() > LARGE_CHANGE_RATIO
        || (height_ratio - 1.0).abs() > LARGE_CHANGE_RATIO
    {
        ResizeStrategy::Predictive
    } else {
        ResizeStrategy::Elastic
    }
}

fn axis_ratio(new: f32, old: f32) -> f32 {
    if old > 0.0 { new / old } else { 1.0 }
}

/// Scale a child rect by per-axis ratios: the FixedAspect primitive.
#[must_use]
pub fn scale_rect(rect: Rect, width_ratio: f32, height_ratio: f32) -> Rect {
    Rect::new(
        rect.x * width_ratio,
        rect.y * height_ratio,
        rect.width * width_ratio,
        rect.height * height_ratio,
    )
}

/// Fraction of the remaining distance an [`ElasticTracker`] covers per step.
const ELASTIC_STEP_FRACTION: f32 = 0.3;

/// Distance (device units) within which the tracker snaps to its target.
const ELASTIC_SNAP_DISTANCE: f32 = 1.0;

/// Frame-by-frame interpolation toward a target size.
///
/// Each [`step`](ElasticTracker::step) moves a fixed fraction of the
/// remaining distance, snapping exactly onto the target once within one unit
/// on both axes.
#[derive(Debug, Clone, Copy)]
pub struct ElasticTracker {
    current: Size,
    target: Size,
}

impl ElasticTracker {
    /// Start at `initial` with the target equal to it (already settled).
    #[must_use]
    pub fn new(initial: Size) -> Self {
        Self {
            current: initial,
            target: initial,
        }
    }

    /// Point the tracker at a new target size.
    pub fn retarget(&mut self, target: Size) {
        self.target = target;
    }

    /// Advance one frame, returning the new intermediate size.
    pub fn step(&mut self) -> Size {
        self.current = Size::new(
            step_axis(self.current.width, self.target.width),
            step_axis(self.current.height, self.target.height),
        );
        self.current
    }

    /// Whether the current size has reached the target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Current intermediate size.
    #[must_use]
    pub fn current(&self) -> Size {
        self.current
    }

    /// Target size.
    #[must_use]
    pub fn target(&self) -> Size {
        self.target
    }
}

fn step_axis(current: f32, target: f32) -> f32 {
    let remaining = target - current;
    if remaining.abs() <= ELASTIC_SNAP_DISTANCE {
        target
    } else {
        current + remaining * ELASTIC_STEP_FRACTION
    }
}

/// Number of timestamped samples the predictor retains.
const PREDICTOR_CAP: usize = 8;

/// Velocity extrapolation for the Predictive strategy.
///
/// Feed it the sizes a live resize passes through; `predict` extrapolates
/// where the resize will settle so layout can be precomputed for that size
/// before the pointer stops.
#[derive(Debug, Clone, Default)]
pub struct ResizePredictor {
    samples: VecDeque<(Size, Instant)>,
}

impl ResizePredictor {
    /// Create an empty predictor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed size. Oldest samples roll off past the ring
    /// capacity.
    pub fn observe(&mut self, size: Size, now: Instant) {
        if self.samples.len() == PREDICTOR_CAP {
            self.samples.pop_front();
        }
        self.samples.push_back((size, now));
    }

    /// Extrapolate the size `horizon` from the newest sample, using the
    /// oldest→newest velocity.
    ///
    /// Returns `None` with fewer than 2 samples or a zero time span.
    #[must_use]
    pub fn predict(&self, horizon: Duration) -> Option<Size> {
        let (oldest_size, oldest_at) = *self.samples.front()?;
        let (newest_size, newest_at) = *self.samples.back()?;
        let span = newest_at.saturating_duration_since(oldest_at);
        if self.samples.len() < 2 || span.is_zero() {
            return None;
        }

        let scale = horizon.as_secs_f32() / span.as_secs_f32();
        Some(Size::new(
            newest_size.width + (newest_size.width - oldest_size.width) * scale,
            newest_size.height + (newest_size.height - oldest_size.height) * scale,
        ))
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples (resize settled; the next one starts fresh).
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
