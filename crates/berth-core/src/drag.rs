#![forbid(unsafe_code)]

//! Drag gesture detection: disambiguates drags from clicks.
//!
//! [`DragDetector`] is a small state machine over raw pointer positions:
//!
//! ```text
//! Idle --begin--> Pending --update past threshold--> Dragging
//!   ^                |                                   |
//!   +---- finish/cancel ----+---- finish/cancel ---------+
//! ```
//!
//! A gesture confirms when the pointer moves more than the threshold on
//! *either* axis (per-axis max, not Euclidean distance). The threshold keeps
//! accidental micro-movements during a click from being read as a rearrange
//! gesture.
//!
//! # Invariants
//!
//! 1. Confirmation is one-way within a gesture: once Dragging, only
//!    `finish`/`cancel` end it.
//! 2. The threshold comparison is strictly greater-than: movement exactly at
//!    the threshold does not confirm.
//! 3. `finish` and `cancel` always return the detector to Idle with no panel.
//! 4. Starting a new gesture while one is active silently replaces it.
//!
//! # Failure Modes
//!
//! `update`/`finish` without a prior `begin` are no-ops (`finish` returns
//! `None`).

use crate::geometry::Point;

/// Threshold configuration for drag detection.
#[derive(Debug, Clone, Copy)]
pub struct DragConfig {
    /// Per-axis movement (device units) that must be exceeded before a
    /// gesture confirms as a drag (default: 10.0).
    pub threshold: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { threshold: 10.0 }
    }
}

/// Observable phase of the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No gesture in flight.
    #[default]
    Idle,
    /// Pointer is down but movement has not exceeded the threshold.
    Pending,
    /// The gesture is a confirmed drag.
    Dragging,
}

/// Result of a finished gesture, returned once by [`DragDetector::finish`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOutcome {
    /// Panel the gesture started on.
    pub panel: usize,
    /// Press origin.
    pub origin: Point,
    /// Pointer position at release.
    pub end: Point,
    /// Whether the gesture confirmed as a drag (false = it was a click).
    pub confirmed: bool,
}

/// Tracks one candidate or active drag gesture.
#[derive(Debug, Clone, Default)]
pub struct DragDetector {
    config: DragConfig,
    phase: DragPhase,
    panel: Option<usize>,
    origin: Point,
    current: Point,
}

impl DragDetector {
    /// Create a detector with the given configuration.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start a candidate gesture on `panel` at the press origin.
    ///
    /// Any gesture already in flight is discarded.
    pub fn begin(&mut self, panel: usize, position: Point) {
        self.phase = DragPhase::Pending;
        self.panel = Some(panel);
        self.origin = position;
        self.current = position;
    }

    /// Feed a pointer movement.
    ///
    /// Returns `true` exactly on the Pending → Dragging transition. In
    /// Dragging only the current position is updated; in Idle this is a
    /// no-op.
    pub fn update(&mut self, position: Point) -> bool {
        match self.phase {
            DragPhase::Idle => false,
            DragPhase::Pending => {
                self.current = position;
                let (dx, dy) = position.delta(self.origin);
                if dx.abs() > self.config.threshold || dy.abs() > self.config.threshold {
                    self.phase = DragPhase::Dragging;
                    true
                } else {
                    false
                }
            }
            DragPhase::Dragging => {
                self.current = position;
                false
            }
        }
    }

    /// End the gesture at `position`, returning its outcome.
    ///
    /// The detector self-resets to Idle; the returned value is the only
    /// record of the finished gesture. Returns `None` when no gesture was in
    /// flight.
    pub fn finish(&mut self, position: Point) -> Option<DragOutcome> {
        let panel = self.panel?;
        let outcome = DragOutcome {
            panel,
            origin: self.origin,
            end: position,
            confirmed: self.phase == DragPhase::Dragging,
        };
        self.reset();
        Some(outcome)
    }

    /// Discard any gesture in flight (e.g. on pointer-capture loss).
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether a confirmed drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging && self.panel.is_some()
    }

    /// Whether a gesture (pending or confirmed) holds a panel.
    #[inline]
    #[must_use]
    pub fn has_panel(&self) -> bool {
        self.panel.is_some()
    }

    /// Panel of the gesture in flight.
    #[inline]
    #[must_use]
    pub fn panel(&self) -> Option<usize> {
        self.panel
    }

    /// Press origin of the gesture in flight.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        self.panel.map(|_| self.origin)
    }

    /// Latest pointer position of the gesture in flight.
    #[must_use]
    pub fn current(&self) -> Option<Point> {
        self.panel.map(|_| self.current)
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.panel = None;
        self.origin = Point::ZERO;
        self.current = Point::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn small_movement_stays_pending() {
        let mut det = DragDetector::default();
        det.begin(3, p(0.0, 0.0));

        assert!(!det.update(p(5.0, 5.0)));
        assert_eq!(det.phase(), DragPhase::Pending);
        assert!(!det.is_dragging());
        assert_eq!(det.panel(), Some(3));
    }

    #[test]
    fn confirms_past_threshold_on_one_axis() {
        let mut det = DragDetector::default();
        det.begin(3, p(0.0, 0.0));
        det.update(p(5.0, 5.0));

        assert!(det.update(p(11.0, 0.0)));
        assert!(det.is_dragging());
        assert_eq!(det.panel(), Some(3));
    }

    #[test]
    fn threshold_exactly_met_does_not_confirm() {
        let mut det = DragDetector::default();
        det.begin(0, p(100.0, 100.0));

        assert!(!det.update(p(110.0, 100.0)));
        assert_eq!(det.phase(), DragPhase::Pending);
    }

    #[test]
    fn diagonal_below_threshold_does_not_confirm() {
        let mut det = DragDetector::default();
        det.begin(0, p(0.0, 0.0));

        // Euclidean distance ≈ 14 but neither axis exceeds 10.
        assert!(!det.update(p(10.0, 10.0)));
        assert!(!det.is_dragging());
    }

    #[test]
    fn confirm_fires_once() {
        let mut det = DragDetector::default();
        det.begin(1, p(0.0, 0.0));

        assert!(det.update(p(20.0, 0.0)));
        assert!(!det.update(p(30.0, 0.0)));
        assert_eq!(det.current(), Some(p(30.0, 0.0)));
    }

    #[test]
    fn finish_returns_outcome_and_resets() {
        let mut det = DragDetector::default();
        det.begin(2, p(0.0, 0.0));
        det.update(p(15.0, 3.0));

        let outcome = det.finish(p(40.0, 8.0)).unwrap();
        assert_eq!(outcome.panel, 2);
        assert_eq!(outcome.origin, p(0.0, 0.0));
        assert_eq!(outcome.end, p(40.0, 8.0));
        assert!(outcome.confirmed);

        assert_eq!(det.phase(), DragPhase::Idle);
        assert!(!det.has_panel());
        // The outcome is one-shot: a second finish has nothing to report.
        assert!(det.finish(p(40.0, 8.0)).is_none());
    }

    #[test]
    fn unconfirmed_finish_is_a_click() {
        let mut det = DragDetector::default();
        det.begin(5, p(10.0, 10.0));
        det.update(p(12.0, 12.0));

        let outcome = det.finish(p(12.0, 12.0)).unwrap();
        assert!(!outcome.confirmed);
    }

    #[test]
    fn finish_without_begin_is_none() {
        let mut det = DragDetector::default();
        assert!(det.finish(p(0.0, 0.0)).is_none());
    }

    #[test]
    fn update_without_begin_is_noop() {
        let mut det = DragDetector::default();
        assert!(!det.update(p(100.0, 100.0)));
        assert_eq!(det.phase(), DragPhase::Idle);
    }

    #[test]
    fn cancel_discards_gesture() {
        let mut det = DragDetector::default();
        det.begin(7, p(0.0, 0.0));
        det.update(p(20.0, 0.0));
        assert!(det.is_dragging());

        det.cancel();
        assert_eq!(det.phase(), DragPhase::Idle);
        assert!(det.panel().is_none());
        assert!(det.finish(p(20.0, 0.0)).is_none());
    }

    #[test]
    fn begin_replaces_stale_gesture() {
        let mut det = DragDetector::default();
        det.begin(1, p(0.0, 0.0));
        det.update(p(50.0, 0.0));
        assert!(det.is_dragging());

        det.begin(2, p(100.0, 100.0));
        assert_eq!(det.phase(), DragPhase::Pending);
        assert_eq!(det.panel(), Some(2));
        assert_eq!(det.origin(), Some(p(100.0, 100.0)));
    }

    #[test]
    fn custom_threshold() {
        let mut det = DragDetector::new(DragConfig { threshold: 3.0 });
        det.begin(0, p(0.0, 0.0));
        assert!(!det.update(p(3.0, 0.0)));
        assert!(det.update(p(3.5, 0.0)));
    }
}
