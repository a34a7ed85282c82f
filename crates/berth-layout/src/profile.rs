#![forbid(unsafe_code)]

//! Resize performance instrumentation.
//!
//! [`ResizeProfiler`] brackets each resize operation (`start_resize` /
//! `end_resize`) and accumulates per-phase durations inside the bracket.
//! Completed records land in a bounded FIFO history from which aggregate
//! statistics are derived on demand.
//!
//! All time is passed in explicitly as [`Instant`] so tests are
//! deterministic; the profiler never samples a clock itself.
//!
//! # Invariants
//!
//! 1. History never exceeds [`HISTORY_CAP`] records; oldest are evicted
//!    first.
//! 2. A record is only visible in history after `end_resize`.
//! 3. Overlapping brackets collapse into the first: `start_resize` while a
//!    bracket is open is a no-op (nested/overlapping resize notifications
//!    from the host).
//!
//! # Failure Modes
//!
//! `end_resize` without a matching start, phase calls outside a bracket, and
//! `end_phase` against a different open phase are all state-guarded no-ops.

use std::collections::VecDeque;
use std::fmt::Write as _;

use berth_core::geometry::Size;
use web_time::{Duration, Instant};

/// Maximum retained resize records.
pub const HISTORY_CAP: usize = 100;

/// Total duration beyond which a completed resize emits a diagnostic.
pub const SLOW_RESIZE: Duration = Duration::from_millis(50);

/// Sub-operations of a resize that are timed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePhase {
    LayoutCalc,
    SplitterAdjust,
    Paint,
}

/// One record per resize operation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeMetrics {
    pub total: Duration,
    pub layout_calc: Duration,
    pub splitter_adjust: Duration,
    pub paint: Duration,
    pub layout_updates: u32,
    pub paint_events: u32,
    pub start_size: Size,
    pub end_size: Size,
}

/// Bracket state while a resize is in progress.
#[derive(Debug, Clone, Copy)]
struct OpenBracket {
    started: Instant,
    metrics: ResizeMetrics,
    open_phase: Option<(ResizePhase, Instant)>,
}

/// Phase-bracketed resize profiler with bounded history.
#[derive(Debug, Clone)]
pub struct ResizeProfiler {
    enabled: bool,
    bracket: Option<OpenBracket>,
    history: VecDeque<ResizeMetrics>,
}

impl Default for ResizeProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeProfiler {
    /// Create an enabled profiler with empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            bracket: None,
            history: VecDeque::with_capacity(HISTORY_CAP),
        }
    }

    /// Enable or disable instrumentation. A disabled profiler no-ops every
    /// bracket and phase call; history is kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether instrumentation is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Begin a resize bracket. No-op if one is already open or the profiler
    /// is disabled.
    pub fn start_resize(&mut self, size: Size, now: Instant) {
        if !self.enabled || self.bracket.is_some() {
            return;
        }
        self.bracket = Some(OpenBracket {
            started: now,
            metrics: ResizeMetrics {
                start_size: size,
                ..ResizeMetrics::default()
            },
            open_phase: None,
        });
    }

    /// Close the resize bracket, recording the completed metrics.
    ///
    /// No-op without a matching `start_resize`. Emits a diagnostic event when
    /// the total duration exceeds [`SLOW_RESIZE`] (observability, not an
    /// error).
    pub fn end_resize(&mut self, size: Size, now: Instant) {
        if !self.enabled {
            return;
        }
        let Some(bracket) = self.bracket.take() else {
            return;
        };
        let mut metrics = bracket.metrics;
        metrics.total = now.saturating_duration_since(bracket.started);
        metrics.end_size = size;

        if metrics.total > SLOW_RESIZE {
            tracing::debug!(
                total_ms = metrics.total.as_millis() as u64,
                layout_ms = metrics.layout_calc.as_millis() as u64,
                paint_ms = metrics.paint.as_millis() as u64,
                "profile.slow_resize"
            );
        }

        if self.history.len() == HISTORY_CAP {
            self.history.pop_front();
        }
        self.history.push_back(metrics);
    }

    /// Begin timing a phase inside the open bracket.
    ///
    /// Opening a phase while another is open discards the earlier one. No-op
    /// outside a bracket.
    pub fn begin_phase(&mut self, phase: ResizePhase, now: Instant) {
        if !self.enabled {
            return;
        }
        if let Some(bracket) = self.bracket.as_mut() {
            bracket.open_phase = Some((phase, now));
        }
    }

    /// Close a phase, accumulating its duration into the bracket.
    ///
    /// No-op if `phase` is not the currently open phase. Closing
    /// `LayoutCalc` increments the layout-update count; closing `Paint` the
    /// paint-event count.
    pub fn end_phase(&mut self, phase: ResizePhase, now: Instant) {
        if !self.enabled {
            return;
        }
        let Some(bracket) = self.bracket.as_mut() else {
            return;
        };
        let Some((open, started)) = bracket.open_phase else {
            return;
        };
        if open != phase {
            return;
        }
        bracket.open_phase = None;

        let elapsed = now.saturating_duration_since(started);
        let metrics = &mut bracket.metrics;
        match phase {
            ResizePhase::LayoutCalc => {
                metrics.layout_calc += elapsed;
                metrics.layout_updates += 1;
            }
            ResizePhase::SplitterAdjust => metrics.splitter_adjust += elapsed,
            ResizePhase::Paint => {
                metrics.paint += elapsed;
                metrics.paint_events += 1;
            }
        }
    }

    /// Field-wise mean over the most recent `min(last_n, len)` records.
    ///
    /// Returns all-zero metrics when history is empty or `last_n` is 0.
    /// Counts use integer division; sizes are left zero.
    #[must_use]
    pub fn average_metrics(&self, last_n: usize) -> ResizeMetrics {
        let mut avg = ResizeMetrics::default();
        let count = last_n.min(self.history.len());
        if count == 0 {
            return avg;
        }

        for metrics in self.history.iter().rev().take(count) {
            avg.total += metrics.total;
            avg.layout_calc += metrics.layout_calc;
            avg.splitter_adjust += metrics.splitter_adjust;
            avg.paint += metrics.paint;
            avg.layout_updates += metrics.layout_updates;
            avg.paint_events += metrics.paint_events;
        }

        let n = count as u32;
        avg.total /= n;
        avg.layout_calc /= n;
        avg.splitter_adjust /= n;
        avg.paint /= n;
        avg.layout_updates /= n;
        avg.paint_events /= n;
        avg
    }

    /// Human-readable performance report for logging.
    ///
    /// Not meant for machine parsing.
    #[must_use]
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        let _ = writeln!(report, "=== Dock Resize Performance Report ===");
        let _ = writeln!(
            report,
            "History size: {} resize operations\n",
            self.history.len()
        );

        if self.history.is_empty() {
            return report;
        }

        let avg = self.average_metrics(10);
        let _ = writeln!(report, "Average metrics (last 10 resizes):");
        let _ = writeln!(report, "  Total duration: {}ms", avg.total.as_millis());
        let _ = writeln!(
            report,
            "  Layout calculation: {}ms",
            avg.layout_calc.as_millis()
        );
        let _ = writeln!(
            report,
            "  Splitter adjustment: {}ms",
            avg.splitter_adjust.as_millis()
        );
        let _ = writeln!(report, "  Paint time: {}ms", avg.paint.as_millis());
        let _ = writeln!(
            report,
            "  Layout updates per resize: {}",
            avg.layout_updates
        );
        let _ = writeln!(
            report,
            "  Paint events per resize: {}\n",
            avg.paint_events
        );

        if let Some(slowest) = self.history.iter().max_by_key(|m| m.total) {
            let _ = writeln!(report, "Slowest resize:");
            let _ = writeln!(report, "  Duration: {}ms", slowest.total.as_millis());
            let _ = writeln!(
                report,
                "  Size change: {}x{} -> {}x{}",
                slowest.start_size.width,
                slowest.start_size.height,
                slowest.end_size.width,
                slowest.end_size.height
            );
        }

        report
    }

    /// Number of completed records.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Most recently completed record.
    #[must_use]
    pub fn last(&self) -> Option<&ResizeMetrics> {
        self.history.back()
    }

    /// Whether a bracket is currently open.
    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.bracket.is_some()
    }

    /// Drop all history. Does not touch an open bracket.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}
