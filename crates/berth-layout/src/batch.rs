#![forbid(unsafe_code)]

//! Batched and debounced relayout coordination.
//!
//! Many state-changing operations (adding/removing panels, bulk state
//! updates) arrive in bursts from a caller doing several mutations in
//! sequence. [`BatchLayoutCoordinator`] wraps those bursts in a reentrant
//! suppression scope: relayout fires exactly once, on the outermost
//! `end_batch`. Outside batches, `request_relayout` arms a debounce deadline
//! the host polls in place of running a one-shot timer of its own.
//!
//! # Invariants
//!
//! 1. The depth counter never underflows; extra `end_batch` calls at depth 0
//!    are no-ops.
//! 2. The zero transition fires `relayout()` then `release_resources()`, in
//!    that order, exactly once.
//! 3. A batch close clears any armed debounce deadline — the deferred pass
//!    it stood for has happened.
//! 4. A `poll` with nothing pending (or before the deadline, or inside a
//!    batch) is a guarded no-op.

use web_time::{Duration, Instant};

/// Host callbacks the coordinator drives.
///
/// The only outward calls the engine makes besides sash moves.
pub trait LayoutHost {
    /// Recompute the container layout and repaint.
    fn relayout(&mut self);

    /// One cleanup pass for resources orphaned by the batch (closed panels,
    /// cached pixmaps).
    fn release_resources(&mut self);
}

/// Tuning for deferred relayout.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Quiet period before a requested relayout fires (default: 8 ms).
    pub debounce: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(8),
        }
    }
}

/// Coalesces nested layout mutations into a single deferred recompute.
#[derive(Debug, Clone, Default)]
pub struct BatchLayoutCoordinator {
    config: BatchConfig,
    depth: u32,
    deadline: Option<Instant>,
}

impl BatchLayoutCoordinator {
    /// Create a coordinator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a coordinator with the given configuration.
    #[must_use]
    pub fn with_config(config: BatchConfig) -> Self {
        Self {
            config,
            depth: 0,
            deadline: None,
        }
    }

    /// Open a suppression scope. Nests.
    pub fn begin_batch(&mut self) {
        self.depth += 1;
    }

    /// Close a suppression scope.
    ///
    /// On the transition to depth 0, fires one `relayout()` and one
    /// `release_resources()` on the host and disarms any pending debounce
    /// deadline. Unbalanced calls at depth 0 are no-ops.
    pub fn end_batch(&mut self, host: &mut dyn LayoutHost) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        if self.depth == 0 {
            self.deadline = None;
            tracing::debug!("batch.close");
            host.relayout();
            host.release_resources();
        }
    }

    /// Whether a batch scope is open.
    #[must_use]
    pub fn in_batch(&self) -> bool {
        self.depth > 0
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Ask for a relayout once events go quiet.
    ///
    /// Outside a batch this arms (or pushes) the debounce deadline. Inside a
    /// batch it is superseded by the batch close, which relayouts anyway.
    pub fn request_relayout(&mut self, now: Instant) {
        if self.depth > 0 {
            return;
        }
        self.deadline = Some(now + self.config.debounce);
    }

    /// Fire the pending debounced relayout if its deadline has passed.
    ///
    /// Returns whether it fired. Timer callbacks with no pending operation
    /// are guarded no-ops, as are polls inside an open batch.
    pub fn poll(&mut self, host: &mut dyn LayoutHost, now: Instant) -> bool {
        if self.depth > 0 {
            return false;
        }
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                tracing::debug!("batch.debounce_fire");
                host.relayout();
                true
            }
            _ => false,
        }
    }

    /// The instant the host's timer should wake for, if a relayout is
    /// pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Minimum-interval gate for live-resize event floods.
///
/// Hosts process at most one resize notification per interval (default
/// 75 ms) and let the debounced relayout settle the final geometry; skipped
/// events are counted so the host can tell how much it is dropping.
#[derive(Debug, Clone)]
pub struct ResizeThrottle {
    interval: Duration,
    last_accepted: Option<Instant>,
    skipped: u32,
}

impl Default for ResizeThrottle {
    fn default() -> Self {
        Self::new(Duration::from_millis(75))
    }
}

impl ResizeThrottle {
    /// Create a throttle with the given minimum interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_accepted: None,
            skipped: 0,
        }
    }

    /// Whether an event arriving at `now` should be processed.
    ///
    /// The first event is always accepted; afterwards one per interval.
    /// Skipped events increment the pending count.
    pub fn should_process(&mut self, now: Instant) -> bool {
        let accept = match self.last_accepted {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        };
        if accept {
            self.last_accepted = Some(now);
            self.skipped = 0;
        } else {
            self.skipped += 1;
        }
        accept
    }

    /// Events skipped since the last accepted one.
    #[must_use]
    pub fn pending(&self) -> u32 {
        self.skipped
    }

    /// Forget all throttle state.
    pub fn reset(&mut self) {
        self.last_accepted = None;
        self.skipped = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_5: Duration = Duration::from_millis(5);
    const MS_10: Duration = Duration::from_millis(10);
    const MS_75: Duration = Duration::from_millis(75);

    /// Counts host callbacks.
    #[derive(Debug, Default)]
    struct CountingHost {
        relayouts: u32,
        cleanups: u32,
    }

    impl LayoutHost for CountingHost {
        fn relayout(&mut self) {
            self.relayouts += 1;
        }

        fn release_resources(&mut self) {
            self.cleanups += 1;
        }
    }

    #[test]
    fn nested_batches_fire_once() {
        let mut coordinator = BatchLayoutCoordinator::new();
        let mut host = CountingHost::default();

        coordinator.begin_batch();
        coordinator.begin_batch();
        coordinator.end_batch(&mut host);
        assert_eq!(host.relayouts, 0);
        assert!(coordinator.in_batch());

        coordinator.end_batch(&mut host);
        assert_eq!(host.relayouts, 1);
        assert_eq!(host.cleanups, 1);
        assert!(!coordinator.in_batch());
    }

    #[test]
    fn underflow_is_noop() {
        let mut coordinator = BatchLayoutCoordinator::new();
        let mut host = CountingHost::default();

        coordinator.end_batch(&mut host);
        assert_eq!(host.relayouts, 0);
        assert_eq!(coordinator.depth(), 0);
    }

    #[test]
    fn relayout_precedes_cleanup() {
        struct OrderHost {
            calls: Vec<&'static str>,
        }
        impl LayoutHost for OrderHost {
            fn relayout(&mut self) {
                self.calls.push("relayout");
            }
            fn release_resources(&mut self) {
                self.calls.push("cleanup");
            }
        }

        let mut coordinator = BatchLayoutCoordinator::new();
        let mut host = OrderHost { calls: Vec::new() };
        coordinator.begin_batch();
        coordinator.end_batch(&mut host);
        assert_eq!(host.calls, vec!["relayout", "cleanup"]);
    }

    #[test]
    fn debounce_fires_once_after_deadline() {
        let mut coordinator = BatchLayoutCoordinator::new();
        let mut host = CountingHost::default();
        let t = Instant::now();

        coordinator.request_relayout(t);
        assert_eq!(coordinator.next_deadline(), Some(t + Duration::from_millis(8)));

        // Before the deadline: no-op.
        assert!(!coordinator.poll(&mut host, t + MS_5));
        assert_eq!(host.relayouts, 0);

        assert!(coordinator.poll(&mut host, t + MS_10));
        assert_eq!(host.relayouts, 1);

        // Disarmed: a second poll does nothing.
        assert!(!coordinator.poll(&mut host, t + MS_75));
        assert_eq!(host.relayouts, 1);
        assert!(coordinator.next_deadline().is_none());
    }

    #[test]
    fn repeated_requests_push_the_deadline() {
        let mut coordinator = BatchLayoutCoordinator::new();
        let mut host = CountingHost::default();
        let t = Instant::now();

        coordinator.request_relayout(t);
        coordinator.request_relayout(t + MS_5);

        // The original deadline has passed but the pushed one has not.
        assert!(!coordinator.poll(&mut host, t + Duration::from_millis(9)));
        assert!(coordinator.poll(&mut host, t + Duration::from_millis(13)));
        assert_eq!(host.relayouts, 1);
    }

    #[test]
    fn batch_close_supersedes_pending_debounce() {
        let mut coordinator = BatchLayoutCoordinator::new();
        let mut host = CountingHost::default();
        let t = Instant::now();

        coordinator.request_relayout(t);
        coordinator.begin_batch();
        coordinator.end_batch(&mut host);
        assert_eq!(host.relayouts, 1);

        // The deferred pass already happened at batch close.
        assert!(!coordinator.poll(&mut host, t + MS_75));
        assert_eq!(host.relayouts, 1);
    }

    #[test]
    fn requests_inside_a_batch_are_superseded() {
        let mut coordinator = BatchLayoutCoordinator::new();
        let mut host = CountingHost::default();
        let t = Instant::now();

        coordinator.begin_batch();
        coordinator.request_relayout(t);
        assert!(coordinator.next_deadline().is_none());
        assert!(!coordinator.poll(&mut host, t + MS_75));

        coordinator.end_batch(&mut host);
        assert_eq!(host.relayouts, 1);
    }

    #[test]
    fn custom_debounce() {
        let mut coordinator = BatchLayoutCoordinator::with_config(BatchConfig {
            debounce: Duration::from_millis(50),
        });
        let mut host = CountingHost::default();
        let t = Instant::now();

        coordinator.request_relayout(t);
        assert!(!coordinator.poll(&mut host, t + MS_10));
        assert!(coordinator.poll(&mut host, t + MS_75));
    }

    // --- ResizeThrottle ---

    #[test]
    fn throttle_accepts_first_then_gates() {
        let mut throttle = ResizeThrottle::default();
        let t = Instant::now();

        assert!(throttle.should_process(t));
        assert!(!throttle.should_process(t + MS_10));
        assert!(!throttle.should_process(t + Duration::from_millis(74)));
        assert_eq!(throttle.pending(), 2);

        assert!(throttle.should_process(t + MS_75));
        assert_eq!(throttle.pending(), 0);
    }

    #[test]
    fn throttle_reset_accepts_immediately() {
        let mut throttle = ResizeThrottle::default();
        let t = Instant::now();

        assert!(throttle.should_process(t));
        assert!(!throttle.should_process(t + MS_5));
        throttle.reset();
        assert!(throttle.should_process(t + MS_10));
        assert_eq!(throttle.pending(), 0);
    }

    #[test]
    fn throttle_custom_interval() {
        let mut throttle = ResizeThrottle::new(MS_10);
        let t = Instant::now();

        assert!(throttle.should_process(t));
        assert!(!throttle.should_process(t + MS_5));
        assert!(throttle.should_process(t + MS_10));
    }
}
