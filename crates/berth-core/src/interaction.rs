#![forbid(unsafe_code)]

//! Per-panel interaction state registry.
//!
//! [`InteractionTracker`] is the single source of truth for "which panel is
//! currently hovered/selected/dragged/focused" and "which panels are locked."
//! Panel indices are caller-owned: the tracker never validates existence,
//! so stale indices are accepted and simply never match anything live.
//!
//! # Invariants
//!
//! 1. At most one panel is active per singular kind (Hover, Selection, Drag,
//!    Focus) at all times; setting a new active panel implicitly deactivates
//!    the previous holder.
//! 2. Lock is a proper set: any number of panels may be locked, membership
//!    test is O(1), and lock changes never affect the singular kinds.
//! 3. `clear_all()` leaves the tracker indistinguishable from freshly
//!    constructed.
//! 4. Deactivating a panel that is not the current holder is a no-op.
//!
//! # Failure Modes
//!
//! None — every operation is a state-guarded no-op on misuse.

use rustc_hash::FxHashSet;

use crate::geometry::Point;

/// The kinds of per-panel interaction state the tracker holds.
///
/// Hover, Selection, Drag, and Focus are *singular*: at most one panel is
/// active at a time, last writer wins. Lock is a *set*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Hover,
    Selection,
    Drag,
    Focus,
    Lock,
}

impl InteractionKind {
    /// The singular kinds, in declaration order.
    pub const SINGULAR: [Self; 4] = [Self::Hover, Self::Selection, Self::Drag, Self::Focus];
}

/// One currently-active entry, as reported by
/// [`InteractionTracker::snapshot_active`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveState {
    pub kind: InteractionKind,
    pub panel: usize,
    /// Pointer position payload; populated only for [`InteractionKind::Drag`].
    pub position: Option<Point>,
}

/// Registry of per-panel interaction state.
#[derive(Debug, Clone, Default)]
pub struct InteractionTracker {
    hover: Option<usize>,
    selection: Option<usize>,
    drag: Option<usize>,
    focus: Option<usize>,
    /// Pointer position for the active drag entry, if any.
    drag_position: Option<Point>,
    locked: FxHashSet<usize>,
}

impl InteractionTracker {
    /// Create an empty tracker (no active panels, nothing locked).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear one panel's state for a kind.
    ///
    /// For singular kinds, `active = true` makes `panel` the sole holder
    /// (deactivating any previous one — no separate notification is emitted,
    /// callers diff against [`active_index`](Self::active_index) if they need
    /// a "changed from" signal). `active = false` clears the kind only if
    /// `panel` is the current holder. For Lock this is a set insert/remove.
    ///
    /// Returns whether the call changed anything.
    pub fn set_state(&mut self, kind: InteractionKind, panel: usize, active: bool) -> bool {
        if kind == InteractionKind::Lock {
            return if active {
                self.locked.insert(panel)
            } else {
                self.locked.remove(&panel)
            };
        }

        let slot = self.slot_mut(kind);
        let changed = if active {
            let old = *slot;
            *slot = Some(panel);
            old != Some(panel)
        } else if *slot == Some(panel) {
            *slot = None;
            true
        } else {
            // Deactivating a non-holder: idempotent no-op.
            false
        };

        // A stale position payload never outlives the drag entry it described.
        if changed && kind == InteractionKind::Drag {
            self.drag_position = None;
        }
        #[cfg(feature = "tracing")]
        if changed {
            Self::log_switch(kind, panel, active);
        }
        changed
    }

    /// Update the drag pointer position payload.
    ///
    /// No-op unless a drag entry is active.
    pub fn set_drag_position(&mut self, position: Point) {
        if self.drag.is_some() {
            self.drag_position = Some(position);
        }
    }

    /// Whether `panel` holds the given kind (singular) or is locked (Lock).
    #[must_use]
    pub fn query(&self, kind: InteractionKind, panel: usize) -> bool {
        match kind {
            InteractionKind::Lock => self.locked.contains(&panel),
            _ => self.slot(kind) == Some(panel),
        }
    }

    /// Current holder of a singular kind; `None` for Lock.
    #[must_use]
    pub fn active_index(&self, kind: InteractionKind) -> Option<usize> {
        match kind {
            InteractionKind::Lock => None,
            _ => self.slot(kind),
        }
    }

    /// Pointer position of the active drag entry, if any.
    #[must_use]
    pub fn drag_position(&self) -> Option<Point> {
        self.drag_position
    }

    /// Number of locked panels.
    #[must_use]
    pub fn locked_count(&self) -> usize {
        self.locked.len()
    }

    /// Whether nothing at all is active or locked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hover.is_none()
            && self.selection.is_none()
            && self.drag.is_none()
            && self.focus.is_none()
            && self.locked.is_empty()
    }

    /// Reset every kind to unset/empty. Used on container teardown.
    pub fn clear_all(&mut self) {
        self.hover = None;
        self.selection = None;
        self.drag = None;
        self.focus = None;
        self.drag_position = None;
        self.locked.clear();
    }

    /// Snapshot every currently-active entry for debugging/sync.
    ///
    /// Order is deterministic: singular kinds in declaration order, then
    /// locked panels in ascending index order. Lock contributes one entry per
    /// locked panel.
    #[must_use]
    pub fn snapshot_active(&self) -> Vec<ActiveState> {
        let mut out = Vec::with_capacity(InteractionKind::SINGULAR.len() + self.locked.len());
        for kind in InteractionKind::SINGULAR {
            if let Some(panel) = self.slot(kind) {
                out.push(ActiveState {
                    kind,
                    panel,
                    position: (kind == InteractionKind::Drag)
                        .then_some(self.drag_position)
                        .flatten(),
                });
            }
        }
        let mut locked: Vec<usize> = self.locked.iter().copied().collect();
        locked.sort_unstable();
        out.extend(locked.into_iter().map(|panel| ActiveState {
            kind: InteractionKind::Lock,
            panel,
            position: None,
        }));
        out
    }

    fn slot(&self, kind: InteractionKind) -> Option<usize> {
        match kind {
            InteractionKind::Hover => self.hover,
            InteractionKind::Selection => self.selection,
            InteractionKind::Drag => self.drag,
            InteractionKind::Focus => self.focus,
            InteractionKind::Lock => None,
        }
    }

    fn slot_mut(&mut self, kind: InteractionKind) -> &mut Option<usize> {
        match kind {
            InteractionKind::Hover => &mut self.hover,
            InteractionKind::Selection => &mut self.selection,
            InteractionKind::Drag => &mut self.drag,
            InteractionKind::Focus => &mut self.focus,
            InteractionKind::Lock => unreachable!("Lock is handled before slot dispatch"),
        }
    }

    #[cfg(feature = "tracing")]
    fn log_switch(kind: InteractionKind, panel: usize, active: bool) {
        tracing::debug!(message = "interaction.switch", kind = ?kind, panel, active);
    }
}
