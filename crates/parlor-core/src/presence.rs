//! Local activity tracking and unread counting.
//!
//! Activity lives in a shared atomic cell rather than a plain field so every
//! reader observes the value current at read time. The unread increment path
//! dereferences the cell at the moment a message is applied; it can never act
//! on a snapshot captured when a handler was registered. This is a
//! correctness invariant: activity toggles asynchronously with message
//! arrival.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Local user activity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// View is visible and focused; messages are being read.
    Active,
    /// View is hidden or unfocused.
    Inactive,
}

/// Shared, live reference to the current activity state.
///
/// Cheap to clone; all clones observe the same slot. Hand a clone to any
/// component that must read activity at its own point in time.
#[derive(Debug, Clone)]
pub struct ActivityCell(Arc<AtomicBool>);

impl ActivityCell {
    fn new(activity: Activity) -> Self {
        Self(Arc::new(AtomicBool::new(activity == Activity::Active)))
    }

    /// Current activity at the moment of the call.
    pub fn get(&self) -> Activity {
        if self.0.load(Ordering::SeqCst) { Activity::Active } else { Activity::Inactive }
    }

    /// True when currently active.
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set(&self, activity: Activity) {
        self.0.store(activity == Activity::Active, Ordering::SeqCst);
    }
}

/// Tracks local activity and the unread-message count.
#[derive(Debug)]
pub struct PresenceTracker {
    cell: ActivityCell,
    unread: u32,
}

impl PresenceTracker {
    /// New tracker; the view starts active with nothing unread.
    pub fn new() -> Self {
        Self { cell: ActivityCell::new(Activity::Active), unread: 0 }
    }

    /// Apply an activity signal.
    ///
    /// Every transition to [`Activity::Active`] resets the unread counter to
    /// exactly 0; repeated active signals are idempotent.
    pub fn apply(&mut self, activity: Activity) {
        self.cell.set(activity);
        if activity == Activity::Active {
            self.unread = 0;
        }
    }

    /// Record an incoming user message.
    ///
    /// Reads activity through the live cell at this instant; increments the
    /// unread counter only while inactive. Returns whether the message was
    /// counted.
    pub fn record_incoming(&mut self) -> bool {
        if self.cell.is_active() {
            return false;
        }
        self.unread += 1;
        true
    }

    /// Live reference to the activity slot.
    pub fn cell(&self) -> ActivityCell {
        self.cell.clone()
    }

    /// Current activity.
    pub fn activity(&self) -> Activity {
        self.cell.get()
    }

    /// Messages received while inactive since the last active transition.
    pub fn unread(&self) -> u32 {
        self.unread
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_active_with_zero_unread() {
        let tracker = PresenceTracker::new();
        assert_eq!(tracker.activity(), Activity::Active);
        assert_eq!(tracker.unread(), 0);
    }

    #[test]
    fn counts_only_while_inactive() {
        let mut tracker = PresenceTracker::new();
        assert!(!tracker.record_incoming());

        tracker.apply(Activity::Inactive);
        assert!(tracker.record_incoming());
        assert!(tracker.record_incoming());
        assert_eq!(tracker.unread(), 2);
    }

    #[test]
    fn active_transition_resets_to_exactly_zero() {
        let mut tracker = PresenceTracker::new();
        tracker.apply(Activity::Inactive);
        tracker.record_incoming();

        tracker.apply(Activity::Active);
        assert_eq!(tracker.unread(), 0);

        // Idempotent under repeated active signals.
        tracker.apply(Activity::Active);
        assert_eq!(tracker.unread(), 0);
    }

    #[test]
    fn cell_observes_current_state_not_a_snapshot() {
        let mut tracker = PresenceTracker::new();
        // Cell obtained before any transition, as a handler would capture it.
        let cell = tracker.cell();
        assert!(cell.is_active());

        tracker.apply(Activity::Inactive);
        assert!(!cell.is_active());

        tracker.apply(Activity::Active);
        assert!(cell.is_active());
    }
}
