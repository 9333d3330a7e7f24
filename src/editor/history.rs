//! Undo/redo history over document snapshots.
//!
//! ## Design
//!
//! - `past` and `future` hold whole snapshots, most recent first
//! - An update equal to the present snapshot is ignored
//! - A new update clears the redo side
//! - `past` is capped; the oldest snapshot falls off first

use std::collections::VecDeque;

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded undo/redo stack of immutable snapshots.
///
/// `update`, `undo` and `redo` each move snapshots between the three
/// collections as one step under `&mut self`.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    present: T,
    future: VecDeque<T>,
    limit: usize,
}

impl<T: Clone + PartialEq> History<T> {
    /// Start a history at `initial` with the default limit.
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// Start a history keeping at most `limit` undo steps.
    pub fn with_limit(initial: T, limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial,
            future: VecDeque::new(),
            limit,
        }
    }

    /// The currently displayed snapshot.
    pub const fn present(&self) -> &T {
        &self.present
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Record `next` as the present snapshot.
    ///
    /// Returns `false` (and records nothing) when `next` equals the present.
    pub fn update(&mut self, next: T) -> bool {
        if next == self.present {
            return false;
        }
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push_front(previous);
        if self.past.len() > self.limit {
            self.past.truncate(self.limit);
            tracing::trace!(limit = self.limit, "dropped oldest history entry");
        }
        self.future.clear();
        true
    }

    /// Step back one snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        true
    }

    /// Step forward one snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push_front(current);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_history_cannot_undo_or_redo() {
        let history = History::new(0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(*history.present(), 0);
    }

    #[test]
    fn test_duplicate_update_records_once() {
        let mut history = History::new(vec!["a"]);
        assert!(history.update(vec!["a", "b"]));
        assert!(!history.update(vec!["a", "b"]));
        assert_eq!(history.past_len(), 1);
    }

    #[test]
    fn test_update_equal_to_present_is_ignored() {
        let mut history = History::new(1);
        assert!(!history.update(1));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_restores_previous() {
        let mut history = History::new(1);
        history.update(2);
        history.update(3);
        assert!(history.undo());
        assert_eq!(*history.present(), 2);
        assert!(history.can_redo());
    }

    #[test]
    fn test_redo_restores_undone() {
        let mut history = History::new(1);
        history.update(2);
        history.undo();
        assert!(history.redo());
        assert_eq!(*history.present(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_underflow_is_noop() {
        let mut history = History::new(1);
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(*history.present(), 1);
    }

    #[test]
    fn test_update_clears_future() {
        let mut history = History::new(1);
        history.update(2);
        history.update(3);
        history.undo();
        history.undo();
        assert_eq!(history.future_len(), 2);
        history.update(9);
        assert_eq!(history.future_len(), 0);
        assert_eq!(history.past_len(), 1);
    }

    #[test]
    fn test_past_is_capped_at_fifty() {
        let mut history = History::new(0);
        for i in 1..=60 {
            history.update(i);
        }
        assert_eq!(history.past_len(), 50);
        for _ in 0..50 {
            assert!(history.undo());
        }
        // 0..=9 were dropped; the oldest reachable snapshot is 10.
        assert_eq!(*history.present(), 10);
        assert!(!history.undo());
    }

    #[test]
    fn test_custom_limit() {
        let mut history = History::with_limit(0, 2);
        history.update(1);
        history.update(2);
        history.update(3);
        assert_eq!(history.past_len(), 2);
        assert_eq!(history.limit(), 2);
    }

    proptest! {
        #[test]
        fn undo_then_redo_is_inverse(values in proptest::collection::vec(0u32..5, 1..80)) {
            let mut history = History::new(u32::MAX);
            for v in &values {
                history.update(*v);
            }
            let before_undo = *history.present();
            if history.undo() {
                history.redo();
            }
            prop_assert_eq!(*history.present(), before_undo);
            prop_assert!(history.past_len() <= DEFAULT_HISTORY_LIMIT);
        }

        #[test]
        fn undo_returns_snapshot_before_last_update(
            values in proptest::collection::vec(0u32..1000, 1..30),
            last in 1000u32..2000,
        ) {
            let mut history = History::new(u32::MAX);
            for v in &values {
                history.update(*v);
            }
            let prior = *history.present();
            history.update(last);
            history.undo();
            prop_assert_eq!(*history.present(), prior);
        }
    }
}
