//! Linear undo/redo history of parameter snapshots.
//!
//! Appending while the cursor is not at the end discards everything after the
//! cursor. Appends through [`History::record`] are debounced so a continuous
//! slider drag produces one entry rather than one per tick.
//!
//! Timestamps are milliseconds supplied by the caller. In the browser that is
//! `performance.now()` or `Date.now()`; tests pass fixed values.

use tracing::trace;

/// Minimum gap between debounced appends, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Ordered snapshots plus a cursor into them.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    /// Index of the current snapshot, `None` while empty.
    cursor: Option<usize>,
    debounce_ms: u64,
    last_append_ms: Option<u64>,
}

impl<T: Clone + PartialEq> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl<T: Clone + PartialEq> History<T> {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            debounce_ms,
            last_append_ms: None,
        }
    }

    /// Append `snapshot` unless the previous append was less than the
    /// debounce window ago.
    ///
    /// Snapshots arriving inside the window are dropped, not merged; call
    /// [`History::commit`] when the interaction ends to capture the final
    /// state. Returns true if an entry was appended.
    pub fn record(&mut self, snapshot: T, now_ms: u64) -> bool {
        if let Some(last) = self.last_append_ms {
            if now_ms.saturating_sub(last) < self.debounce_ms {
                trace!(now_ms, last, "history append debounced");
                return false;
            }
        }
        self.push(snapshot, now_ms)
    }

    /// Append `snapshot` regardless of the debounce window.
    pub fn commit(&mut self, snapshot: T, now_ms: u64) -> bool {
        self.push(snapshot, now_ms)
    }

    fn push(&mut self, snapshot: T, now_ms: u64) -> bool {
        if self.current() == Some(&snapshot) {
            return false;
        }

        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(snapshot);
        self.cursor = Some(self.entries.len() - 1);
        self.last_append_ms = Some(now_ms);
        trace!(len = self.entries.len(), "history append");
        true
    }

    /// Step back one entry and return the snapshot to re-apply.
    pub fn undo(&mut self) -> Option<&T> {
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    /// Step forward one entry and return the snapshot to re-apply.
    pub fn redo(&mut self) -> Option<&T> {
        let cursor = self.cursor? + 1;
        let snapshot = self.entries.get(cursor)?;
        self.cursor = Some(cursor);
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor?)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and forget the last append time.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.last_append_ms = None;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: N distinct changes spaced past the window give N entries,
        /// and walking back then forward visits every snapshot exactly.
        #[test]
        fn prop_spaced_changes_round_trip(
            values in prop::collection::vec(any::<i32>(), 1..20),
            gap in 301u64..5000,
        ) {
            let mut distinct = values.clone();
            distinct.dedup();

            let mut history = History::default();
            for (i, value) in distinct.iter().enumerate() {
                prop_assert!(history.record(*value, i as u64 * gap));
            }
            prop_assert_eq!(history.len(), distinct.len());

            for expected in distinct.iter().rev().skip(1) {
                prop_assert_eq!(history.undo(), Some(expected));
            }
            prop_assert!(!history.can_undo());
            for expected in distinct.iter().skip(1) {
                prop_assert_eq!(history.redo(), Some(expected));
            }
            prop_assert!(!history.can_redo());
        }

        /// Property: The cursor always indexes a valid entry.
        #[test]
        fn prop_cursor_valid(
            ops in prop::collection::vec((0u8..4, any::<u8>(), 0u64..600), 0..40),
        ) {
            let mut history = History::default();
            let mut now = 0u64;
            for (op, value, dt) in ops {
                now += dt;
                match op {
                    0 => { history.record(value, now); }
                    1 => { history.commit(value, now); }
                    2 => { history.undo(); }
                    _ => { history.redo(); }
                }
                match history.cursor() {
                    Some(c) => prop_assert!(c < history.len()),
                    None => prop_assert!(history.is_empty()),
                }
            }
        }
    }
}
