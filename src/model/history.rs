//! Snapshot-based undo/redo
//!
//! Before an edit the live document is copied into a [`Snapshot`]. Snapshots
//! sit in a deque with a `current` index; recording while `current` is not
//! the tail drops everything after it, so a fresh edit destroys the redo
//! history. Recording is debounced so a burst of keystrokes becomes a single
//! undo step.
//!
//! Because snapshots are taken *before* edits, the live document is normally
//! ahead of `snapshots[current]` (`diverged`). The first undo from that state
//! stores the live document as a new tail so redo can return to it.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::cursor::Position;
use super::error::EditError;
use super::row::Row;
use super::selection::Selection;

/// Default number of retained snapshots
pub const UNDO_BUFFER_SIZE: usize = 10;
/// Default debounce between recorded snapshots
pub const SNAPSHOT_DEBOUNCE: Duration = Duration::from_secs(1);

/// Everything an undo step restores
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    pub rows: Vec<Row>,
    pub cursor: Position,
    pub row_offset: usize,
    pub col_offset: usize,
    pub selection: Selection,
}

/// One immutable history entry
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub state: DocumentState,
    pub description: String,
    pub timestamp: Instant,
}

/// Linear undo history with a movable current position
#[derive(Debug, Clone)]
pub struct UndoStore {
    snapshots: VecDeque<Snapshot>,
    current: usize,
    max_snapshots: usize,
    debounce: Duration,
    last_recorded: Option<Instant>,
    /// Live document has changed since `snapshots[current]` was taken or restored
    diverged: bool,
}

impl Default for UndoStore {
    fn default() -> Self {
        Self::new(UNDO_BUFFER_SIZE, SNAPSHOT_DEBOUNCE)
    }
}

impl UndoStore {
    pub fn new(max_snapshots: usize, debounce: Duration) -> Self {
        Self {
            snapshots: VecDeque::new(),
            current: 0,
            max_snapshots: max_snapshots.max(1),
            debounce,
            last_recorded: None,
            diverged: false,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.snapshots.is_empty()).then_some(self.current)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty() && (self.diverged || self.current > 0)
    }

    pub fn can_redo(&self) -> bool {
        !self.diverged && self.current + 1 < self.snapshots.len()
    }

    /// Record the state about to be edited, using the wall clock
    pub fn record(&mut self, description: &str, state: impl FnOnce() -> DocumentState) -> bool {
        self.record_at(description, state, Instant::now())
    }

    /// Record the state about to be edited.
    ///
    /// Returns false when the call fell inside the debounce window and was
    /// coalesced into the previous snapshot. `state` is only evaluated when
    /// a snapshot is actually taken.
    pub fn record_at(
        &mut self,
        description: &str,
        state: impl FnOnce() -> DocumentState,
        now: Instant,
    ) -> bool {
        self.diverged = true;

        if let Some(last) = self.last_recorded {
            if !self.snapshots.is_empty() && now.saturating_duration_since(last) < self.debounce {
                return false;
            }
        }

        if !self.snapshots.is_empty() && self.current + 1 < self.snapshots.len() {
            let dropped = self.snapshots.len() - self.current - 1;
            self.snapshots.truncate(self.current + 1);
            tracing::trace!(dropped, "Truncated redo history");
        }

        self.snapshots.push_back(Snapshot {
            state: state(),
            description: description.to_string(),
            timestamp: now,
        });
        self.current = self.snapshots.len() - 1;
        self.last_recorded = Some(now);
        self.evict();

        tracing::debug!(
            description,
            retained = self.snapshots.len(),
            "Recorded snapshot"
        );
        true
    }

    /// Step back one snapshot.
    ///
    /// `live` supplies the current document and is only evaluated when it
    /// must be kept for a later redo. Returns the state to restore and the
    /// description of the step being undone.
    pub fn undo(
        &mut self,
        live: impl FnOnce() -> DocumentState,
    ) -> Result<(DocumentState, String), EditError> {
        if self.snapshots.is_empty() {
            return Err(EditError::NothingToUndo);
        }

        if self.diverged {
            // Only happens at the tail: any record truncates forward history
            self.snapshots.push_back(Snapshot {
                state: live(),
                description: "Latest".to_string(),
                timestamp: Instant::now(),
            });
            self.evict();
        } else if self.current == 0 {
            return Err(EditError::NothingToUndo);
        } else {
            self.current -= 1;
        }

        self.diverged = false;
        self.last_recorded = None;

        let snapshot = &self.snapshots[self.current];
        tracing::debug!(description = %snapshot.description, index = self.current, "Undo");
        Ok((snapshot.state.clone(), snapshot.description.clone()))
    }

    /// Step forward one snapshot. Returns the state to restore and the
    /// description of the step being redone.
    pub fn redo(&mut self) -> Result<(DocumentState, String), EditError> {
        if !self.can_redo() {
            return Err(EditError::NothingToRedo);
        }

        let description = self.snapshots[self.current].description.clone();
        self.current += 1;
        self.last_recorded = None;

        tracing::debug!(%description, index = self.current, "Redo");
        Ok((self.snapshots[self.current].state.clone(), description))
    }

    /// Drop all history (new file / open file)
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current = 0;
        self.last_recorded = None;
        self.diverged = false;
    }

    /// Drop the oldest snapshots down to the limit. `snapshots[current]`
    /// always survives; with nothing older left the redo tail goes instead.
    fn evict(&mut self) {
        while self.snapshots.len() > self.max_snapshots {
            if self.current > 0 {
                self.snapshots.pop_front();
                self.current -= 1;
                tracing::trace!("Evicted oldest snapshot");
            } else {
                self.snapshots.pop_back();
                tracing::trace!("Evicted redo tail");
            }
        }
    }
}
