// SPDX-License-Identifier: MPL-2.0
//! Bounded undo/redo history of full-image snapshots.
//!
//! The history is a ring of committed snapshots plus an index pointing at the
//! snapshot currently on screen. Committing after an undo discards the redo
//! tail; committing at capacity evicts the oldest snapshot. With capacity N,
//! after k > N commits the oldest retained snapshot is the (k - N + 1)-th.

use image::DynamicImage;

/// History capacity bounds.
pub mod history_bounds {
    /// Maximum number of retained snapshots.
    pub const CAPACITY: usize = 20;
}

/// Undo/redo stack of image snapshots.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<DynamicImage>,
    /// Index of the snapshot currently displayed. Meaningless while
    /// `snapshots` is empty.
    index: usize,
    capacity: usize,
}

impl History {
    /// Creates an empty history with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(history_bounds::CAPACITY)
    }

    /// Creates an empty history with a custom capacity (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            index: 0,
            capacity: capacity.max(1),
        }
    }

    /// Commits a new snapshot as the current state.
    ///
    /// Any redo tail beyond the current index is discarded first. If the
    /// history is full, the oldest snapshot is evicted.
    pub fn commit(&mut self, snapshot: DynamicImage) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.index + 1);
        }
        self.snapshots.push(snapshot);
        self.index = self.snapshots.len() - 1;
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(0);
            self.index -= 1;
        }
    }

    /// Steps back one snapshot. Returns the newly current snapshot, or
    /// `None` when already at the oldest.
    pub fn undo(&mut self) -> Option<&DynamicImage> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index)
    }

    /// Steps forward one snapshot. Returns the newly current snapshot, or
    /// `None` when already at the newest.
    pub fn redo(&mut self) -> Option<&DynamicImage> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index)
    }

    /// The snapshot currently on screen.
    #[must_use]
    pub fn current(&self) -> Option<&DynamicImage> {
        self.snapshots.get(self.index)
    }

    /// Clears everything and commits a single snapshot.
    pub fn reset_to(&mut self, snapshot: DynamicImage) {
        self.snapshots.clear();
        self.index = 0;
        self.snapshots.push(snapshot);
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.index + 1 < self.snapshots.len()
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
