//! Linear undo history over adjustment snapshots.
//!
//! ```text
//! snapshots: [s0, s1, s2, s3]
//!                      ^ index
//! push(s') → [s0, s1, s2, s'], index = 3   (redo branch dropped)
//! ```

use std::sync::Arc;

use mirrorlab_core::Adjustments;

/// Snapshot list plus a cursor. Never empty.
#[derive(Debug, Clone)]
pub struct EditHistory {
    snapshots: Vec<Arc<Adjustments>>,
    index: usize,
    limit: usize,
}

impl EditHistory {
    /// Start a history at the identity snapshot, keeping at most `limit`
    /// snapshots (minimum 1).
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: vec![Arc::new(Adjustments::default())],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &Arc<Adjustments> {
        &self.snapshots[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Record `snapshot` after the cursor, discarding any redo branch.
    ///
    /// When the limit is exceeded the oldest snapshot is dropped.
    pub fn push(&mut self, snapshot: Adjustments) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(Arc::new(snapshot));
        if self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Step back. Returns `false` at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward. Returns `false` at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Drop everything and start again at identity, as on a new image.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.snapshots.push(Arc::new(Adjustments::default()));
        self.index = 0;
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}
