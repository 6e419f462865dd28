//! Ordered target list with a selection cursor.
//!
//! Invariant: `cursor < len` whenever the list is non-empty, and
//! `cursor == 0` when it is empty. Every mutator below preserves it.

use crate::error::IndexError;
use crate::types::TargetRecord;

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Default)]
pub struct TargetList {
    targets: Vec<TargetRecord>,
    cursor: usize,
}

impl TargetList {
    pub fn new(targets: Vec<TargetRecord>) -> Self {
        TargetList { targets, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn as_slice(&self) -> &[TargetRecord] {
        &self.targets
    }

    pub fn get(&self, index: usize) -> Option<&TargetRecord> {
        self.targets.get(index)
    }

    /// Move the cursor one step, wrapping at both ends. No-op when empty.
    pub fn move_cursor(&mut self, direction: Direction) {
        let len = self.targets.len();
        if len == 0 {
            return;
        }
        self.cursor = match direction {
            Direction::Forward => (self.cursor + 1) % len,
            Direction::Backward => (self.cursor + len - 1) % len,
        };
    }

    /// Place the cursor, clamped into range.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.targets.len().saturating_sub(1));
    }

    /// The record under the cursor.
    pub fn selected(&self) -> Option<&TargetRecord> {
        self.targets.get(self.cursor)
    }

    /// Add to the end. The caller decides where the cursor goes.
    pub fn append(&mut self, target: TargetRecord) {
        self.targets.push(target);
    }

    pub fn replace_at(&mut self, index: usize, target: TargetRecord) -> Result<(), IndexError> {
        let len = self.targets.len();
        let slot = self
            .targets
            .get_mut(index)
            .ok_or(IndexError { index, len })?;
        *slot = target;
        Ok(())
    }

    /// Remove a record, pulling the cursor back inside the shrunken list.
    pub fn remove_at(&mut self, index: usize) -> Result<TargetRecord, IndexError> {
        let len = self.targets.len();
        if index >= len {
            return Err(IndexError { index, len });
        }
        let removed = self.targets.remove(index);

        if self.targets.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.targets.len() {
            self.cursor = self.targets.len() - 1;
        }
        Ok(removed)
    }
}
