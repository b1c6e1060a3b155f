//! Bounded undo history of pre-mutation snapshots.

use crate::config::DEFAULT_HISTORY_CAPACITY;
use crate::model::Table;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Table as it was immediately before a mutating operation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub table: Table,
    pub timestamp: DateTime<Utc>,
}

/// Undo stack holding at most `capacity` snapshots, oldest evicted first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Must be called with the table as it exists before the mutation is applied.
    pub fn push_snapshot(&mut self, table: Table) {
        self.entries.push_back(HistoryEntry {
            table,
            timestamp: Utc::now(),
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Pops the most recent snapshot. `None` when there is nothing to restore.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshots in push order, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
