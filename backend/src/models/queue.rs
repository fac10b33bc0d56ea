//! Instruction Queue
//!
//! Ordered, append-only store of the trace's instructions with a forward
//! cursor for replay.
//!
//! # Lifecycle
//!
//! 1. Created empty
//! 2. Filled by `append` (one call per declared instruction)
//! 3. Walked once by the engine: `first()` then `next_instruction()` until `None`
//!
//! # Critical Invariants
//!
//! 1. **Insertion Order**: traversal order equals append order
//! 2. **No Removal**: records are never removed or reordered
//! 3. **Positioned Cursor**: `next_instruction()` requires a prior `first()`

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::time::Time;
use crate::models::instruction::InstructionRecord;

/// Errors that can occur while walking the queue
#[derive(Debug, Error, PartialEq)]
pub enum QueueError {
    #[error("Cursor advanced before being positioned with first()")]
    CursorNotPositioned,
}

/// Position of the replay cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Cursor {
    /// `first()` has not been called yet
    #[default]
    Unpositioned,
    /// Cursor rests on the record at this index
    At(usize),
    /// Cursor has moved past the last record
    Exhausted,
}

/// Append-only instruction sequence with a one-shot forward cursor
///
/// # Example
///
/// ```rust
/// use sched_replay_core_rs::{InstructionQueue, InstructionRecord};
///
/// let mut queue = InstructionQueue::new();
/// queue.append(InstructionRecord::new(1, 3, 0));
/// queue.append(InstructionRecord::new(2, 4, 0));
///
/// assert_eq!(queue.first().map(|i| i.thread_id()), Some(1));
/// assert_eq!(queue.next_instruction().unwrap().map(|i| i.thread_id()), Some(2));
/// assert_eq!(queue.next_instruction().unwrap(), None);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstructionQueue {
    /// Records in insertion order
    records: Vec<InstructionRecord>,

    /// Replay cursor
    #[serde(skip)]
    cursor: Cursor,
}

impl InstructionQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            cursor: Cursor::Unpositioned,
        }
    }

    /// Create an empty queue with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            cursor: Cursor::Unpositioned,
        }
    }

    /// Copy a record onto the tail of the queue
    pub fn append(&mut self, record: InstructionRecord) {
        self.records.push(record);
    }

    /// Position the cursor on the first record and return it
    ///
    /// Returns `None` for an empty queue. Calling `first()` again restarts
    /// the traversal from the head.
    pub fn first(&mut self) -> Option<&InstructionRecord> {
        if self.records.is_empty() {
            self.cursor = Cursor::Exhausted;
            return None;
        }
        self.cursor = Cursor::At(0);
        self.records.first()
    }

    /// Advance the cursor and return the new current record
    ///
    /// Returns `Ok(None)` once the cursor moves past the last record, and on
    /// every call after that.
    ///
    /// # Errors
    ///
    /// `QueueError::CursorNotPositioned` if `first()` was never called.
    pub fn next_instruction(&mut self) -> Result<Option<&InstructionRecord>, QueueError> {
        let next = match self.cursor {
            Cursor::Unpositioned => return Err(QueueError::CursorNotPositioned),
            Cursor::Exhausted => return Ok(None),
            Cursor::At(index) => index + 1,
        };

        if next < self.records.len() {
            self.cursor = Cursor::At(next);
            Ok(self.records.get(next))
        } else {
            self.cursor = Cursor::Exhausted;
            Ok(None)
        }
    }

    /// Number of records in the queue
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the queue holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in insertion order without touching the cursor
    pub fn iter(&self) -> std::slice::Iter<'_, InstructionRecord> {
        self.records.iter()
    }

    /// Sum of all burst lengths (the clock value after a full replay)
    pub fn total_burst(&self) -> Time {
        self.records
            .iter()
            .fold(0, |acc: Time, r| acc.saturating_add(r.burst()))
    }
}

impl FromIterator<InstructionRecord> for InstructionQueue {
    fn from_iter<I: IntoIterator<Item = InstructionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
            cursor: Cursor::Unpositioned,
        }
    }
}

impl Extend<InstructionRecord> for InstructionQueue {
    fn extend<I: IntoIterator<Item = InstructionRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl<'a> IntoIterator for &'a InstructionQueue {
    type Item = &'a InstructionRecord;
    type IntoIter = std::slice::Iter<'a, InstructionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_before_first_is_error() {
        let mut queue: InstructionQueue = vec![InstructionRecord::new(1, 1, 0)]
            .into_iter()
            .collect();
        assert_eq!(
            queue.next_instruction(),
            Err(QueueError::CursorNotPositioned)
        );
    }

    #[test]
    fn test_empty_queue_first_is_none() {
        let mut queue = InstructionQueue::new();
        assert!(queue.first().is_none());
        assert_eq!(queue.next_instruction(), Ok(None));
    }

    #[test]
    fn test_exhausted_cursor_stays_exhausted() {
        let mut queue: InstructionQueue = vec![InstructionRecord::new(1, 1, 0)]
            .into_iter()
            .collect();
        assert!(queue.first().is_some());
        assert_eq!(queue.next_instruction(), Ok(None));
        assert_eq!(queue.next_instruction(), Ok(None));
    }
}
