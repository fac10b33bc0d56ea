//! Thread State Table
//!
//! Per-thread timing accumulators, one entry per thread identifier
//! `1..=num_threads`, stored densely by `thread_id - 1`.
//!
//! # Critical Invariants
//!
//! 1. **Dense Range**: the table holds exactly `num_threads` entries
//! 2. **Zero Start**: every entry starts zeroed and not started
//! 3. **Engine-Only Mutation**: only the replay engine writes to entries

use serde::{Deserialize, Serialize};

use crate::core::time::Time;
use crate::models::instruction::ThreadId;

/// Timing accumulators for one thread
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadState {
    /// Whether any instruction of this thread has run yet
    pub has_started: bool,

    /// Completion time of the thread's most recent instruction
    pub turnaround_time: Time,

    /// Total time spent ready but not running
    pub wait_time: Time,

    /// Clock value at which the thread first ran
    pub response_time: Time,

    /// Clock value at which the thread's last instruction finished
    pub time_last_running: Time,

    /// Times another thread's work ran between two of this thread's instructions
    pub nonvoluntary_context_switches: u64,
}

/// Fixed-size table of thread states indexed by 1-based thread ID
///
/// # Example
///
/// ```rust
/// use sched_replay_core_rs::ThreadTable;
///
/// let mut table = ThreadTable::new(2);
/// assert_eq!(table.len(), 2);
/// assert!(table.get(1).is_some());
/// assert!(table.get(0).is_none());
/// assert!(table.get(3).is_none());
///
/// table.get_mut(2).unwrap().has_started = true;
/// assert!(table.get(2).unwrap().has_started);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadTable {
    threads: Vec<ThreadState>,
}

impl ThreadTable {
    /// Create a table of `num_threads` zeroed entries
    pub fn new(num_threads: usize) -> Self {
        Self {
            threads: vec![ThreadState::default(); num_threads],
        }
    }

    /// Map a 1-based thread ID to a table index, if in range
    fn index_of(&self, thread_id: ThreadId) -> Option<usize> {
        let index = usize::try_from(thread_id).ok()?.checked_sub(1)?;
        (index < self.threads.len()).then_some(index)
    }

    /// Check whether `thread_id` lies in `[1, num_threads]`
    pub fn contains(&self, thread_id: ThreadId) -> bool {
        self.index_of(thread_id).is_some()
    }

    /// Get the state for a thread
    pub fn get(&self, thread_id: ThreadId) -> Option<&ThreadState> {
        self.index_of(thread_id).map(|i| &self.threads[i])
    }

    /// Get mutable state for a thread
    pub fn get_mut(&mut self, thread_id: ThreadId) -> Option<&mut ThreadState> {
        let index = self.index_of(thread_id)?;
        self.threads.get_mut(index)
    }

    /// Number of threads in the table
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// Check if the table has no threads
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Iterate over `(thread_id, state)` pairs in ID order
    pub fn iter(&self) -> impl Iterator<Item = (ThreadId, &ThreadState)> + '_ {
        self.threads
            .iter()
            .enumerate()
            .map(|(i, state)| (i as ThreadId + 1, state))
    }

    /// Number of threads that ran at least one instruction
    pub fn started_count(&self) -> usize {
        self.threads.iter().filter(|t| t.has_started).count()
    }
}
