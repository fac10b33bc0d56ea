//! Instruction model
//!
//! One record of the replayed trace: a CPU burst attributed to a thread.
//! Each instruction has:
//! - Thread ID (1-based; validated by the engine, not here)
//! - Burst length in time units
//! - Priority (read from the trace but not used by any computation)

use serde::{Deserialize, Serialize};

use crate::core::time::Time;

/// Thread identifier as it appears in the trace
///
/// Kept signed so that malformed identifiers (zero, negative) survive
/// parsing and are rejected by the engine's range check.
pub type ThreadId = i64;

/// A single CPU burst from the trace
///
/// # Example
/// ```
/// use sched_replay_core_rs::InstructionRecord;
///
/// let inst = InstructionRecord::new(1, 5, 0);
/// assert_eq!(inst.thread_id(), 1);
/// assert_eq!(inst.burst(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRecord {
    /// Thread this burst belongs to
    thread_id: ThreadId,

    /// Time units the burst runs for
    burst: Time,

    /// Priority level (0 = highest); carried for input compatibility only
    priority: i64,
}

impl InstructionRecord {
    /// Create a new instruction record
    pub fn new(thread_id: ThreadId, burst: Time, priority: i64) -> Self {
        Self {
            thread_id,
            burst,
            priority,
        }
    }

    /// Thread this burst belongs to
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Burst length in time units
    pub fn burst(&self) -> Time {
        self.burst
    }

    /// Priority as read from the trace
    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Check whether this burst belongs to the same thread as `other`
    pub fn same_thread(&self, other: &InstructionRecord) -> bool {
        self.thread_id == other.thread_id
    }
}
