//! Event logging for replay auditing.
//!
//! This module defines the Event enum which captures every state change made
//! while replaying a trace. Events enable:
//! - Debugging (understand what ran and when)
//! - Auditing (verify how wait time and context switches were derived)
//! - Analysis (rebuild a per-thread timeline)
//!
//! # Example
//!
//! ```rust
//! use sched_replay_core_rs::models::Event;
//!
//! let event = Event::InstructionCompleted {
//!     time: 7,
//!     thread_id: 2,
//!     start: 3,
//!     burst: 4,
//! };
//!
//! assert_eq!(event.time(), 7);
//! assert_eq!(event.event_type(), "InstructionCompleted");
//! ```

use serde::{Deserialize, Serialize};

use crate::core::time::Time;
use crate::models::instruction::ThreadId;

/// Replay event capturing a state change.
///
/// Events are logged in replay order; `time()` is non-decreasing across the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A thread ran its first instruction
    ThreadStarted {
        time: Time,
        thread_id: ThreadId,
        response_time: Time,
    },

    /// A thread resumed after another thread's instruction ran in between
    ContextSwitch {
        time: Time,
        thread_id: ThreadId,
        preempted_by: ThreadId,
        waited: Time,
    },

    /// An instruction ran to completion
    InstructionCompleted {
        time: Time,
        thread_id: ThreadId,
        start: Time,
        burst: Time,
    },
}

impl Event {
    /// Get the clock value when this event occurred
    pub fn time(&self) -> Time {
        match self {
            Event::ThreadStarted { time, .. } => *time,
            Event::ContextSwitch { time, .. } => *time,
            Event::InstructionCompleted { time, .. } => *time,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ThreadStarted { .. } => "ThreadStarted",
            Event::ContextSwitch { .. } => "ContextSwitch",
            Event::InstructionCompleted { .. } => "InstructionCompleted",
        }
    }

    /// Get the thread this event relates to
    pub fn thread_id(&self) -> ThreadId {
        match self {
            Event::ThreadStarted { thread_id, .. } => *thread_id,
            Event::ContextSwitch { thread_id, .. } => *thread_id,
            Event::InstructionCompleted { thread_id, .. } => *thread_id,
        }
    }
}

/// Event log for storing and querying replay events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events stamped with a specific clock value
    pub fn events_at_time(&self, time: Time) -> Vec<&Event> {
        self.events.iter().filter(|e| e.time() == time).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific thread
    pub fn events_for_thread(&self, thread_id: ThreadId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.thread_id() == thread_id)
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_queries() {
        let mut log = EventLog::new();
        log.log(Event::ThreadStarted {
            time: 0,
            thread_id: 1,
            response_time: 0,
        });
        log.log(Event::InstructionCompleted {
            time: 3,
            thread_id: 1,
            start: 0,
            burst: 3,
        });
        log.log(Event::ThreadStarted {
            time: 3,
            thread_id: 2,
            response_time: 3,
        });

        assert_eq!(log.len(), 3);
        assert_eq!(log.events_of_type("ThreadStarted").len(), 2);
        assert_eq!(log.events_for_thread(1).len(), 2);
        assert_eq!(log.events_at_time(3).len(), 2);

        log.clear();
        assert!(log.is_empty());
    }
}
