//! Replay Engine
//!
//! Main replay loop: walks the instruction queue in order, advancing the
//! simulation clock and updating the state of the thread each instruction
//! belongs to.
//!
//! # Architecture
//!
//! ```text
//! For each instruction I (clock = value before I):
//! 1. Validate 1 <= I.thread_id <= num_threads
//! 2. First run of the thread: response = wait = clock
//! 3. Otherwise, if time_last_running > 0:
//!      wait += clock - time_last_running
//!      previous instruction from another thread => nonvoluntary switch
//! 4. clock += I.burst
//! 5. time_last_running = turnaround = clock
//! 6. Remember I's thread as the previous thread
//! ```
//!
//! A thread whose last run finished at clock 0 (only zero-length bursts at the
//! very start) has `time_last_running == 0`, so step 3 is skipped for its next
//! instruction: no wait is accrued and no switch is counted.
//!
//! # Example
//!
//! ```rust
//! use sched_replay_core_rs::{InstructionQueue, InstructionRecord, ReplayConfig, ReplayEngine};
//!
//! let mut queue: InstructionQueue = vec![
//!     InstructionRecord::new(1, 3, 0),
//!     InstructionRecord::new(2, 4, 0),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut engine = ReplayEngine::new(ReplayConfig::new(2, 2)).unwrap();
//! engine.run(&mut queue).unwrap();
//!
//! assert_eq!(engine.clock().now(), 7);
//! assert_eq!(engine.threads().get(2).unwrap().response_time, 3);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::time::{SimulationClock, Time};
use crate::input::{Trace, TraceHeader};
use crate::metrics::{MetricsError, ReplayReport, SummaryMetrics};
use crate::models::event::{Event, EventLog};
use crate::models::instruction::{InstructionRecord, ThreadId};
use crate::models::queue::{InstructionQueue, QueueError};
use crate::models::thread::ThreadTable;

// ============================================================================
// Configuration Types
// ============================================================================

/// Replay configuration
///
/// # Fields
///
/// * `num_processors` - Processor count; only used as the utilization divisor
/// * `num_threads` - Number of threads; valid thread IDs are `1..=num_threads`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Processor count from the trace header
    pub num_processors: u64,

    /// Declared thread count
    pub num_threads: usize,
}

impl ReplayConfig {
    /// Create a configuration
    pub fn new(num_processors: u64, num_threads: usize) -> Self {
        Self {
            num_processors,
            num_threads,
        }
    }

    /// Check that both counts are positive
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.num_processors == 0 {
            return Err(SimulationError::InvalidConfig(
                "num_processors must be positive".to_string(),
            ));
        }
        if self.num_threads == 0 {
            return Err(SimulationError::InvalidConfig(
                "num_threads must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&TraceHeader> for ReplayConfig {
    fn from(header: &TraceHeader) -> Self {
        Self::new(header.num_processors, header.num_threads)
    }
}

// ============================================================================
// Errors and results
// ============================================================================

/// Replay error types
///
/// Every variant is fatal: the replay stops and no report is produced.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Thread ID {thread_id} out of range [1, {num_threads}]")]
    ThreadOutOfRange {
        thread_id: ThreadId,
        num_threads: usize,
    },

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
}

/// Result of replaying a single instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Thread the instruction belongs to
    pub thread_id: ThreadId,

    /// Clock value when the instruction started
    pub start: Time,

    /// Clock value when the instruction finished
    pub end: Time,

    /// True if this was the thread's first instruction
    pub first_run: bool,

    /// Wait time accrued by this instruction
    pub waited: Time,

    /// Thread whose instruction ran immediately before, if it forced a switch
    pub preempted_by: Option<ThreadId>,
}

// ============================================================================
// Engine
// ============================================================================

/// Single-pass replay engine
///
/// Owns the clock, the thread table and the event log for one replay.
/// Build a fresh engine for every replay; state is never reset.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    /// Validated configuration
    config: ReplayConfig,

    /// Simulation clock
    clock: SimulationClock,

    /// Per-thread accumulators
    threads: ThreadTable,

    /// Event log (all replay events)
    event_log: EventLog,

    /// Thread of the most recently replayed instruction
    previous_thread: Option<ThreadId>,

    /// Number of instructions replayed so far
    instructions_replayed: usize,
}

impl ReplayEngine {
    /// Create a new engine from configuration
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidConfig` if either count is zero.
    pub fn new(config: ReplayConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        Ok(Self {
            config,
            clock: SimulationClock::new(),
            threads: ThreadTable::new(config.num_threads),
            event_log: EventLog::new(),
            previous_thread: None,
            instructions_replayed: 0,
        })
    }

    /// Replay one instruction
    ///
    /// # Errors
    ///
    /// `SimulationError::ThreadOutOfRange` if the thread ID is not in
    /// `[1, num_threads]`. The engine is left untouched in that case.
    pub fn step(&mut self, instruction: &InstructionRecord) -> Result<StepResult, SimulationError> {
        let thread_id = instruction.thread_id();
        let num_threads = self.threads.len();
        let start = self.clock.now();

        let thread =
            self.threads
                .get_mut(thread_id)
                .ok_or(SimulationError::ThreadOutOfRange {
                    thread_id,
                    num_threads,
                })?;

        let mut first_run = false;
        let mut waited = 0;
        let mut preempted_by = None;

        if !thread.has_started {
            thread.has_started = true;
            thread.response_time = start;
            thread.wait_time = start;
            first_run = true;
        } else if thread.time_last_running > 0 {
            waited = start.saturating_sub(thread.time_last_running);
            thread.wait_time += waited;

            if let Some(previous) = self.previous_thread {
                if previous != thread_id {
                    thread.nonvoluntary_context_switches += 1;
                    preempted_by = Some(previous);
                }
            }
        }

        let end = self.clock.advance(instruction.burst());
        thread.time_last_running = end;
        thread.turnaround_time = end;

        self.previous_thread = Some(thread_id);
        self.instructions_replayed += 1;

        if first_run {
            self.event_log.log(Event::ThreadStarted {
                time: start,
                thread_id,
                response_time: start,
            });
        }
        if let Some(previous) = preempted_by {
            debug!(thread_id, preempted_by = previous, waited, "nonvoluntary context switch");
            self.event_log.log(Event::ContextSwitch {
                time: start,
                thread_id,
                preempted_by: previous,
                waited,
            });
        }
        self.event_log.log(Event::InstructionCompleted {
            time: end,
            thread_id,
            start,
            burst: instruction.burst(),
        });
        trace!(thread_id, start, end, "instruction replayed");

        Ok(StepResult {
            thread_id,
            start,
            end,
            first_run,
            waited,
            preempted_by,
        })
    }

    /// Replay every instruction of `queue` from its head
    ///
    /// Returns the total number of instructions replayed by this engine.
    ///
    /// # Errors
    ///
    /// Stops at the first failing instruction and returns its error.
    pub fn run(&mut self, queue: &mut InstructionQueue) -> Result<usize, SimulationError> {
        let mut current = queue.first().copied();
        while let Some(instruction) = current {
            self.step(&instruction)?;
            current = queue.next_instruction()?.copied();
        }

        debug!(
            instructions = self.instructions_replayed,
            elapsed = self.clock.now(),
            started_threads = self.threads.started_count(),
            "replay complete"
        );
        Ok(self.instructions_replayed)
    }

    /// Aggregate the current thread table into summary statistics
    pub fn summary(&self) -> Result<SummaryMetrics, SimulationError> {
        Ok(SummaryMetrics::aggregate(
            &self.threads,
            self.clock.now(),
            self.config.num_processors,
        )?)
    }

    /// Build the final report (summary plus per-thread breakdown)
    pub fn finish(&self) -> Result<ReplayReport, SimulationError> {
        let metrics = self.summary()?;
        Ok(ReplayReport::new(&self.threads, metrics))
    }

    /// Get the configuration
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Get the simulation clock
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Get the thread table
    pub fn threads(&self) -> &ThreadTable {
        &self.threads
    }

    /// Get the event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Number of instructions replayed so far
    pub fn instructions_replayed(&self) -> usize {
        self.instructions_replayed
    }
}

// ============================================================================
// Convenience entry points
// ============================================================================

/// Replay a queue under `config` and return the final report
pub fn replay_queue(
    config: ReplayConfig,
    queue: &mut InstructionQueue,
) -> Result<ReplayReport, SimulationError> {
    let mut engine = ReplayEngine::new(config)?;
    engine.run(queue)?;
    engine.finish()
}

/// Replay a parsed trace and return the final report
///
/// # Example
///
/// ```rust
/// use sched_replay_core_rs::{input::parse_trace, replay};
///
/// let trace = parse_trace("2 2 2\n1 3 0\n2 4 0\n").unwrap();
/// let report = replay(trace).unwrap();
/// assert_eq!(report.metrics.avg_turnaround_time, 5.0);
/// ```
pub fn replay(trace: Trace) -> Result<ReplayReport, SimulationError> {
    let Trace { header, mut queue } = trace;
    replay_queue(ReplayConfig::from(&header), &mut queue)
}
