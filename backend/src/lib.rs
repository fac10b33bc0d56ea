//! Scheduling Replay Core - Rust Engine
//!
//! Offline replay of a recorded trace of CPU bursts, producing classic
//! scheduling metrics: turnaround, wait and response time, nonvoluntary
//! context switches, CPU utilization and throughput.
//!
//! # Architecture
//!
//! - **core**: Simulation clock
//! - **models**: Domain types (InstructionRecord, InstructionQueue, ThreadTable, EventLog)
//! - **orchestrator**: Single-pass replay loop
//! - **metrics**: Aggregation and the final report
//! - **input**: Trace parsing
//!
//! # Critical Invariants
//!
//! 1. Replay order is input order; nothing is reordered or preempted
//! 2. The final clock equals the sum of all bursts
//! 3. Any malformed input aborts the replay with an error, never a partial report

// Module declarations
pub mod core;
pub mod input;
pub mod metrics;
pub mod models;
pub mod orchestrator;

// Re-exports for convenience
pub use crate::core::time::{SimulationClock, Time};
pub use input::{parse_trace, read_trace, ParseError, Trace, TraceHeader};
pub use metrics::{MetricsError, ReplayReport, SummaryMetrics, ThreadReport};
pub use models::{
    event::{Event, EventLog},
    instruction::{InstructionRecord, ThreadId},
    queue::{InstructionQueue, QueueError},
    thread::{ThreadState, ThreadTable},
};
pub use orchestrator::{
    replay, replay_queue, ReplayConfig, ReplayEngine, SimulationError, StepResult,
};
