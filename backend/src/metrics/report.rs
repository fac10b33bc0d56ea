//! Replay report
//!
//! Final output of a replay: the summary statistics plus a per-thread
//! breakdown. The text form is the fixed seven-line report:
//!
//! ```text
//! num_threads
//! total_nonvoluntary_context_switches
//! cpu_utilization_percent   (2 decimals)
//! throughput                (2 decimals)
//! avg_turnaround_time       (2 decimals)
//! avg_wait_time             (2 decimals)
//! avg_response_time         (2 decimals)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::time::Time;
use crate::metrics::SummaryMetrics;
use crate::models::instruction::ThreadId;
use crate::models::thread::ThreadTable;

/// Final per-thread figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadReport {
    pub thread_id: ThreadId,
    pub started: bool,
    pub turnaround_time: Time,
    pub wait_time: Time,
    pub response_time: Time,
    pub nonvoluntary_context_switches: u64,
}

/// Complete result of one replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Declared thread count
    pub num_threads: usize,

    /// Aggregate statistics
    pub metrics: SummaryMetrics,

    /// One entry per declared thread, in ID order
    pub threads: Vec<ThreadReport>,
}

impl ReplayReport {
    /// Build a report from a finished thread table and its summary
    pub fn new(threads: &ThreadTable, metrics: SummaryMetrics) -> Self {
        let per_thread = threads
            .iter()
            .map(|(thread_id, state)| ThreadReport {
                thread_id,
                started: state.has_started,
                turnaround_time: state.turnaround_time,
                wait_time: state.wait_time,
                response_time: state.response_time,
                nonvoluntary_context_switches: state.nonvoluntary_context_switches,
            })
            .collect();

        Self {
            num_threads: threads.len(),
            metrics,
            threads: per_thread,
        }
    }

    /// The seven report lines, in output order
    ///
    /// # Example
    ///
    /// ```rust
    /// use sched_replay_core_rs::{InstructionQueue, InstructionRecord, ReplayConfig, replay_queue};
    ///
    /// let mut queue: InstructionQueue = vec![InstructionRecord::new(1, 5, 0)].into_iter().collect();
    /// let report = replay_queue(ReplayConfig::new(1, 1), &mut queue).unwrap();
    ///
    /// assert_eq!(
    ///     report.lines(),
    ///     vec!["1", "0", "100.00", "0.20", "5.00", "0.00", "0.00"]
    /// );
    /// ```
    pub fn lines(&self) -> Vec<String> {
        let m = &self.metrics;
        vec![
            self.num_threads.to_string(),
            m.total_nonvoluntary_context_switches.to_string(),
            format!("{:.2}", m.cpu_utilization_percent),
            format!("{:.2}", m.throughput),
            format!("{:.2}", m.avg_turnaround_time),
            format!("{:.2}", m.avg_wait_time),
            format!("{:.2}", m.avg_response_time),
        ]
    }

    /// Per-thread breakdown, one line per declared thread
    pub fn thread_lines(&self) -> Vec<String> {
        self.threads
            .iter()
            .map(|t| {
                format!(
                    "thread {}: turnaround={} wait={} response={} switches={}",
                    t.thread_id,
                    t.turnaround_time,
                    t.wait_time,
                    t.response_time,
                    t.nonvoluntary_context_switches
                )
            })
            .collect()
    }

    /// Serialize the full report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
