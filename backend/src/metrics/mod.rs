//! Metrics Aggregator
//!
//! Reduces the completed thread table and final clock value into the
//! summary statistics reported at the end of a replay.
//!
//! # Formulas
//!
//! ```text
//! total_nonvoluntary_context_switches = Σ switches
//! avg_turnaround_time  = Σ turnaround / num_threads
//! avg_wait_time        = Σ wait       / num_threads
//! avg_response_time    = Σ response   / num_threads
//! cpu_utilization      = 100 / num_processors
//! throughput           = num_threads / elapsed_time
//! ```
//!
//! Utilization is a fixed function of the processor count, not of observed
//! busy time. Degenerate divisors are reported as `MetricsError` rather than
//! producing NaN or infinity.

pub mod report;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::time::Time;
use crate::models::thread::ThreadTable;

pub use report::{ReplayReport, ThreadReport};

/// Errors raised when summary statistics would divide by zero
#[derive(Debug, Error, PartialEq)]
pub enum MetricsError {
    #[error("Cannot average over zero threads")]
    NoThreads,

    #[error("Cannot compute utilization for zero processors")]
    NoProcessors,

    #[error("Cannot compute throughput: no simulated time elapsed")]
    ZeroElapsedTime,
}

/// Aggregate statistics for a completed replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Sum of nonvoluntary context switches across all threads
    pub total_nonvoluntary_context_switches: u64,

    /// `100 / num_processors`
    pub cpu_utilization_percent: f64,

    /// Threads completed per simulated time unit
    pub throughput: f64,

    /// Mean completion time of each thread's last instruction
    pub avg_turnaround_time: f64,

    /// Mean time spent ready but not running
    pub avg_wait_time: f64,

    /// Mean time until first execution
    pub avg_response_time: f64,

    /// Final clock value
    pub elapsed_time: Time,
}

impl SummaryMetrics {
    /// Aggregate a thread table into summary statistics
    ///
    /// # Arguments
    ///
    /// * `threads` - Completed thread table (its length is `num_threads`)
    /// * `elapsed_time` - Final clock value
    /// * `num_processors` - Processor count from the trace header
    ///
    /// # Errors
    ///
    /// Returns `MetricsError` if any divisor is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sched_replay_core_rs::{SummaryMetrics, ThreadTable};
    ///
    /// let mut table = ThreadTable::new(1);
    /// let t = table.get_mut(1).unwrap();
    /// t.has_started = true;
    /// t.turnaround_time = 5;
    ///
    /// let metrics = SummaryMetrics::aggregate(&table, 5, 1).unwrap();
    /// assert_eq!(metrics.cpu_utilization_percent, 100.0);
    /// assert_eq!(metrics.throughput, 0.2);
    /// ```
    pub fn aggregate(
        threads: &ThreadTable,
        elapsed_time: Time,
        num_processors: u64,
    ) -> Result<Self, MetricsError> {
        if threads.is_empty() {
            return Err(MetricsError::NoThreads);
        }
        if num_processors == 0 {
            return Err(MetricsError::NoProcessors);
        }
        if elapsed_time == 0 {
            return Err(MetricsError::ZeroElapsedTime);
        }

        let mut total_switches: u64 = 0;
        let mut total_turnaround: f64 = 0.0;
        let mut total_wait: f64 = 0.0;
        let mut total_response: f64 = 0.0;

        for (_, state) in threads.iter() {
            total_switches += state.nonvoluntary_context_switches;
            total_turnaround += state.turnaround_time as f64;
            total_wait += state.wait_time as f64;
            total_response += state.response_time as f64;
        }

        let num_threads = threads.len() as f64;

        Ok(Self {
            total_nonvoluntary_context_switches: total_switches,
            cpu_utilization_percent: cpu_utilization(num_processors)?,
            throughput: num_threads / elapsed_time as f64,
            avg_turnaround_time: total_turnaround / num_threads,
            avg_wait_time: total_wait / num_threads,
            avg_response_time: total_response / num_threads,
            elapsed_time,
        })
    }
}

/// CPU utilization percentage for a processor count
///
/// ```rust
/// use sched_replay_core_rs::metrics::cpu_utilization;
///
/// assert_eq!(cpu_utilization(2).unwrap(), 50.0);
/// ```
pub fn cpu_utilization(num_processors: u64) -> Result<f64, MetricsError> {
    if num_processors == 0 {
        return Err(MetricsError::NoProcessors);
    }
    Ok(100.0 / num_processors as f64)
}
