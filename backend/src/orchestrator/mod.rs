//! Orchestrator - main replay loop
//!
//! Drives the instruction queue through the replay engine and hands the
//! finished thread table to the metrics aggregator.
//!
//! See `engine.rs` for full implementation.

pub mod engine;


// Re-export main types for convenience
pub use engine::{replay, replay_queue, ReplayConfig, ReplayEngine, SimulationError, StepResult};
