//! Domain models for the trace replay

pub mod event;
pub mod instruction;
pub mod queue;
pub mod thread;

// Re-exports
pub use event::{Event, EventLog};
pub use instruction::{InstructionRecord, ThreadId};
pub use queue::{InstructionQueue, QueueError};
pub use thread::{ThreadState, ThreadTable};
