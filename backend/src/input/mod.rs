//! Trace input
//!
//! Parses the whitespace-separated trace format into a header and an
//! instruction queue:
//!
//! ```text
//! num_processors num_threads num_instructions
//! thread_id burst priority     (num_instructions times)
//! ```
//!
//! Tokens may be split across lines arbitrarily. Anything after the last
//! declared instruction is ignored. Thread IDs are not range-checked here;
//! the replay engine owns that check.

use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::instruction::InstructionRecord;
use crate::models::queue::InstructionQueue;

/// Upper bound on up-front queue allocation from an untrusted header
const MAX_PREALLOCATED_INSTRUCTIONS: usize = 1 << 16;

/// Errors that can occur while reading a trace
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unexpected end of input: expected {field} at token {position}")]
    MissingToken { field: &'static str, position: usize },

    #[error("Invalid integer for {field} at token {position}: {token:?}")]
    InvalidInteger {
        field: &'static str,
        token: String,
        position: usize,
    },

    #[error("{field} must not be negative (got {value} at token {position})")]
    NegativeValue {
        field: &'static str,
        value: i64,
        position: usize,
    },

    #[error("Failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}

/// The three counts at the head of a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceHeader {
    pub num_processors: u64,
    pub num_threads: usize,
    pub num_instructions: usize,
}

/// A fully parsed trace
#[derive(Debug, Clone)]
pub struct Trace {
    pub header: TraceHeader,
    pub queue: InstructionQueue,
}

/// Sequential reader over whitespace-separated integer tokens
struct TokenReader<'a> {
    tokens: std::str::SplitAsciiWhitespace<'a>,
    position: usize,
}

impl<'a> TokenReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            tokens: input.split_ascii_whitespace(),
            position: 0,
        }
    }

    fn next_i64(&mut self, field: &'static str) -> Result<i64, ParseError> {
        let position = self.position;
        let token = self
            .tokens
            .next()
            .ok_or(ParseError::MissingToken { field, position })?;
        self.position += 1;

        token.parse::<i64>().map_err(|_| ParseError::InvalidInteger {
            field,
            token: token.to_string(),
            position,
        })
    }

    fn next_u64(&mut self, field: &'static str) -> Result<u64, ParseError> {
        let position = self.position;
        let value = self.next_i64(field)?;
        u64::try_from(value).map_err(|_| ParseError::NegativeValue {
            field,
            value,
            position,
        })
    }

    fn next_usize(&mut self, field: &'static str) -> Result<usize, ParseError> {
        let position = self.position;
        let value = self.next_u64(field)?;
        usize::try_from(value).map_err(|_| ParseError::InvalidInteger {
            field,
            token: value.to_string(),
            position,
        })
    }
}

/// Parse a complete trace from a string
///
/// # Example
///
/// ```rust
/// use sched_replay_core_rs::input::parse_trace;
///
/// let trace = parse_trace("1 1 1\n1 5 0\n").unwrap();
/// assert_eq!(trace.header.num_threads, 1);
/// assert_eq!(trace.queue.len(), 1);
/// ```
pub fn parse_trace(input: &str) -> Result<Trace, ParseError> {
    let mut reader = TokenReader::new(input);

    let header = TraceHeader {
        num_processors: reader.next_u64("num_processors")?,
        num_threads: reader.next_usize("num_threads")?,
        num_instructions: reader.next_usize("num_instructions")?,
    };

    let mut queue =
        InstructionQueue::with_capacity(header.num_instructions.min(MAX_PREALLOCATED_INSTRUCTIONS));
    for _ in 0..header.num_instructions {
        let thread_id = reader.next_i64("thread_id")?;
        let burst = reader.next_u64("burst")?;
        let priority = reader.next_i64("priority")?;
        queue.append(InstructionRecord::new(thread_id, burst, priority));
    }

    debug!(
        num_processors = header.num_processors,
        num_threads = header.num_threads,
        num_instructions = header.num_instructions,
        "trace parsed"
    );

    Ok(Trace { header, queue })
}

/// Read and parse a complete trace from any reader
pub fn read_trace<R: Read>(mut reader: R) -> Result<Trace, ParseError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_trace(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_may_span_lines_freely() {
        let trace = parse_trace("2\n2 2 1 3\n0 2\n4 0").unwrap();
        assert_eq!(trace.header.num_processors, 2);
        let threads: Vec<i64> = trace.queue.iter().map(|i| i.thread_id()).collect();
        assert_eq!(threads, vec![1, 2]);
    }

    #[test]
    fn test_trailing_tokens_are_ignored() {
        let trace = parse_trace("1 1 1 1 5 0 9 9 9").unwrap();
        assert_eq!(trace.queue.len(), 1);
    }

    #[test]
    fn test_negative_thread_id_is_accepted_for_engine_check() {
        let trace = parse_trace("1 1 1 -1 5 0").unwrap();
        assert_eq!(trace.queue.iter().next().map(|i| i.thread_id()), Some(-1));
    }

    #[test]
    fn test_read_trace_from_reader() {
        let trace = read_trace("1 2 0".as_bytes()).unwrap();
        assert_eq!(trace.header.num_threads, 2);
        assert!(trace.queue.is_empty());
    }
}
