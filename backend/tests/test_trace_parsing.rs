//! Trace parsing tests
//!
//! Malformed input (missing or non-numeric tokens) must be reported as a
//! parse error before any replay starts.

use sched_replay_core_rs::{parse_trace, read_trace, ParseError, TraceHeader};

#[test]
fn test_header_and_instructions() {
    let trace = parse_trace("2 3 2\n1 10 0\n3 5 2\n").unwrap();

    assert_eq!(
        trace.header,
        TraceHeader {
            num_processors: 2,
            num_threads: 3,
            num_instructions: 2,
        }
    );

    let records: Vec<(i64, u64, i64)> = trace
        .queue
        .iter()
        .map(|i| (i.thread_id(), i.burst(), i.priority()))
        .collect();
    assert_eq!(records, vec![(1, 10, 0), (3, 5, 2)]);
}

#[test]
fn test_empty_input_reports_missing_header() {
    let err = parse_trace("").unwrap_err();
    assert!(matches!(
        err,
        ParseError::MissingToken {
            field: "num_processors",
            position: 0
        }
    ));
}

#[test]
fn test_truncated_instruction_is_error() {
    // Declares two instructions but the second has no priority
    let err = parse_trace("1 2 2\n1 3 0\n2 4").unwrap_err();
    assert!(matches!(
        err,
        ParseError::MissingToken {
            field: "priority",
            position: 8
        }
    ));
}

#[test]
fn test_fewer_instructions_than_declared_is_error() {
    let err = parse_trace("1 1 3\n1 3 0\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::MissingToken {
            field: "thread_id",
            ..
        }
    ));
}

#[test]
fn test_non_numeric_token_is_error() {
    let err = parse_trace("1 1 1\n1 five 0\n").unwrap_err();
    match err {
        ParseError::InvalidInteger {
            field,
            token,
            position,
        } => {
            assert_eq!(field, "burst");
            assert_eq!(token, "five");
            assert_eq!(position, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_negative_burst_is_error() {
    let err = parse_trace("1 1 1\n1 -5 0\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::NegativeValue {
            field: "burst",
            value: -5,
            ..
        }
    ));
}

#[test]
fn test_negative_header_is_error() {
    let err = parse_trace("1 -2 0\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::NegativeValue {
            field: "num_threads",
            ..
        }
    ));
}

#[test]
fn test_error_messages_name_the_field() {
    let err = parse_trace("1 1 x").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("num_instructions"), "{message}");
    assert!(message.contains("\"x\""), "{message}");
}

#[test]
fn test_read_trace_from_bytes() {
    let input: &[u8] = b"1 1 1 1 5 0";
    let trace = read_trace(input).unwrap();
    assert_eq!(trace.queue.total_burst(), 5);
}
