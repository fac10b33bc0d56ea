//! Report formatting tests
//!
//! The text report is exactly seven lines: two integers followed by five
//! values rounded to two decimals.

use sched_replay_core_rs::{parse_trace, replay, ReplayReport};

fn report_for(input: &str) -> ReplayReport {
    replay(parse_trace(input).unwrap()).unwrap()
}

#[test]
fn test_text_report_has_seven_lines() {
    let report = report_for("2 2 2\n1 3 0\n2 4 0\n");
    let text = report.to_string();

    assert_eq!(text, "2\n0\n50.00\n0.29\n5.00\n1.50\n1.50\n");
    assert_eq!(text.lines().count(), 7);
}

#[test]
fn test_rounding_to_two_decimals() {
    // 3 processors -> 33.333..%, 1 thread over 3 units -> 0.333..
    let report = report_for("3 1 1\n1 3 0\n");
    let lines = report.lines();
    assert_eq!(lines[2], "33.33");
    assert_eq!(lines[3], "0.33");
}

#[test]
fn test_thread_lines() {
    let report = report_for("1 2 3\n1 2 0\n2 2 0\n1 2 0\n");
    assert_eq!(
        report.thread_lines(),
        vec![
            "thread 1: turnaround=6 wait=2 response=0 switches=1",
            "thread 2: turnaround=4 wait=2 response=2 switches=0",
        ]
    );
}

#[test]
fn test_json_report_preserves_figures() {
    let report = report_for("2 2 2\n1 3 0\n2 4 0\n");
    let json = report.to_json().unwrap();
    let decoded: ReplayReport = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded.lines(), report.lines());
    assert_eq!(decoded.threads, report.threads);
    assert!(json.contains("\"avg_wait_time\": 1.5"));
}
