//! Tests for InstructionQueue cursor semantics

use sched_replay_core_rs::{InstructionQueue, InstructionRecord, QueueError};

fn queue_of(records: &[(i64, u64, i64)]) -> InstructionQueue {
    let mut queue = InstructionQueue::new();
    for &(tid, burst, priority) in records {
        queue.append(InstructionRecord::new(tid, burst, priority));
    }
    queue
}

#[test]
fn test_traversal_follows_insertion_order() {
    let mut queue = queue_of(&[(3, 1, 0), (1, 2, 0), (2, 3, 0), (1, 4, 0)]);

    let mut seen = Vec::new();
    let mut current = queue.first().copied();
    while let Some(inst) = current {
        seen.push((inst.thread_id(), inst.burst()));
        current = queue.next_instruction().unwrap().copied();
    }

    assert_eq!(seen, vec![(3, 1), (1, 2), (2, 3), (1, 4)]);
}

#[test]
fn test_first_on_empty_queue() {
    let mut queue = InstructionQueue::new();
    assert!(queue.is_empty());
    assert!(queue.first().is_none());
}

#[test]
fn test_next_without_first_is_rejected() {
    let mut queue = queue_of(&[(1, 1, 0)]);
    assert_eq!(
        queue.next_instruction().unwrap_err(),
        QueueError::CursorNotPositioned
    );
}

#[test]
fn test_first_restarts_traversal() {
    let mut queue = queue_of(&[(1, 1, 0), (2, 2, 0)]);

    assert_eq!(queue.first().map(|i| i.thread_id()), Some(1));
    assert_eq!(queue.next_instruction().unwrap().map(|i| i.thread_id()), Some(2));
    assert_eq!(queue.next_instruction().unwrap(), None);

    assert_eq!(queue.first().map(|i| i.thread_id()), Some(1));
}

#[test]
fn test_iter_does_not_move_cursor() {
    let mut queue = queue_of(&[(1, 1, 0), (2, 2, 0)]);
    queue.first();

    assert_eq!(queue.iter().count(), 2);
    assert_eq!(queue.next_instruction().unwrap().map(|i| i.thread_id()), Some(2));
}

#[test]
fn test_priority_is_carried_unchanged() {
    let queue = queue_of(&[(1, 1, 7), (1, 1, -2)]);
    let priorities: Vec<i64> = queue.iter().map(|i| i.priority()).collect();
    assert_eq!(priorities, vec![7, -2]);
}

#[test]
fn test_total_burst() {
    let queue = queue_of(&[(1, 5, 0), (2, 0, 0), (1, 7, 0)]);
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.total_burst(), 12);
}
