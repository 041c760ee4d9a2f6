//! Deferred one-shot actions keyed by due time.
//!
//! Replaces "wait N seconds then resume": an action is scheduled for
//! `now + delay` and returned by [`TimerQueue::pop_due`] on the first tick
//! whose time has reached it.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Something to do later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedAction {
    /// Power-up reversal for the activation with this generation.
    PowerupExpiry { generation: u32 },
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due_secs: f64,
    seq: u64,
    action: TimedAction,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Earlier due time first, then scheduling order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.due_secs
            .total_cmp(&other.due_secs)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Min-ordered queue of scheduled actions.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once `now_secs + delay_secs` is reached.
    pub fn schedule(&mut self, now_secs: f64, delay_secs: f64, action: TimedAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Scheduled {
            due_secs: now_secs + delay_secs,
            seq,
            action,
        }));
    }

    /// Remove and return every action due at or before `now_secs`, in due order.
    pub fn pop_due(&mut self, now_secs: f64) -> Vec<TimedAction> {
        let mut due = Vec::new();
        while let Some(Reverse(next)) = self.heap.peek() {
            if next.due_secs > now_secs {
                break;
            }
            if let Some(Reverse(scheduled)) = self.heap.pop() {
                due.push(scheduled.action);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
