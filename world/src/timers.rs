//! Virtual-clock timer queue holding deferred world actions.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    time::Duration,
};

use simon_core::DeferredAction;

/// Action waiting for its due instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    due: Duration,
    sequence: u64,
    action: DeferredAction,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-queue of deferred actions ordered by due instant, then insertion order.
#[derive(Debug, Default)]
pub(crate) struct TimerQueue {
    heap: BinaryHeap<Reverse<Pending>>,
    next_sequence: u64,
}

impl TimerQueue {
    /// Creates an empty queue.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues an action to fire at the provided instant.
    pub(crate) fn push(&mut self, due: Duration, action: DeferredAction) {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.heap.push(Reverse(Pending {
            due,
            sequence,
            action,
        }));
    }

    /// Earliest instant at which an action is due.
    pub(crate) fn next_due(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(pending)| pending.due)
    }

    /// Removes every action due at or before `instant`, in firing order.
    pub(crate) fn drain_due(&mut self, instant: Duration) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        while let Some(Reverse(pending)) = self.heap.peek() {
            if pending.due > instant {
                break;
            }
            if let Some(Reverse(pending)) = self.heap.pop() {
                due.push(pending.action);
            }
        }
        due
    }

    /// Drops every pending action.
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }

    /// Number of pending actions.
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
