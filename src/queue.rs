use crate::aircraft::{Aircraft, Priority};
use crate::state::OperatingState;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry ordering aircraft by priority, lowest id first among equals.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Queued(Aircraft);

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .priority
            .cmp(&other.0.priority)
            .then_with(|| other.0.id.cmp(&self.0.id))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-heap of aircraft waiting for a runway.
///
/// Not synchronized; the tower's lock guards every access.
#[derive(Debug, Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<Queued>,
}

impl PriorityQueue {
    pub fn push(&mut self, aircraft: Aircraft) {
        self.heap.push(Queued(aircraft));
    }

    pub fn pop(&mut self) -> Option<Aircraft> {
        self.heap.pop().map(|q| q.0)
    }

    pub fn peek(&self) -> Option<&Aircraft> {
        self.heap.peek().map(|q| &q.0)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drains the heap, recomputes each priority with `rule` and rebuilds it.
    pub fn reprioritize_all<F>(&mut self, state: OperatingState, rule: F)
    where
        F: Fn(&Aircraft, OperatingState) -> Priority,
    {
        let drained = std::mem::take(&mut self.heap);
        self.heap = drained
            .into_iter()
            .map(|Queued(mut aircraft)| {
                aircraft.priority = rule(&aircraft, state);
                Queued(aircraft)
            })
            .collect();
    }

    /// Aircraft in the order they would be popped.
    pub fn to_sorted_vec(&self) -> Vec<Aircraft> {
        let mut sorted = self.heap.clone().into_sorted_vec();
        sorted.reverse();
        sorted.into_iter().map(|q| q.0).collect()
    }
}

impl FromIterator<Aircraft> for PriorityQueue {
    fn from_iter<I: IntoIterator<Item = Aircraft>>(iter: I) -> Self {
        PriorityQueue {
            heap: iter.into_iter().map(Queued).collect(),
        }
    }
}
