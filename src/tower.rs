use crate::aircraft::{Aircraft, Category};
use crate::queue::PriorityQueue;
use crate::state::OperatingState;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};


/// Result of a `set_state` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Code 7 or 8: nothing changed.
    Retained {
        received: OperatingState,
        current: OperatingState,
    },
    Changed {
        from: OperatingState,
        to: OperatingState,
        processing: bool,
    },
}

/// What the caller should show for one line coming off the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    State {
        transition: Transition,
        description: Option<&'static str>,
    },
    Text(String),
}

/// Outcome of one dispatcher pass under the tower lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    /// Disabled, halted or empty queue.
    Idle,
    /// Head of the queue did not match the exclusive category; it was requeued.
    Halted(Category),
    Cleared(Aircraft),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerSnapshot {
    pub state: OperatingState,
    pub processing: bool,
    pub exhausted: bool,
    /// Queued aircraft in dequeue order.
    pub queue: Vec<Aircraft>,
}

#[derive(Debug, Default)]
struct Inner {
    state: OperatingState,
    processing: bool,
    exhausted: bool,
    queue: PriorityQueue,
}

/// Owns the operating state, the flags and the waiting queue behind one lock.
#[derive(Debug, Default)]
pub struct Tower {
    inner: Mutex<Inner>,
}

impl Tower {
    pub fn new(fleet: impl IntoIterator<Item = Aircraft>) -> Tower {
        Tower {
            inner: Mutex::new(Inner {
                queue: fleet.into_iter().collect(),
                ..Inner::default()
            }),
        }
    }

    pub fn set_state(&self, code: OperatingState) -> Transition {
        let mut inner = self.lock();

        if code.is_retained() {
            debug!(received = %code, current = %inner.state, "state retained");
            return Transition::Retained {
                received: code,
                current: inner.state,
            };
        }

        let from = inner.state;
        inner.state = code;
        inner.processing = code.enables_processing();
        inner.exhausted = false;
        if inner.processing {
            inner
                .queue
                .reprioritize_all(code, |aircraft, state| state.priority_for(aircraft));
        }
        info!(
            from = %from,
            to = %code,
            processing = inner.processing,
            queued = inner.queue.len(),
            next = ?inner.queue.peek().map(|a| a.id),
            "state updated"
        );

        Transition::Changed {
            from,
            to: code,
            processing: inner.processing,
        }
    }

    /// Parses a raw feed line as a state code; anything else is free text.
    pub fn apply_incoming_line(&self, raw: &str) -> Feedback {
        let line = raw.trim();
        match line.parse::<i64>() {
            Ok(code) => {
                let code = OperatingState(code);
                Feedback::State {
                    transition: self.set_state(code),
                    description: code.description(),
                }
            }
            Err(_) => Feedback::Text(line.to_string()),
        }
    }

    pub fn next_departure(&self) -> Departure {
        let mut inner = self.lock();
        if inner.exhausted || !inner.processing || inner.queue.is_empty() {
            return Departure::Idle;
        }
        let Some(aircraft) = inner.queue.pop() else {
            return Departure::Idle;
        };

        let state = inner.state;
        match state.required_category() {
            Some(required) if !state.is_eligible(&aircraft) => {
                inner.queue.push(aircraft);
                inner.exhausted = true;
                info!(category = %required, "all aircraft of category {} processed", required);
                Departure::Halted(required)
            }
            _ => Departure::Cleared(aircraft),
        }
    }

    pub fn state(&self) -> OperatingState {
        self.lock().state
    }

    pub fn snapshot(&self) -> TowerSnapshot {
        let inner = self.lock();
        TowerSnapshot {
            state: inner.state,
            processing: inner.processing,
            exhausted: inner.exhausted,
            queue: inner.queue.to_sorted_vec(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
