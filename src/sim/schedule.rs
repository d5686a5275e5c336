//! Session-scoped timed events
//!
//! Wall-clock behaviour (the level countdown, invincibility windows) runs on
//! a session clock advanced by the host's elapsed frame time, independent of
//! how many simulation frames ran. Every event remembers the session it was
//! scheduled in; starting a new session makes all older events stale, and
//! stale events are dropped when they come due instead of firing.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// Something that happens at a point in session time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedEvent {
    /// One second of the level time budget elapsed
    CountdownTick,
    /// An invincibility window issued as `grant` ends
    InvincibilityExpired { grant: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled {
    due_ms: f64,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    session: u32,
    event: TimedEvent,
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
    // Reversed so the max-heap pops the earliest event first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Time-ordered queue of session-tagged events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    now_ms: f64,
    session: u32,
    next_seq: u64,
    queue: BinaryHeap<Scheduled>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the current session began
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Start a new session: clock back to zero, everything pending goes stale
    pub fn begin_session(&mut self) -> u32 {
        self.session = self.session.wrapping_add(1);
        self.now_ms = 0.0;
        self.session
    }

    /// Advance the session clock by the host's elapsed wall time
    pub fn advance(&mut self, elapsed_ms: f64) {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.now_ms += elapsed_ms;
        }
    }

    /// Schedule `event` to fire `delay_ms` from now in the current session
    pub fn schedule(&mut self, delay_ms: f64, event: TimedEvent) {
        self.schedule_at(self.now_ms + delay_ms.max(0.0), event);
    }

    /// Schedule `event` at an absolute session time
    pub fn schedule_at(&mut self, due_ms: f64, event: TimedEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due_ms,
            seq,
            session: self.session,
            event,
        });
    }

    /// Pop the next live event that is due, returning its due time.
    ///
    /// Stale events met on the way are discarded.
    pub fn pop_due(&mut self) -> Option<(f64, TimedEvent)> {
        while let Some(next) = self.queue.peek() {
            if next.session == self.session && next.due_ms > self.now_ms {
                return None;
            }
            let next = self.queue.pop()?;
            if next.session == self.session {
                return Some((next.due_ms, next.event));
            }
            log::trace!("Dropping stale {:?} from session {}", next.event, next.session);
        }
        None
    }

    /// Events still waiting to fire in the current session
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|e| e.session == self.session)
            .count()
    }
}
