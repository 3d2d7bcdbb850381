//! One-shot timers driven by the event loop.
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Default)]
pub struct Timers {
    next_id: u64,
    pending: Vec<(TimerId, Instant)>,
}

impl Timers {
    pub fn schedule(&mut self, after: Duration) -> TimerId {
        self.schedule_at(Instant::now() + after)
    }

    pub fn schedule_at(&mut self, deadline: Instant) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push((id, deadline));
        id
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| *pending != id);
        self.pending.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|(pending, _)| *pending == id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(_, deadline)| *deadline).min()
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn take_expired(&mut self, now: Instant) -> Vec<TimerId> {
        let (mut expired, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|(_, deadline)| *deadline <= now);
        self.pending = pending;
        expired.sort_by_key(|(_, deadline)| *deadline);
        expired.into_iter().map(|(id, _)| id).collect()
    }
}
