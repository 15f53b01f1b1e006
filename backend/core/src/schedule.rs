//! Timed reveals on a logical clock.
//!
//! Each screen owns one `Schedule`. Time only moves when the owner calls
//! [`Schedule::pop_until`] / [`Schedule::settle`], so the same code runs
//! against the wall clock in the terminal and against fixed steps in tests.
//! Dropping the schedule drops every pending callback.

use std::time::Duration;

#[derive(Debug)]
struct Entry<E> {
    due: Duration,
    seq: u64,
    event: E,
}

#[derive(Debug)]
pub struct Schedule<E> {
    now: Duration,
    seq: u64,
    pending: Vec<Entry<E>>,
}

impl<E> Default for Schedule<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Schedule<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            pending: Vec::new(),
        }
    }

    /// Time elapsed since the owning screen was mounted.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_in(&mut self, delay: Duration, event: E) {
        self.seq += 1;
        self.pending.push(Entry {
            due: self.now + delay,
            seq: self.seq,
            event,
        });
    }

    /// Pops the earliest event due at or before `horizon` and moves the clock
    /// to its due time. Ties fire in scheduling order.
    pub fn pop_until(&mut self, horizon: Duration) -> Option<E> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= horizon)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;
        let entry = self.pending.swap_remove(index);
        self.now = self.now.max(entry.due);
        Some(entry.event)
    }

    /// Moves the clock to `horizon` once every due event has been popped.
    pub fn settle(&mut self, horizon: Duration) {
        self.now = self.now.max(horizon);
    }

    /// Convenience for owners that need no follow-up scheduling.
    pub fn advance(&mut self, dt: Duration) -> Vec<E> {
        let horizon = self.now + dt;
        let mut fired = Vec::new();
        while let Some(event) = self.pop_until(horizon) {
            fired.push(event);
        }
        self.settle(horizon);
        fired
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|e| e.due.saturating_sub(self.now))
            .min()
    }

    /// Drops every pending event; returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
