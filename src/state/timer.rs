//! One-shot timers on the single-threaded update path.
//!
//! The owner drives time explicitly by calling [`TimerQueue::pop_due`] from its
//! event loop with the current instant. Tasks never run concurrently with
//! anything else and cannot be cancelled once scheduled.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: Instant,
    seq: u64,
    task: T,
}

/// Queue of one-shot tasks ordered by due time, then scheduling order.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    entries: Vec<Scheduled<T>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to become due `delay` after `now`.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, task: T) {
        self.schedule_at(now + delay, task);
    }

    /// Schedule `task` to become due at `due`.
    pub fn schedule_at(&mut self, due: Instant, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Scheduled { due, seq, task });
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.due <= now);
        self.entries = pending;
        due.sort_by_key(|entry| (entry.due, entry.seq));
        due.into_iter().map(|entry| entry.task).collect()
    }

    /// Earliest due time, if any task is queued.
    pub fn next_due(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Most recently scheduled task still queued.
    pub fn latest(&self) -> Option<&T> {
        self.entries
            .iter()
            .max_by_key(|entry| entry.seq)
            .map(|entry| &entry.task)
    }

    /// Iterate queued tasks in no particular order.
    pub fn tasks(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|entry| &entry.task)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no task is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
