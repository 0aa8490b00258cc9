//! Deferred task scheduler
//!
//! Cancellable one-shot tasks on a host-driven clock. Every timer a
//! scrollbars instance needs (settle remeasure, auto-hide, scroll-stop
//! detection) lives here, keyed to the instance, so teardown can cancel
//! all of them at once.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TaskId;
}

#[derive(Debug, Clone, Copy)]
struct Task<T> {
    due: Duration,
    /// Tie-breaker so tasks due at the same instant run in schedule order
    seq: u64,
    kind: T,
}

/// Scheduler for deferred tasks of kind `T`
#[derive(Debug)]
pub struct TaskScheduler<T: Copy> {
    tasks: SlotMap<TaskId, Task<T>>,
    now: Duration,
    next_seq: u64,
}

impl<T: Copy> TaskScheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            now: Duration::ZERO,
            next_seq: 0,
        }
    }

    /// Current scheduler time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `kind` once, `delay` from now
    pub fn schedule(&mut self, delay: Duration, kind: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.insert(Task {
            due: self.now.saturating_add(delay),
            seq,
            kind,
        })
    }

    /// Cancel a pending task; returns false if it already ran or was cancelled
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.remove(id).is_some()
    }

    /// Cancel every pending task
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Number of pending tasks
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Pop the earliest task due at or before `until`, advancing the clock
    /// to its due time
    ///
    /// Callers drain in a loop so tasks scheduled by earlier tasks within
    /// the same window still run in order; [`Self::finish_advance`] then
    /// moves the clock to `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskId, T)> {
        let (id, task) = self
            .tasks
            .iter()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(id, t)| (id, *t))?;
        self.tasks.remove(id);
        self.now = self.now.max(task.due);
        Some((id, task.kind))
    }

    /// Move the clock forward to `until` after draining due tasks
    pub fn finish_advance(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl<T: Copy> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
