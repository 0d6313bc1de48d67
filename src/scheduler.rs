/// Opaque handle for a scheduled entry, usable to cancel it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<E> {
    handle: TimerHandle,
    due_ms: u64,
    event: E,
}

/// Single logical timer driving every delayed state transition.
///
/// The host measures wall-clock time and feeds it in through [`advance`];
/// the scheduler itself never sleeps or spawns anything. Entries fire once
/// and are removed; repeating cadences re-arm themselves from their event
/// handlers, like a self-rescheduling timeout.
///
/// [`advance`]: Scheduler::advance
#[derive(Debug)]
pub struct Scheduler<E> {
    now_ms: u64,
    next_handle: u64,
    pending: Vec<Entry<E>>,
}

impl<E> Scheduler<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_handle: 0,
            pending: Vec::new(),
        }
    }

    /// Schedules `event` to fire `after_ms` from the current logical time.
    pub fn schedule(&mut self, after_ms: u64, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Entry {
            handle,
            due_ms: self.now_ms + after_ms,
            event,
        });
        handle
    }

    /// Cancels a pending entry. Ignores handles that already fired.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|entry| entry.handle != handle);
    }

    /// Advances logical time by `delta_ms` and returns the events that came
    /// due, ordered by due time (creation order breaks ties).
    pub fn advance(&mut self, delta_ms: u64) -> Vec<E> {
        self.now_ms += delta_ms;

        let now = self.now_ms;
        let mut due: Vec<Entry<E>> = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].due_ms <= now {
                due.push(self.pending.swap_remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by_key(|entry| (entry.due_ms, entry.handle.0));
        due.into_iter().map(|entry| entry.event).collect()
    }

    /// Logical milliseconds elapsed since construction.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}
