/***************************************/
/*               Enums                 */
/***************************************/
/// Events delivered back to the controller when a timer expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Advances the stepper currently in flight.
    Tick,
    /// Closes the doors after the idle-open window runs out.
    AutoClose,
}

/// Identifies a pending timer so it can be cancelled before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u64);

/***************************************/
/*             Public API              */
/***************************************/
/**
 * Virtual-clock timer queue.
 *
 * The controller schedules every delayed continuation here instead of
 * sleeping. The run loop paces the queue against real elapsed time; the
 * tests advance it synchronously, which makes every animation and timeout
 * deterministic.
 *
 * Time never rewinds: `advance_to` with an earlier timestamp is a no-op
 * on the clock.
 */
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    pending: Vec<TimerEntry>,
}

struct TimerEntry {
    deadline_ms: u64,
    handle: TimerHandle,
    event: TimerEvent,
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler {
            now_ms: 0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedules `event` for delivery `delay_ms` after the current clock.
    pub fn after(&mut self, delay_ms: u64, event: TimerEvent) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(TimerEntry {
            deadline_ms: self.now_ms + delay_ms,
            handle,
            event,
        });
        handle
    }

    /// Removes a pending timer. Cancelling an already-fired handle is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|entry| entry.handle != handle);
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|entry| entry.handle == handle)
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|entry| entry.deadline_ms).min()
    }

    /// Moves the clock forward to `now_ms` and returns the events that came
    /// due, ordered by deadline (scheduling order breaks ties).
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<TimerEvent> {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }

        let mut due: Vec<TimerEntry> = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].deadline_ms <= self.now_ms {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by_key(|entry| (entry.deadline_ms, entry.handle.0));
        due.into_iter().map(|entry| entry.event).collect()
    }
}
