/// Per-purpose one-shot timers with cancel-and-reschedule semantics.
///
/// Scheduling an already pending timer replaces its deadline, so rapid repeated triggers
/// collapse into the last-scheduled call. Deadlines are polled from `DomList::tick` with
/// host-supplied time; there are no timer threads, which keeps the engine deterministic in
/// simulations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Timer {
    /// Coalesces user scroll events before the visible-range recompute runs.
    Scroll = 0,
    /// Scrollbar-widget resync after a settled materialization batch.
    ScrollbarSync = 1,
    /// Caller "content updated" notification, at twice the settle delay.
    ContentNotify = 2,
}

const TIMER_COUNT: usize = 3;

#[derive(Clone, Debug, Default)]
pub(crate) struct Debouncer {
    deadlines: [Option<u64>; TIMER_COUNT],
}

impl Debouncer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn schedule(&mut self, timer: Timer, deadline_ms: u64) {
        self.deadlines[timer as usize] = Some(deadline_ms);
    }

    pub(crate) fn cancel_all(&mut self) {
        self.deadlines = [None; TIMER_COUNT];
    }

    #[cfg(test)]
    pub(crate) fn is_scheduled(&self, timer: Timer) -> bool {
        self.deadlines[timer as usize].is_some()
    }

    /// Clears and reports a timer whose deadline has passed.
    pub(crate) fn take_due(&mut self, timer: Timer, now_ms: u64) -> bool {
        match self.deadlines[timer as usize] {
            Some(deadline) if now_ms >= deadline => {
                self.deadlines[timer as usize] = None;
                true
            }
            _ => false,
        }
    }
}
