// Host-driven timer queue. The engine never reads a wall clock: JS reports elapsed time
// and the queue fires whatever fell due, in deadline order.
// See DESIGN.md: timer.rs

use crate::types::Millis;

/// Handle to a scheduled timer. Cancelling through it is the only way to stop a timer early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Repeating { period_ms: u64 },
    OneShot,
}

#[derive(Debug, Clone)]
struct Timer<E> {
    id: TimerId,
    kind: TimerKind,
    due: Millis,
    event: E,
}

/// Virtual clock plus the set of live timers. `E` is whatever the owner wants back when a timer fires.
#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now: Millis,
    next_id: u64,
    timers: Vec<Timer<E>>,
}

impl<E: Copy> TimerQueue<E> {
    pub fn new() -> Self {
        TimerQueue {
            now: Millis::default(),
            next_id: 0,
            timers: Vec::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// Fire `event` every `period_ms`, first at `now + period_ms`. A zero period is treated as 1ms.
    pub fn schedule_repeating(&mut self, period_ms: u64, event: E) -> TimerId {
        let period_ms = period_ms.max(1);
        self.insert(TimerKind::Repeating { period_ms }, period_ms, event)
    }

    /// Fire `event` once at `now + delay_ms`.
    pub fn schedule_once(&mut self, delay_ms: u64, event: E) -> TimerId {
        self.insert(TimerKind::OneShot, delay_ms, event)
    }

    /// Returns false if the timer already fired (one-shot) or was cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        cancelled
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to its deadline.
    /// Repeating timers are re-armed one period later, so a long gap replays every missed period.
    /// Ties go to the timer scheduled first.
    pub fn pop_due(&mut self, until: Millis) -> Option<(TimerId, E)> {
        let slot = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[slot];
        let fired = (timer.id, timer.event);
        let kind = timer.kind;
        self.now = self.now.max(timer.due);

        match kind {
            TimerKind::Repeating { period_ms } => {
                timer.due = timer.due.saturating_add(period_ms);
            }
            TimerKind::OneShot => {
                self.timers.swap_remove(slot);
            }
        }

        Some(fired)
    }

    /// Move the clock forward without firing anything. Never moves it backwards.
    pub fn settle_at(&mut self, at: Millis) {
        self.now = self.now.max(at);
    }

    fn insert(&mut self, kind: TimerKind, delay_ms: u64, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            kind,
            due: self.now.saturating_add(delay_ms),
            event,
        });
        id
    }
}

impl<E: Copy> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
