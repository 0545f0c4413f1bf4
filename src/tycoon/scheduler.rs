//! Discrete-event timer queue on a virtual millisecond clock.
//!
//! Every engine timer (cooldown completion, passive tick, manager interval)
//! is an entry here. Entries due at the same millisecond pop in the order
//! they were scheduled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Manual earn countdown for business at index finished.
    CooldownComplete(usize),
    /// Passive income payout.
    PassiveTick,
    /// Manager of business at index performs an earn.
    ManagerEarn(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub fire_at: u64,
    seq: u64,
    pub kind: EventKind,
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.fire_at, self.seq).cmp(&(other.fire_at, other.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<ScheduledEvent>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `kind` to fire `delay_ms` after the current time.
    pub fn schedule_in(&mut self, delay_ms: u64, kind: EventKind) -> u64 {
        let fire_at = self.now.saturating_add(delay_ms);
        self.schedule_at(fire_at, kind);
        fire_at
    }

    pub fn schedule_at(&mut self, fire_at: u64, kind: EventKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(ScheduledEvent { fire_at, seq, kind }));
    }

    /// Pop the earliest event due at or before `until`, moving the clock to
    /// its fire time. Returns None once nothing else is due.
    pub fn pop_due(&mut self, until: u64) -> Option<ScheduledEvent> {
        let Reverse(next) = self.queue.peek()?;
        if next.fire_at > until {
            return None;
        }
        let Reverse(event) = self.queue.pop()?;
        self.now = self.now.max(event.fire_at);
        Some(event)
    }

    /// Move the clock forward. Never moves backwards.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    /// Fire time of the next event matching `pred`, if any is queued.
    pub fn next_fire_time(&self, pred: impl Fn(&EventKind) -> bool) -> Option<u64> {
        self.queue
            .iter()
            .filter(|Reverse(e)| pred(&e.kind))
            .map(|Reverse(e)| e.fire_at)
            .min()
    }
}

/// Convert seconds to whole milliseconds, treating negatives as zero.
pub fn seconds_to_ms(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut s = Scheduler::new();
        s.schedule_in(300, EventKind::PassiveTick);
        s.schedule_in(100, EventKind::CooldownComplete(0));
        s.schedule_in(200, EventKind::ManagerEarn(1));

        assert_eq!(s.pop_due(1000).unwrap().kind, EventKind::CooldownComplete(0));
        assert_eq!(s.now(), 100);
        assert_eq!(s.pop_due(1000).unwrap().kind, EventKind::ManagerEarn(1));
        assert_eq!(s.pop_due(1000).unwrap().kind, EventKind::PassiveTick);
        assert!(s.pop_due(1000).is_none());
    }

    #[test]
    fn ties_keep_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule_in(100, EventKind::ManagerEarn(2));
        s.schedule_in(100, EventKind::PassiveTick);
        s.schedule_in(100, EventKind::CooldownComplete(0));
        let kinds: Vec<EventKind> = std::iter::from_fn(|| s.pop_due(100).map(|e| e.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::ManagerEarn(2),
                EventKind::PassiveTick,
                EventKind::CooldownComplete(0)
            ]
        );
    }

    #[test]
    fn future_events_stay_queued() {
        let mut s = Scheduler::new();
        s.schedule_in(500, EventKind::PassiveTick);
        assert!(s.pop_due(499).is_none());
        assert!(s.pop_due(500).is_some());
    }

    #[test]
    fn clock_never_goes_backwards() {
        let mut s = Scheduler::new();
        s.set_now(1000);
        s.set_now(400);
        assert_eq!(s.now(), 1000);
    }

    #[test]
    fn schedule_is_relative_to_now() {
        let mut s = Scheduler::new();
        s.set_now(2000);
        assert_eq!(s.schedule_in(250, EventKind::PassiveTick), 2250);
        assert_eq!(s.next_fire_time(|k| *k == EventKind::PassiveTick), Some(2250));
        assert_eq!(s.next_fire_time(|k| matches!(k, EventKind::ManagerEarn(_))), None);
    }

    #[test]
    fn seconds_conversion() {
        assert_eq!(seconds_to_ms(1.0), 1000);
        assert_eq!(seconds_to_ms(0.25), 250);
        assert_eq!(seconds_to_ms(-3.0), 0);
        assert_eq!(seconds_to_ms(f64::NAN), 0);
    }
}
