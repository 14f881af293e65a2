//! Deadline-ordered one-shot event queue
//!
//! Entries are either callbacks, invoked while the queue is being drained,
//! or wake-ups, which only mark the descriptor as fired so an entity can
//! notice it on its next update. Both kinds leave the queue before they
//! run, so cancelling after the fact is a harmless no-op.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::time::Duration;

use crate::foundation::time::ClockTime;

/// Callback stored in the queue. It may schedule further events.
pub type TimerCallback = Box<dyn FnOnce(&mut Timer)>;

/// Handle to a scheduled event
///
/// Ordering follows the deadline, then scheduling order, which is also the
/// firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerDescriptor {
    deadline: ClockTime,
    seq: u64,
}

impl TimerDescriptor {
    /// When the event is due
    pub fn deadline(&self) -> ClockTime {
        self.deadline
    }
}

enum TimerAction {
    Callback(TimerCallback),
    Wake,
}

impl fmt::Debug for TimerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("Callback"),
            Self::Wake => f.write_str("Wake"),
        }
    }
}

/// One-shot event queue driven by [`Timer::trigger_events`]
#[derive(Debug, Default)]
pub struct Timer {
    entries: BTreeMap<TimerDescriptor, TimerAction>,
    fired: HashSet<TimerDescriptor>,
    next_seq: u64,
}

impl Timer {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    fn next_descriptor(&mut self, deadline: ClockTime) -> TimerDescriptor {
        let descriptor = TimerDescriptor {
            deadline,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        descriptor
    }

    /// Run `callback` once `deadline` has passed
    pub fn schedule(
        &mut self,
        deadline: ClockTime,
        callback: impl FnOnce(&mut Self) + 'static,
    ) -> TimerDescriptor {
        let descriptor = self.next_descriptor(deadline);
        self.entries
            .insert(descriptor, TimerAction::Callback(Box::new(callback)));
        descriptor
    }

    /// Run `callback` `delay` after `now`
    pub fn schedule_after(
        &mut self,
        now: ClockTime,
        delay: Duration,
        callback: impl FnOnce(&mut Self) + 'static,
    ) -> TimerDescriptor {
        self.schedule(now + delay, callback)
    }

    /// Mark the descriptor as fired once `deadline` has passed.
    ///
    /// Poll with [`Timer::take_fired`].
    pub fn schedule_wake(&mut self, deadline: ClockTime) -> TimerDescriptor {
        let descriptor = self.next_descriptor(deadline);
        self.entries.insert(descriptor, TimerAction::Wake);
        log::trace!("timer: wake scheduled (seq {})", descriptor.seq);
        descriptor
    }

    /// Withdraw an event.
    ///
    /// Returns `true` if something was withdrawn: either a pending entry or
    /// a wake-up that fired but was never consumed. Unknown, fired or
    /// already cancelled descriptors are ignored.
    pub fn cancel(&mut self, descriptor: TimerDescriptor) -> bool {
        let pending = self.entries.remove(&descriptor).is_some();
        let unconsumed = self.fired.remove(&descriptor);
        if pending {
            log::debug!("timer: cancelled event (seq {})", descriptor.seq);
        }
        pending || unconsumed
    }

    /// Fire every event due at `now`, in deadline order.
    ///
    /// Events scheduled while this pass runs are left for the next call,
    /// even if already due, so a callback that reschedules itself runs at
    /// most once per pass. Returns the number of events fired.
    pub fn trigger_events(&mut self, now: ClockTime) -> usize {
        let seq_limit = self.next_seq;
        let mut count = 0;

        loop {
            let next = self
                .entries
                .keys()
                .take_while(|descriptor| descriptor.deadline <= now)
                .find(|descriptor| descriptor.seq < seq_limit)
                .copied();

            let Some(descriptor) = next else {
                break;
            };

            // Entry leaves the queue before it runs
            let Some(action) = self.entries.remove(&descriptor) else {
                break;
            };
            count += 1;

            match action {
                TimerAction::Callback(callback) => callback(self),
                TimerAction::Wake => {
                    self.fired.insert(descriptor);
                }
            }
        }

        count
    }

    /// Consume a fired wake-up. Returns `true` exactly once per wake-up.
    pub fn take_fired(&mut self, descriptor: TimerDescriptor) -> bool {
        self.fired.remove(&descriptor)
    }

    /// Whether the event is still waiting for its deadline
    pub fn is_scheduled(&self, descriptor: TimerDescriptor) -> bool {
        self.entries.contains_key(&descriptor)
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no events are pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deadline of the earliest pending event
    pub fn next_deadline(&self) -> Option<ClockTime> {
        self.entries.keys().next().map(TimerDescriptor::deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Instant;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let start = Instant::now();
        let mut timer = Timer::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (label, at) in [("late", 3.0), ("early", 1.0), ("middle", 2.0)] {
            let log = Rc::clone(&log);
            timer.schedule(start + secs(at), move |_| log.borrow_mut().push(label));
        }

        assert_eq!(timer.trigger_events(start + secs(0.5)), 0);
        assert_eq!(timer.trigger_events(start + secs(5.0)), 3);
        assert_eq!(*log.borrow(), vec!["early", "middle", "late"]);
        assert!(timer.is_empty());
    }

    #[test]
    fn test_schedule_after_is_relative_to_now() {
        let start = Instant::now();
        let mut timer = Timer::new();
        let fired = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&fired);

        let descriptor = timer.schedule_after(start, secs(1.5), move |_| *flag.borrow_mut() = true);

        assert_eq!(descriptor.deadline(), start + secs(1.5));
        timer.trigger_events(start + secs(1.0));
        assert!(!*fired.borrow());
        timer.trigger_events(start + secs(1.5));
        assert!(*fired.borrow());
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let start = Instant::now();
        let mut timer = Timer::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for label in 0..4 {
            let log = Rc::clone(&log);
            timer.schedule(start, move |_| log.borrow_mut().push(label));
        }

        timer.trigger_events(start);
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_cancelled_event_never_fires() {
        let start = Instant::now();
        let mut timer = Timer::new();
        let fired = Rc::new(RefCell::new(false));

        let flag = Rc::clone(&fired);
        let descriptor = timer.schedule(start + secs(2.0), move |_| *flag.borrow_mut() = true);

        timer.trigger_events(start + secs(1.0));
        assert!(timer.cancel(descriptor));

        let mut now = start;
        for _ in 0..100 {
            now += secs(0.1);
            timer.trigger_events(now);
        }

        assert!(!*fired.borrow());
        assert!(!timer.is_scheduled(descriptor));
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let start = Instant::now();
        let mut timer = Timer::new();
        let descriptor = timer.schedule(start, |_| {});

        timer.trigger_events(start);
        assert!(!timer.cancel(descriptor));
        assert!(!timer.cancel(descriptor));
    }

    #[test]
    fn test_self_rescheduling_runs_once_per_pass() {
        fn reschedule(timer: &mut Timer, at: Instant, count: Rc<RefCell<u32>>) {
            timer.schedule(at, move |timer| {
                *count.borrow_mut() += 1;
                reschedule(timer, at, count);
            });
        }

        let start = Instant::now();
        let mut timer = Timer::new();
        let count = Rc::new(RefCell::new(0));
        reschedule(&mut timer, start, Rc::clone(&count));

        assert_eq!(timer.trigger_events(start), 1);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(timer.len(), 1);

        assert_eq!(timer.trigger_events(start), 1);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_wake_is_consumed_once() {
        let start = Instant::now();
        let mut timer = Timer::new();
        let wake = timer.schedule_wake(start + secs(1.0));

        assert!(!timer.take_fired(wake));
        timer.trigger_events(start + secs(1.0));
        assert!(timer.take_fired(wake));
        assert!(!timer.take_fired(wake));
    }

    #[test]
    fn test_cancel_drops_unconsumed_wake() {
        let start = Instant::now();
        let mut timer = Timer::new();
        let wake = timer.schedule_wake(start);

        timer.trigger_events(start);
        assert!(timer.cancel(wake));
        assert!(!timer.take_fired(wake));
    }

    #[test]
    fn test_next_deadline() {
        let start = Instant::now();
        let mut timer = Timer::new();
        assert_eq!(timer.next_deadline(), None);

        timer.schedule_wake(start + secs(4.0));
        timer.schedule_wake(start + secs(2.0));
        assert_eq!(timer.next_deadline(), Some(start + secs(2.0)));
    }
}
