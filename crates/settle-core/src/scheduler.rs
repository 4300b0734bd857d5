use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

new_key_type! {
    /// Handle for a scheduled callback.
    pub struct TimerKey;
}

/// Host timer collaborator: "run this callback after a delay" plus
/// cancellation. Platforms wire this to their event loop; tests use
/// [`TestScheduler`].
///
/// Contract: callbacks never run inside `schedule` itself, even for a zero
/// delay — they run from the host's timer dispatch. Cancelling a key that
/// already fired (or was never issued) is a no-op.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerKey;
    fn cancel(&self, key: TimerKey);
}

/// Deterministic scheduler driven by [`advance`](TestScheduler::advance).
///
/// The virtual clock starts at construction time and only moves when told
/// to. Due callbacks fire in deadline order, ties broken by scheduling
/// order; a callback that schedules further timers inside the advanced
/// window gets those fired too, within the same `advance` call.
pub struct TestScheduler {
    inner: Rc<RefCell<TestInner>>,
}

struct TestInner {
    now: Instant,
    seq: u64,
    timers: SlotMap<TimerKey, TestTimer>,
}

struct TestTimer {
    deadline: Instant,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

impl TestScheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TestInner {
                now: Instant::now(),
                seq: 0,
                timers: SlotMap::with_key(),
            })),
        }
    }

    pub fn now(&self) -> Instant {
        self.inner.borrow().now
    }

    /// Number of timers not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Moves the clock forward, firing every timer that falls due. The
    /// clock rests at each deadline while its callback runs, so callbacks
    /// observe a consistent `now`.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.borrow().now + by;

        loop {
            let next = {
                let inner = self.inner.borrow();
                inner
                    .timers
                    .iter()
                    .filter(|(_, t)| t.deadline <= target)
                    .min_by_key(|(_, t)| (t.deadline, t.seq))
                    .map(|(key, _)| key)
            };

            let Some(key) = next else { break };
            let timer = {
                let mut inner = self.inner.borrow_mut();
                let Some(timer) = inner.timers.remove(key) else {
                    continue;
                };
                if timer.deadline > inner.now {
                    inner.now = timer.deadline;
                }
                timer
            };
            (timer.callback)();
        }

        self.inner.borrow_mut().now = target;
    }
}

impl Default for TestScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TestScheduler {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl Scheduler for TestScheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerKey {
        let mut inner = self.inner.borrow_mut();
        let deadline = inner.now + delay;
        let seq = inner.seq;
        inner.seq += 1;
        inner.timers.insert(TestTimer {
            deadline,
            seq,
            callback,
        })
    }

    fn cancel(&self, key: TimerKey) {
        self.inner.borrow_mut().timers.remove(key);
    }
}
