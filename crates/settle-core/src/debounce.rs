use std::cell::RefCell;
use std::rc::Rc;

use web_time::Duration;

use crate::scheduler::{Scheduler, TimerKey};

/// Delay used by [`Debounced::new`]. Omitting a delay means "use this",
/// still deferred — never "run immediately".
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// Collapses a burst of calls into one deferred invocation with the latest
/// arguments.
///
/// At most one timer is live per instance: every [`call`](Debounced::call)
/// cancels the previous timer before scheduling its own. [`cancel`]
/// suppresses the pending invocation; [`flush`] runs it now instead of
/// later. Multiple arguments travel as a tuple; use `()` for none.
///
/// The action runs with no internal borrow held, so it may re-enter the
/// guard (calling, cancelling, or flushing again).
///
/// [`cancel`]: Debounced::cancel
/// [`flush`]: Debounced::flush
pub struct Debounced<A: Clone + 'static> {
    inner: Rc<RefCell<DebounceInner<A>>>,
}

struct DebounceInner<A> {
    action: Rc<dyn Fn(A)>,
    delay: Duration,
    scheduler: Rc<dyn Scheduler>,
    pending: Option<TimerKey>,
    last_args: Option<A>,
}

impl<A: Clone + 'static> Debounced<A> {
    pub fn new(scheduler: Rc<dyn Scheduler>, action: impl Fn(A) + 'static) -> Self {
        Self::with_delay(scheduler, DEFAULT_DELAY, action)
    }

    pub fn with_delay(
        scheduler: Rc<dyn Scheduler>,
        delay: Duration,
        action: impl Fn(A) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DebounceInner {
                action: Rc::new(action),
                delay,
                scheduler,
                pending: None,
                last_args: None,
            })),
        }
    }

    /// Records `args` as the latest and restarts the timer. Whichever call
    /// is last before the delay elapses is the one that fires.
    pub fn call(&self, args: A) {
        let (scheduler, delay, replaced) = {
            let mut inner = self.inner.borrow_mut();
            inner.last_args = Some(args.clone());
            (inner.scheduler.clone(), inner.delay, inner.pending.take())
        };
        if let Some(key) = replaced {
            scheduler.cancel(key);
        }

        let weak = Rc::downgrade(&self.inner);
        let key = scheduler.schedule(
            delay,
            Box::new(move || {
                let Some(cell) = weak.upgrade() else { return };
                let action = {
                    let mut inner = cell.borrow_mut();
                    inner.pending = None;
                    inner.action.clone()
                };
                action(args);
            }),
        );
        self.inner.borrow_mut().pending = Some(key);
    }

    /// Drops the pending invocation, if any. The recorded arguments stay
    /// put (a later `flush` after a fresh `call` still sees the newest).
    pub fn cancel(&self) {
        let cancelled = {
            let mut inner = self.inner.borrow_mut();
            inner.pending.take().map(|key| (inner.scheduler.clone(), key))
        };
        if let Some((scheduler, key)) = cancelled {
            scheduler.cancel(key);
        }
    }

    /// Runs the pending invocation now, with the latest recorded arguments.
    /// No-op when nothing is pending — an already-fired or cancelled cycle
    /// is never replayed.
    pub fn flush(&self) {
        let due = {
            let mut inner = self.inner.borrow_mut();
            inner.pending.take().map(|key| {
                (
                    inner.scheduler.clone(),
                    key,
                    inner.action.clone(),
                    inner.last_args.clone(),
                )
            })
        };
        if let Some((scheduler, key, action, args)) = due {
            scheduler.cancel(key);
            if let Some(args) = args {
                action(args);
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.inner.borrow().delay
    }
}

impl<A: Clone + 'static> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
