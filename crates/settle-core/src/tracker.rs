use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::promise::Promise;
use crate::scope::current_scope;
use crate::signal::{Signal, signal};

/// Lifecycle of one asynchronous operation. Exactly one variant holds at a
/// time; a fresh execution replaces whatever was there before.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncState<T, E> {
    /// An operation is in flight (or about to start).
    Resolving,
    /// The last execution completed with a value.
    Resolved(T),
    /// The last execution completed with an error.
    Rejected(E),
}

impl<T, E> AsyncState<T, E> {
    pub fn is_resolving(&self) -> bool {
        matches!(self, AsyncState::Resolving)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            AsyncState::Resolved(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            AsyncState::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

/// Tracks one asynchronous operation produced by a caller-supplied factory.
///
/// Construction triggers the first execution; [`execute`](AsyncTracker::execute)
/// re-runs it (manual retry, dependency change). Executions are totally
/// ordered, and only the most recently issued one may write the terminal
/// state — a slow earlier run can never clobber a faster later run's result.
/// Superseding does not cancel the underlying operation; only its state
/// write is suppressed.
///
/// Cloning the handle shares the tracker. Created inside a [`Scope`], the
/// tracker is disposed with it; after disposal no in-flight result can touch
/// state.
///
/// [`Scope`]: crate::scope::Scope
pub struct AsyncTracker<T: 'static, E: 'static> {
    inner: Rc<TrackerInner<T, E>>,
}

struct TrackerInner<T: 'static, E: 'static> {
    factory: RefCell<Rc<dyn Fn() -> Promise<T, E>>>,
    state: Signal<AsyncState<T, E>>,
    epoch: Cell<u64>,
    alive: Cell<bool>,
}

impl<T: Clone + 'static, E: Clone + 'static> AsyncTracker<T, E> {
    pub fn new(factory: impl Fn() -> Promise<T, E> + 'static) -> Self {
        let tracker = Self {
            inner: Rc::new(TrackerInner {
                factory: RefCell::new(Rc::new(factory)),
                state: signal(AsyncState::Resolving),
                epoch: Cell::new(0),
                alive: Cell::new(true),
            }),
        };
        if let Some(scope) = current_scope() {
            let handle = tracker.clone();
            scope.add_disposer(move || handle.dispose());
        }
        tracker.execute();
        tracker
    }

    /// Issues a fresh execution: state drops to `Resolving`, the factory
    /// runs, and the settled result lands in `Resolved`/`Rejected` — unless
    /// a newer execution or disposal got there first, in which case the
    /// result is dropped without comment.
    pub fn execute(&self) {
        if !self.inner.alive.get() {
            log::trace!("tracker: execute on disposed tracker ignored");
            return;
        }

        let issued = self.inner.epoch.get() + 1;
        self.inner.epoch.set(issued);
        self.inner.state.set(AsyncState::Resolving);

        let factory = self.inner.factory.borrow().clone();
        let promise = factory();

        // Weak: a pending promise must not keep a dropped tracker alive.
        let inner = Rc::downgrade(&self.inner);
        promise.on_settle(move |result| settle(&inner, issued, result));
    }

    /// Read-only snapshot of the current state.
    pub fn state(&self) -> AsyncState<T, E> {
        self.inner.state.get()
    }

    /// The underlying state signal, for subscription.
    pub fn state_signal(&self) -> Signal<AsyncState<T, E>> {
        self.inner.state.clone()
    }

    /// Type-erased handle bound to [`execute`](AsyncTracker::execute), for
    /// handing to rendering layers that should not know `T`/`E`.
    pub fn retry_handle(&self) -> Retry {
        let tracker = self.clone();
        Retry(Rc::new(move || tracker.execute()))
    }

    /// Replaces the operation factory used by subsequent executions. The
    /// hook layer refreshes this every pass so re-runs see current captures.
    pub fn set_factory(&self, factory: impl Fn() -> Promise<T, E> + 'static) {
        *self.inner.factory.borrow_mut() = Rc::new(factory);
    }
}

impl<T: 'static, E: 'static> AsyncTracker<T, E> {
    /// Marks the tracker dead: in-flight results are discarded and further
    /// `execute` calls are inert. Idempotent.
    pub fn dispose(&self) {
        self.inner.alive.set(false);
    }

    pub fn is_disposed(&self) -> bool {
        !self.inner.alive.get()
    }
}

fn settle<T: Clone + 'static, E: Clone + 'static>(
    inner: &Weak<TrackerInner<T, E>>,
    issued: u64,
    result: &Result<T, E>,
) {
    let Some(inner) = inner.upgrade() else {
        log::trace!("tracker: result arrived after tracker dropped; discarded");
        return;
    };
    if !inner.alive.get() {
        log::trace!("tracker: result arrived after disposal; discarded");
        return;
    }
    if inner.epoch.get() != issued {
        log::trace!(
            "tracker: superseded result discarded (issued {issued}, current {})",
            inner.epoch.get()
        );
        return;
    }
    match result {
        Ok(value) => inner.state.set(AsyncState::Resolved(value.clone())),
        Err(error) => inner.state.set(AsyncState::Rejected(error.clone())),
    }
}

impl<T, E> Clone for AsyncTracker<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Cheap, cloneable "run it again" handle.
#[derive(Clone)]
pub struct Retry(Rc<dyn Fn()>);

impl Retry {
    pub fn call(&self) {
        (self.0)()
    }
}
