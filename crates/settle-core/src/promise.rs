use std::cell::RefCell;
use std::rc::Rc;

use crate::error::PromiseError;

/// The consuming half of a deferred result: settles exactly once with
/// `Ok(value)` or `Err(error)`, then replays that result to any later
/// [`on_settle`](Promise::on_settle) registration.
///
/// Single-threaded: settlement runs callbacks synchronously on the calling
/// thread. A factory that fails before anything asynchronous happens
/// returns [`Promise::rejected`] — there is no throwing path.
pub struct Promise<T: 'static, E: 'static> {
    inner: Rc<RefCell<PromiseInner<T, E>>>,
}

/// The producing half. Cloneable so completion can race between code paths;
/// whichever settles first wins and the rest get
/// [`PromiseError::AlreadySettled`].
pub struct Completer<T: 'static, E: 'static> {
    inner: Rc<RefCell<PromiseInner<T, E>>>,
}

enum PromiseInner<T, E> {
    Pending(Vec<Box<dyn FnOnce(&Result<T, E>)>>),
    Settled(Rc<Result<T, E>>),
}

impl<T, E> Promise<T, E> {
    pub fn pending() -> (Self, Completer<T, E>) {
        let inner = Rc::new(RefCell::new(PromiseInner::Pending(Vec::new())));
        (
            Self {
                inner: inner.clone(),
            },
            Completer { inner },
        )
    }

    pub fn resolved(value: T) -> Self {
        Self::settled(Ok(value))
    }

    pub fn rejected(error: E) -> Self {
        Self::settled(Err(error))
    }

    pub fn settled(result: Result<T, E>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PromiseInner::Settled(Rc::new(result)))),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(&*self.inner.borrow(), PromiseInner::Settled(_))
    }

    /// Runs `f` when this promise settles — immediately if it already has.
    /// Multiple callbacks run in registration order.
    pub fn on_settle(&self, f: impl FnOnce(&Result<T, E>) + 'static) {
        {
            let mut inner = self.inner.borrow_mut();
            if let PromiseInner::Pending(callbacks) = &mut *inner {
                callbacks.push(Box::new(f));
                return;
            }
        }
        let result = match &*self.inner.borrow() {
            PromiseInner::Settled(result) => result.clone(),
            PromiseInner::Pending(_) => return,
        };
        // Borrow released; replay may re-enter the promise freely.
        f(&result);
    }
}

impl<T, E> Clone for Promise<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, E> Completer<T, E> {
    pub fn resolve(&self, value: T) -> Result<(), PromiseError> {
        self.settle(Ok(value))
    }

    pub fn reject(&self, error: E) -> Result<(), PromiseError> {
        self.settle(Err(error))
    }

    /// Settles the promise and synchronously runs pending callbacks. A
    /// second settlement attempt leaves the first result untouched.
    pub fn settle(&self, result: Result<T, E>) -> Result<(), PromiseError> {
        let (result, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            let PromiseInner::Pending(callbacks) = &mut *inner else {
                return Err(PromiseError::AlreadySettled);
            };
            let callbacks = std::mem::take(callbacks);
            let result = Rc::new(result);
            *inner = PromiseInner::Settled(result.clone());
            (result, callbacks)
        };
        for callback in callbacks {
            callback(&result);
        }
        Ok(())
    }
}

impl<T, E> Clone for Completer<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
