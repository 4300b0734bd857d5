use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Handle for one [`Signal`] subscription.
    pub struct SubKey;
}

/// Observable value. Cloning the handle shares the underlying state.
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: SlotMap<SubKey, Rc<dyn Fn(&T)>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: SlotMap::with_key(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    /// Reads through a borrow without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, value: T)
    where
        T: Clone,
    {
        self.0.borrow_mut().value = value;
        self.notify();
    }

    pub fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    /// Subscribers run synchronously on every `set`/`update`, in
    /// subscription order.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubKey {
        self.0.borrow_mut().subs.insert(Rc::new(f))
    }

    /// Detaches a subscriber. Unknown keys are a no-op.
    pub fn unsubscribe(&self, key: SubKey) {
        self.0.borrow_mut().subs.remove(key);
    }

    // Subscribers are invoked with no borrow held, so they may read or
    // write this signal again.
    fn notify(&self)
    where
        T: Clone,
    {
        let (value, subs) = {
            let inner = self.0.borrow();
            let subs: SmallVec<[Rc<dyn Fn(&T)>; 4]> = inner.subs.values().cloned().collect();
            (inner.value.clone(), subs)
        };
        for sub in subs {
            sub(&value);
        }
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

pub fn signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}
