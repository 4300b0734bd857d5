use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::scope::Scope;

thread_local! {
    static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

/// Per-thread storage behind `remember*`. Sequential slots are addressed by
/// call order within a pass; keyed slots by caller-supplied string keys.
#[derive(Default)]
struct Composer {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
    keyed: HashMap<String, Box<dyn Any>>,
}

/// Clears all remembered values. Dropping them ends the lifetime of anything
/// they own (trackers dispose, debounce guards cancel). Tests call this
/// between cases; hosts call it on full teardown.
pub fn reset_composition() {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        c.slots.clear();
        c.keyed.clear();
        c.cursor = 0;
    });
}

/// One composition pass: resets the sequential-slot cursor and owns the
/// root scope for the pass.
pub struct ComposeGuard {
    scope: Scope,
}

impl ComposeGuard {
    pub fn begin() -> Self {
        COMPOSER.with(|c| c.borrow_mut().cursor = 0);
        ComposeGuard {
            scope: Scope::new(),
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

/// Convenience: one composition pass with the root scope installed.
pub fn compose<R>(f: impl FnOnce() -> R) -> R {
    let guard = ComposeGuard::begin();
    guard.scope().run(f)
}

/// Slot-based remember (sequential composition only). The Nth call in a
/// pass always refers to the Nth stored value.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            c.slots.push(Box::new(rc.clone()));
            return rc;
        }

        match c.slots[cursor].downcast_ref::<Rc<T>>() {
            Some(rc) => rc.clone(),
            None => {
                log::warn!(
                    "remember: slot {cursor} type changed; replacing. \
                     For conditional composition prefer remember_with_key."
                );
                let rc: Rc<T> = Rc::new(init());
                c.slots[cursor] = Box::new(rc.clone());
                rc
            }
        }
    })
}

/// Key-based remember; stable across conditional branches.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let key = key.into();

        if let Some(existing) = c.keyed.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            log::warn!("remember_with_key: key '{key}' reused with a different type; replacing.");
        }

        let rc: Rc<T> = Rc::new(init());
        c.keyed.insert(key, Box::new(rc.clone()));
        rc
    })
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}
