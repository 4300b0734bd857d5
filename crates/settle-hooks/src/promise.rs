use std::cell::RefCell;

use settle_core::compose::remember_with_key;
use settle_core::promise::Promise;
use settle_core::tracker::AsyncTracker;

/// Tracks an asynchronous operation across composition passes.
///
/// `use_promise!(deps, factory)` remembers one [`AsyncTracker`] per call
/// site. The first pass constructs it (which runs the factory once); later
/// passes compare `deps` by `PartialEq` and call `execute()` exactly once
/// per pass in which the key changed. The composition pass is the host's
/// change-detection cycle; pick a key type whose equality means "same
/// inputs".
///
/// The factory is refreshed every pass, so a re-execution sees the current
/// captures, not the ones from the mounting pass.
///
/// ```rust
/// use settle_core::*;
/// use settle_hooks::use_promise;
///
/// reset_composition();
/// let tracker = compose(|| {
///     use_promise!((), || Promise::<i32, String>::resolved(1))
/// });
/// assert_eq!(tracker.state(), AsyncState::Resolved(1));
/// ```
#[macro_export]
macro_rules! use_promise {
    ($deps:expr, $factory:expr) => {
        $crate::promise::use_promise_internal(
            concat!(module_path!(), ":", line!(), ":", column!()),
            $deps,
            $factory,
        )
    };
}

struct PromiseSlot<K, T: 'static, E: 'static> {
    deps: K,
    tracker: AsyncTracker<T, E>,
}

// Slot drop is hook teardown: the tracker must stop accepting results.
impl<K, T: 'static, E: 'static> Drop for PromiseSlot<K, T, E> {
    fn drop(&mut self) {
        self.tracker.dispose();
    }
}

/// Implementation behind [`use_promise!`], keyed by a per-callsite id.
pub fn use_promise_internal<K, T, E>(
    callsite: &'static str,
    deps: K,
    factory: impl Fn() -> Promise<T, E> + 'static,
) -> AsyncTracker<T, E>
where
    K: PartialEq + 'static,
    T: Clone + 'static,
    E: Clone + 'static,
{
    let slot = remember_with_key(format!("promise:{callsite}"), || {
        RefCell::new(None::<PromiseSlot<K, T, E>>)
    });

    let mut slot = slot.borrow_mut();
    match &mut *slot {
        Some(existing) => {
            existing.tracker.set_factory(factory);
            if existing.deps != deps {
                log::trace!("use_promise: dependency key changed at {callsite}; re-executing");
                existing.deps = deps;
                existing.tracker.execute();
            }
            existing.tracker.clone()
        }
        None => {
            let tracker = AsyncTracker::new(factory);
            *slot = Some(PromiseSlot {
                deps,
                tracker: tracker.clone(),
            });
            tracker
        }
    }
}
