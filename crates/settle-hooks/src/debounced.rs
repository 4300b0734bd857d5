use std::cell::RefCell;
use std::rc::Rc;

use settle_core::compose::remember_with_key;
use settle_core::debounce::Debounced;
use settle_core::scheduler::Scheduler;
use settle_core::signal::{Signal, signal};
use web_time::Duration;

/// Delay used by [`use_debounced_value`]. Callers that need a different
/// window use [`use_debounced_value_with_delay`].
pub const DEFAULT_VALUE_DELAY: Duration = Duration::from_millis(500);

struct DebouncedValueSlot<V: Clone + 'static> {
    out: Signal<V>,
    guard: Debounced<V>,
    last_input: V,
}

/// A value that trails its input: the returned value only catches up with
/// `value` once [`DEFAULT_VALUE_DELAY`] has elapsed without the input
/// changing again.
///
/// The first pass seeds the output with the initial input; intermediate
/// inputs inside one delay window are collapsed away, like keystrokes
/// feeding a search box.
pub fn use_debounced_value<V>(key: impl Into<String>, scheduler: &Rc<dyn Scheduler>, value: V) -> V
where
    V: Clone + PartialEq + 'static,
{
    use_debounced_value_with_delay(key, scheduler, value, DEFAULT_VALUE_DELAY)
}

/// [`use_debounced_value`] with an explicit trailing delay.
pub fn use_debounced_value_with_delay<V>(
    key: impl Into<String>,
    scheduler: &Rc<dyn Scheduler>,
    value: V,
    delay: Duration,
) -> V
where
    V: Clone + PartialEq + 'static,
{
    let key = key.into();
    let slot = remember_with_key(format!("debounced:{key}"), || {
        let out = signal(value.clone());
        let guard = Debounced::with_delay(scheduler.clone(), delay, {
            let out = out.clone();
            move |v: V| out.set(v)
        });
        RefCell::new(DebouncedValueSlot {
            out,
            guard,
            last_input: value.clone(),
        })
    });

    let mut slot = slot.borrow_mut();
    if slot.last_input != value {
        slot.last_input = value.clone();
        slot.guard.call(value);
    }
    slot.out.get()
}
