#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_time::Duration;

    use crate::compose::{compose, remember, remember_with_key, reset_composition};
    use crate::debounce::{DEFAULT_DELAY, Debounced};
    use crate::error::PromiseError;
    use crate::promise::Promise;
    use crate::scheduler::{Scheduler, TestScheduler};
    use crate::scope::Scope;
    use crate::signal::signal;
    use crate::tracker::{AsyncState, AsyncTracker};

    fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(T) + Clone + 'static) {
        let seen: Rc<RefCell<Vec<T>>> = Rc::new(RefCell::new(Vec::new()));
        let push = {
            let seen = seen.clone();
            move |v: T| seen.borrow_mut().push(v)
        };
        (seen, push)
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscribe_and_unsubscribe() {
        let sig = signal(0);
        let (seen, push) = recorder();

        let key = sig.subscribe(move |v| push(*v));
        sig.set(1);
        sig.set(2);
        assert_eq!(*seen.borrow(), vec![1, 2]);

        sig.unsubscribe(key);
        sig.set(3);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(RefCell::new(0));

        let scope = Scope::new();
        let counter = cleaned_up.clone();
        scope.add_disposer(move || *counter.borrow_mut() += 1);

        assert_eq!(*cleaned_up.borrow(), 0);
        scope.dispose();
        assert_eq!(*cleaned_up.borrow(), 1);

        // Second dispose finds nothing left to run.
        scope.dispose();
        assert_eq!(*cleaned_up.borrow(), 1);
    }

    #[test]
    fn test_signal_with_reads_without_clone() {
        let sig = signal(vec![1, 2, 3]);
        assert_eq!(sig.with(|v| v.len()), 3);
    }

    #[test]
    fn test_scoped_effect_cleanup_on_dispose() {
        let cleaned = Rc::new(RefCell::new(false));

        let scope = Scope::new();
        scope.run(|| {
            let cleaned = cleaned.clone();
            crate::scope::scoped_effect(move || {
                Box::new(move || *cleaned.borrow_mut() = true)
            });
        });

        assert!(!*cleaned.borrow());
        scope.dispose();
        assert!(*cleaned.borrow());
    }

    #[test]
    fn test_scope_child_disposed_before_parent() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let parent = Scope::new();
        let child = parent.child();
        {
            let order = order.clone();
            child.add_disposer(move || order.borrow_mut().push("child"));
        }
        {
            let order = order.clone();
            parent.add_disposer(move || order.borrow_mut().push("parent"));
        }

        parent.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn test_remember_sequential_slots() {
        reset_composition();

        let first = compose(|| *remember(|| 41));
        let second = compose(|| *remember(|| 99));

        assert_eq!(first, 41);
        assert_eq!(second, 41); // Not 99: the slot survives recomposition.
    }

    #[test]
    fn test_remember_with_key() {
        reset_composition();

        let val1 = remember_with_key("test", || 42);
        let val2 = remember_with_key("test", || 100);

        assert_eq!(*val1, 42);
        assert_eq!(*val2, 42); // Not 100, because the key exists.
    }

    #[test]
    fn test_promise_on_settle_before_and_after() {
        let (promise, completer) = Promise::<i32, String>::pending();
        let (seen, push) = recorder();

        {
            let push = push.clone();
            promise.on_settle(move |result| push(result.clone()));
        }
        assert!(seen.borrow().is_empty());
        assert!(!promise.is_settled());

        completer.resolve(7).unwrap();
        assert!(promise.is_settled());
        assert_eq!(*seen.borrow(), vec![Ok(7)]);

        // Registering after settlement replays immediately.
        promise.on_settle(move |result| push(result.clone()));
        assert_eq!(*seen.borrow(), vec![Ok(7), Ok(7)]);
    }

    #[test]
    fn test_completer_double_settle_keeps_first() {
        let (promise, completer) = Promise::<i32, String>::pending();
        let racing = completer.clone();

        completer.resolve(1).unwrap();
        assert_eq!(racing.resolve(2), Err(PromiseError::AlreadySettled));
        assert_eq!(
            racing.reject("late".to_string()),
            Err(PromiseError::AlreadySettled)
        );

        let (seen, push) = recorder();
        promise.on_settle(move |result| push(result.clone()));
        assert_eq!(*seen.borrow(), vec![Ok(1)]);
    }

    #[test]
    fn test_scheduler_fires_in_deadline_order() {
        let scheduler = Rc::new(TestScheduler::new());
        let (seen, push) = recorder();

        for (label, delay) in [("slow", 30u64), ("fast", 10), ("mid", 20)] {
            let push = push.clone();
            scheduler.schedule(Duration::from_millis(delay), Box::new(move || push(label)));
        }

        scheduler.advance(Duration::from_millis(30));
        assert_eq!(*seen.borrow(), vec!["fast", "mid", "slow"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_scheduler_cancel() {
        let scheduler = Rc::new(TestScheduler::new());
        let (seen, push) = recorder();

        let key = scheduler.schedule(Duration::from_millis(10), Box::new(move || push(1)));
        scheduler.cancel(key);
        scheduler.advance(Duration::from_millis(20));
        assert!(seen.borrow().is_empty());

        // Cancelling a fired (or unknown) key is a no-op.
        scheduler.cancel(key);
    }

    #[test]
    fn test_scheduler_partial_advance() {
        let scheduler = Rc::new(TestScheduler::new());
        let (seen, push) = recorder();

        scheduler.schedule(Duration::from_millis(100), Box::new(move || push(1)));
        scheduler.advance(Duration::from_millis(99));
        assert!(seen.borrow().is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn test_scheduler_callback_may_schedule_within_window() {
        let scheduler = Rc::new(TestScheduler::new());
        let (seen, push) = recorder();

        {
            let inner_scheduler = scheduler.clone();
            let push = push.clone();
            scheduler.schedule(
                Duration::from_millis(10),
                Box::new(move || {
                    push("outer");
                    inner_scheduler
                        .schedule(Duration::from_millis(5), Box::new(move || push("inner")));
                }),
            );
        }

        scheduler.advance(Duration::from_millis(20));
        assert_eq!(*seen.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_debounce_collapses_burst() {
        let scheduler = Rc::new(TestScheduler::new());
        let (seen, push) = recorder();
        let debounced =
            Debounced::with_delay(scheduler.clone(), Duration::from_millis(100), push);

        debounced.call(1);
        debounced.call(2);
        debounced.call(3);
        assert!(seen.borrow().is_empty());

        scheduler.advance(Duration::from_millis(99));
        assert!(seen.borrow().is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*seen.borrow(), vec![3]);
        assert!(!debounced.is_pending());
    }

    #[test]
    fn test_debounce_cancel_suppresses() {
        let scheduler = Rc::new(TestScheduler::new());
        let (seen, push) = recorder::<i32>();
        let debounced =
            Debounced::with_delay(scheduler.clone(), Duration::from_millis(100), push);

        debounced.call(1);
        debounced.cancel();
        scheduler.advance(Duration::from_millis(200));
        assert!(seen.borrow().is_empty());

        // Idempotent with nothing pending.
        debounced.cancel();
    }

    #[test]
    fn test_debounce_cancel_then_call_resumes() {
        let scheduler = Rc::new(TestScheduler::new());
        let (seen, push) = recorder();
        let debounced =
            Debounced::with_delay(scheduler.clone(), Duration::from_millis(100), push);

        debounced.call(1);
        debounced.cancel();
        debounced.call(2);
        scheduler.advance(Duration::from_millis(100));
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn test_debounce_flush_is_immediate_and_exact() {
        let scheduler = Rc::new(TestScheduler::new());
        let (seen, push) = recorder();
        let debounced =
            Debounced::with_delay(scheduler.clone(), Duration::from_millis(100), push);

        debounced.call(5);
        debounced.flush();
        assert_eq!(*seen.borrow(), vec![5]);

        // The original timer never fires a second invocation.
        scheduler.advance(Duration::from_millis(200));
        assert_eq!(*seen.borrow(), vec![5]);
    }

    #[test]
    fn test_debounce_flush_idle_is_noop() {
        let scheduler = Rc::new(TestScheduler::new());
        let (seen, push) = recorder::<i32>();
        let debounced =
            Debounced::with_delay(scheduler.clone(), Duration::from_millis(100), push);

        debounced.flush();
        assert!(seen.borrow().is_empty());

        // A cycle that already fired is not replayed either.
        debounced.call(1);
        scheduler.advance(Duration::from_millis(100));
        debounced.flush();
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn test_debounce_default_delay() {
        let scheduler = Rc::new(TestScheduler::new());
        let (seen, push) = recorder();
        let debounced = Debounced::new(scheduler.clone(), push);

        assert_eq!(debounced.delay(), DEFAULT_DELAY);

        debounced.call("hello");
        scheduler.advance(DEFAULT_DELAY - Duration::from_millis(1));
        assert!(seen.borrow().is_empty());

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(*seen.borrow(), vec!["hello"]);
    }

    #[test]
    fn test_debounce_fresh_cycle_after_fire() {
        let scheduler = Rc::new(TestScheduler::new());
        let (seen, push) = recorder();
        let debounced =
            Debounced::with_delay(scheduler.clone(), Duration::from_millis(50), push);

        debounced.call(1);
        scheduler.advance(Duration::from_millis(50));
        debounced.call(2);
        scheduler.advance(Duration::from_millis(50));

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_tracker_resolves() {
        let completers = Rc::new(RefCell::new(Vec::new()));
        let tracker = AsyncTracker::<i32, String>::new({
            let completers = completers.clone();
            move || {
                let (promise, completer) = Promise::pending();
                completers.borrow_mut().push(completer);
                promise
            }
        });

        assert_eq!(tracker.state(), AsyncState::Resolving);
        assert_eq!(completers.borrow().len(), 1);

        let completer = completers.borrow_mut().remove(0);
        completer.resolve(42).unwrap();
        assert_eq!(tracker.state(), AsyncState::Resolved(42));
        assert_eq!(tracker.state().value(), Some(&42));
        assert!(!tracker.state().is_resolving());
        assert_eq!(tracker.state().error(), None);
    }

    #[test]
    fn test_tracker_state_signal_notifies() {
        let (seen, push) = recorder();
        let tracker = AsyncTracker::<i32, String>::new(|| Promise::resolved(1));
        tracker
            .state_signal()
            .subscribe(move |state| push(state.clone()));

        tracker.execute();
        assert_eq!(
            *seen.borrow(),
            vec![AsyncState::Resolving, AsyncState::Resolved(1)]
        );
    }

    #[test]
    fn test_promise_settled_constructor() {
        let promise = Promise::<i32, String>::settled(Err("bad".to_string()));
        assert!(promise.is_settled());

        let (seen, push) = recorder();
        promise.on_settle(move |result| push(result.clone()));
        assert_eq!(*seen.borrow(), vec![Err("bad".to_string())]);
    }

    #[test]
    fn test_tracker_captures_rejection() {
        let completers = Rc::new(RefCell::new(Vec::new()));
        let tracker = AsyncTracker::<i32, String>::new({
            let completers = completers.clone();
            move || {
                let (promise, completer) = Promise::pending();
                completers.borrow_mut().push(completer);
                promise
            }
        });

        let completer = completers.borrow_mut().remove(0);
        completer.reject("boom".to_string()).unwrap();
        assert_eq!(tracker.state(), AsyncState::Rejected("boom".to_string()));
    }

    #[test]
    fn test_tracker_synchronous_failure_is_rejection() {
        let tracker =
            AsyncTracker::<i32, String>::new(|| Promise::rejected("no route".to_string()));
        assert_eq!(
            tracker.state(),
            AsyncState::Rejected("no route".to_string())
        );
    }

    #[test]
    fn test_tracker_supersession_last_issued_wins() {
        let completers = Rc::new(RefCell::new(Vec::new()));
        let tracker = AsyncTracker::<&'static str, String>::new({
            let completers = completers.clone();
            move || {
                let (promise, completer) = Promise::pending();
                completers.borrow_mut().push(completer);
                promise
            }
        });

        tracker.execute();
        assert_eq!(completers.borrow().len(), 2);

        // The second (most recent) execution settles first and wins.
        let first = completers.borrow_mut().remove(0);
        let second = completers.borrow_mut().remove(0);
        second.resolve("B").unwrap();
        assert_eq!(tracker.state(), AsyncState::Resolved("B"));

        // The slow first execution settles later; its result is discarded.
        first.resolve("A").unwrap();
        assert_eq!(tracker.state(), AsyncState::Resolved("B"));
    }

    #[test]
    fn test_tracker_disposed_by_scope() {
        let completers = Rc::new(RefCell::new(Vec::new()));
        let calls = Rc::new(RefCell::new(0));

        let scope = Scope::new();
        let tracker = scope.run(|| {
            AsyncTracker::<i32, String>::new({
                let completers = completers.clone();
                let calls = calls.clone();
                move || {
                    *calls.borrow_mut() += 1;
                    let (promise, completer) = Promise::pending();
                    completers.borrow_mut().push(completer);
                    promise
                }
            })
        });
        assert!(!tracker.is_disposed());

        scope.dispose();
        assert!(tracker.is_disposed());

        // A result arriving after teardown never writes state.
        let completer = completers.borrow_mut().remove(0);
        completer.resolve(1).unwrap();
        assert_eq!(tracker.state(), AsyncState::Resolving);

        // And further executions are inert.
        tracker.execute();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_tracker_retry_handle() {
        let calls = Rc::new(RefCell::new(0));
        let tracker = AsyncTracker::<i32, String>::new({
            let calls = calls.clone();
            move || {
                *calls.borrow_mut() += 1;
                Promise::resolved(5)
            }
        });
        assert_eq!(tracker.state(), AsyncState::Resolved(5));
        assert_eq!(*calls.borrow(), 1);

        let retry = tracker.retry_handle();
        retry.call();
        assert_eq!(*calls.borrow(), 2);
        assert_eq!(tracker.state(), AsyncState::Resolved(5));
    }

    #[test]
    fn test_tracker_set_factory() {
        let tracker = AsyncTracker::<i32, String>::new(|| Promise::resolved(1));
        assert_eq!(tracker.state(), AsyncState::Resolved(1));

        tracker.set_factory(|| Promise::resolved(2));
        tracker.execute();
        assert_eq!(tracker.state(), AsyncState::Resolved(2));
    }

    #[test]
    fn test_tracker_dropped_handle_is_harmless() {
        let completers = Rc::new(RefCell::new(Vec::new()));
        {
            let _tracker = AsyncTracker::<i32, String>::new({
                let completers = completers.clone();
                move || {
                    let (promise, completer) = Promise::pending();
                    completers.borrow_mut().push(completer);
                    promise
                }
            });
        }

        // All handles gone; a late completion must not blow up.
        let completer = completers.borrow_mut().remove(0);
        completer.resolve(1).unwrap();
    }
}
