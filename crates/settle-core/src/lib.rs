//! # Promises, trackers, and debouncing
//!
//! Settle is a small reactive toolkit for single-threaded hosts. Instead of
//! hand-rolled status flags and ad-hoc timers, there are four main pieces:
//!
//! - `Signal<T>` — observable, reactive value.
//! - `Promise<T, E>` / `Completer<T, E>` — a deferred result that settles once.
//! - `AsyncTracker<T, E>` — lifecycle state of one asynchronous operation,
//!   with supersession and teardown guards built in.
//! - `Debounced<A>` — collapses bursts of calls into one deferred invocation.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state:
//!
//! ```rust
//! use settle_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! Subscriptions are keyed, so an observer can be detached again when the
//! owning scope goes away.
//!
//! ## Promises
//!
//! A `Promise` is the settled-exactly-once half of a deferred computation;
//! the `Completer` is the producer half:
//!
//! ```rust
//! use settle_core::*;
//!
//! let (promise, completer) = Promise::<i32, String>::pending();
//! promise.on_settle(|result| assert_eq!(result, &Ok(7)));
//! completer.resolve(7).unwrap();
//! ```
//!
//! ## Tracking an operation
//!
//! `AsyncTracker` owns the `Resolving -> Resolved | Rejected` lifecycle of a
//! caller-supplied operation factory. It executes once at construction and
//! again on every `execute()`; only the most recently issued execution may
//! write the terminal state:
//!
//! ```rust
//! use settle_core::*;
//!
//! let tracker = AsyncTracker::<i32, String>::new(|| Promise::resolved(42));
//! assert_eq!(tracker.state(), AsyncState::Resolved(42));
//! ```
//!
//! ## Debouncing
//!
//! `Debounced` defers an action through a host [`Scheduler`]. Tests (and
//! hosts that drive time manually) use [`TestScheduler`]:
//!
//! ```rust
//! use settle_core::*;
//! use std::rc::Rc;
//! use web_time::Duration;
//!
//! let scheduler = Rc::new(TestScheduler::new());
//! let seen = signal(0);
//! let debounced = Debounced::with_delay(scheduler.clone(), Duration::from_millis(100), {
//!     let seen = seen.clone();
//!     move |v: i32| seen.set(v)
//! });
//!
//! debounced.call(1);
//! debounced.call(2);
//! scheduler.advance(Duration::from_millis(100));
//! assert_eq!(seen.get(), 2);
//! ```
//!
//! ## Remembered state
//!
//! The composition layer (`remember*`, `ComposeGuard`) gives hook-style
//! call sites stable storage across passes; `settle-hooks` builds
//! `use_promise!`, `use_debounced_value`, and friends on top of it.
//!
//! Everything here is single-threaded and cooperative: `Rc`/`RefCell` inside,
//! no locks, no executor. The host supplies the event loop and the timer
//! scheduler; Settle supplies the state machines.

pub mod compose;
pub mod debounce;
pub mod error;
pub mod prelude;
pub mod promise;
pub mod scheduler;
pub mod scope;
pub mod signal;
pub mod tests;
pub mod tracker;

pub use compose::*;
pub use debounce::*;
pub use error::*;
pub use promise::*;
pub use scheduler::*;
pub use scope::*;
pub use signal::*;
pub use tracker::*;
