use settle_core::tracker::{AsyncState, AsyncTracker, Retry};

/// Payload for the in-flight branch of [`async_view`].
pub struct Resolving {
    pub retry: Retry,
}

/// Payload for the success branch.
pub struct Resolved<T> {
    pub value: T,
    pub refresh: Retry,
}

/// Payload for the failure branch.
pub struct Rejected<E> {
    pub error: E,
    pub retry: Retry,
}

/// Selects exactly one of three rendering callbacks for the tracker's
/// current state and invokes it once.
///
/// The retry/refresh handle in every payload is bound to the tracker's
/// `execute()`. The match below is exhaustive over a closed enum: there is
/// no "unreachable state" branch to hit at runtime.
///
/// ```rust
/// use settle_core::*;
/// use settle_hooks::async_view;
///
/// let tracker = AsyncTracker::<u32, String>::new(|| Promise::resolved(3));
/// let shown = async_view(
///     &tracker,
///     |_| "loading...".to_string(),
///     |ok| format!("value: {}", ok.value),
///     |err| format!("failed: {}", err.error),
/// );
/// assert_eq!(shown, "value: 3");
/// ```
pub fn async_view<T, E, R>(
    tracker: &AsyncTracker<T, E>,
    on_resolving: impl FnOnce(Resolving) -> R,
    on_resolved: impl FnOnce(Resolved<T>) -> R,
    on_rejected: impl FnOnce(Rejected<E>) -> R,
) -> R
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    let retry = tracker.retry_handle();
    match tracker.state() {
        AsyncState::Resolving => on_resolving(Resolving { retry }),
        AsyncState::Resolved(value) => on_resolved(Resolved {
            value,
            refresh: retry,
        }),
        AsyncState::Rejected(error) => on_rejected(Rejected { error, retry }),
    }
}
