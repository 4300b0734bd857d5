pub use crate::compose::{
    ComposeGuard, compose, remember, remember_state, remember_state_with_key, remember_with_key,
    reset_composition,
};
pub use crate::debounce::{DEFAULT_DELAY, Debounced};
pub use crate::error::PromiseError;
pub use crate::promise::{Completer, Promise};
pub use crate::scheduler::{Scheduler, TestScheduler, TimerKey};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::signal::{Signal, SubKey, signal};
pub use crate::tracker::{AsyncState, AsyncTracker, Retry};
