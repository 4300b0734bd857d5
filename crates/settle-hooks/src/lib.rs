//! Hook-style helpers over `settle-core`.
//!
//! Each hook is a function meant to be called on every composition pass;
//! storage lives in keyed remember slots, so the Nth pass sees the state the
//! first pass created.
//!
//! - [`use_promise!`] — tracks an async operation, re-executing when its
//!   dependency key changes.
//! - [`async_view`] — renders exactly one of three callbacks for the
//!   tracker's current state, with a retry handle in each payload.
//! - [`use_debounced_value`] — a value that trails its input by a delay.
//! - [`use_list`] / [`use_pagination`] — small state holders for lists and
//!   page cursors.
//!
//! ```rust
//! use settle_core::*;
//! use settle_hooks::{async_view, use_promise};
//!
//! reset_composition();
//! let label = compose(|| {
//!     let user_id = 7;
//!     let tracker = use_promise!(user_id, move || Promise::<String, String>::resolved(
//!         format!("user {user_id}")
//!     ));
//!     async_view(
//!         &tracker,
//!         |_resolving| "loading".to_string(),
//!         |resolved| resolved.value,
//!         |rejected| format!("error: {}", rejected.error),
//!     )
//! });
//! assert_eq!(label, "user 7");
//! ```

pub mod debounced;
pub mod list;
pub mod pagination;
pub mod promise;
pub mod view;

pub use debounced::*;
pub use list::*;
pub use pagination::*;
pub use promise::*;
pub use view::*;
