use thiserror::Error;

/// Errors from the producing half of a [`Promise`](crate::Promise).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromiseError {
    /// The promise was already settled; the original result stands.
    #[error("promise already settled")]
    AlreadySettled,
}
