//! Checkout error types.

use thiserror::Error;

/// Errors that stop a checkout before any purchase request is sent.
///
/// Per-line purchase failures are not errors at this level; they are
/// recorded in the [`CheckoutOutcome`](crate::CheckoutOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Nobody is signed in.
    #[error("Checkout requires a signed-in user")]
    Unauthenticated,
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
