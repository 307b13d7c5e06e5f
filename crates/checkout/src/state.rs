//! Aggregate checkout status.

use serde::{Deserialize, Serialize};

/// Overall result of a checkout.
///
/// A checkout is all-or-nothing from the cart's point of view: it either
/// succeeded on every line, or it failed and the cart was kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStatus {
    /// Every line was purchased and the cart was cleared.
    Succeeded,

    /// At least one line failed; the cart was left untouched.
    Failed,
}

impl CheckoutStatus {
    /// Returns true for `Succeeded`.
    pub fn is_success(&self) -> bool {
        matches!(self, CheckoutStatus::Succeeded)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Succeeded => "Succeeded",
            CheckoutStatus::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
