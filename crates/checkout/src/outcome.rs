//! Result types reported by a finished checkout.

use chrono::{DateTime, Utc};
use common::{CheckoutId, SweetId};

use crate::services::PurchaseError;
use crate::state::CheckoutStatus;

/// What happened to one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineStatus {
    /// The purchase went through.
    Succeeded { remaining_stock: u32 },
    /// The purchase was refused or never answered.
    Failed { error: PurchaseError },
}

/// Per-line result, in the order the lines were sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    pub sweet_id: SweetId,
    pub sweet_name: String,
    pub quantity: u32,
    pub status: LineStatus,
}

impl LineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, LineStatus::Succeeded { .. })
    }

    /// Returns the error if the line failed.
    pub fn error(&self) -> Option<&PurchaseError> {
        match &self.status {
            LineStatus::Failed { error } => Some(error),
            LineStatus::Succeeded { .. } => None,
        }
    }
}

/// Result of a checkout that got past the sign-in check.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub checkout_id: CheckoutId,
    pub lines: Vec<LineOutcome>,
    /// Whether the cart was cleared afterwards.
    pub cart_cleared: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CheckoutOutcome {
    /// Aggregate status: `Succeeded` only when every line succeeded.
    ///
    /// An empty cart has no failing lines and therefore succeeds.
    pub fn status(&self) -> CheckoutStatus {
        if self.lines.iter().all(LineOutcome::is_success) {
            CheckoutStatus::Succeeded
        } else {
            CheckoutStatus::Failed
        }
    }

    pub fn is_success(&self) -> bool {
        self.status().is_success()
    }

    pub fn failed_lines(&self) -> impl Iterator<Item = &LineOutcome> {
        self.lines.iter().filter(|line| !line.is_success())
    }

    pub fn succeeded_lines(&self) -> impl Iterator<Item = &LineOutcome> {
        self.lines.iter().filter(|line| line.is_success())
    }

    /// Wall-clock time between start and finish.
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(lines: Vec<LineOutcome>) -> CheckoutOutcome {
        let now = Utc::now();
        CheckoutOutcome {
            checkout_id: CheckoutId::new(),
            lines,
            cart_cleared: false,
            started_at: now,
            finished_at: now,
        }
    }

    fn ok_line(id: i64) -> LineOutcome {
        LineOutcome {
            sweet_id: SweetId::new(id),
            sweet_name: format!("Sweet {id}"),
            quantity: 1,
            status: LineStatus::Succeeded { remaining_stock: 4 },
        }
    }

    fn failed_line(id: i64) -> LineOutcome {
        LineOutcome {
            sweet_id: SweetId::new(id),
            sweet_name: format!("Sweet {id}"),
            quantity: 1,
            status: LineStatus::Failed {
                error: PurchaseError::NotFound {
                    sweet_id: SweetId::new(id),
                },
            },
        }
    }

    #[test]
    fn test_all_success() {
        let outcome = outcome(vec![ok_line(1), ok_line(2)]);
        assert_eq!(outcome.status(), CheckoutStatus::Succeeded);
        assert_eq!(outcome.failed_lines().count(), 0);
    }

    #[test]
    fn test_any_failure_fails_checkout() {
        let outcome = outcome(vec![ok_line(1), failed_line(2), ok_line(3)]);

        assert_eq!(outcome.status(), CheckoutStatus::Failed);
        assert_eq!(outcome.succeeded_lines().count(), 2);

        let failed: Vec<_> = outcome.failed_lines().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].sweet_id, SweetId::new(2));
        assert!(failed[0].error().is_some());
    }

    #[test]
    fn test_empty_is_success() {
        assert!(outcome(vec![]).is_success());
    }
}
