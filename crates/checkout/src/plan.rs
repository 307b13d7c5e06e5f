//! The ordered list of purchase requests derived from a cart snapshot.

use domain::CartLine;

use crate::services::PurchaseRequest;

/// One purchase request plus the display name used in logs and outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseStep {
    pub request: PurchaseRequest,
    pub sweet_name: String,
}

/// Purchase steps in cart order.
///
/// Built from a snapshot, so edits to the live cart after planning never
/// change what gets sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutPlan {
    steps: Vec<PurchaseStep>,
}

impl CheckoutPlan {
    /// Builds one step per line, preserving line order.
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let steps = lines
            .iter()
            .map(|line| PurchaseStep {
                request: PurchaseRequest {
                    sweet_id: line.sweet_id(),
                    quantity: line.quantity,
                },
                sweet_name: line.sweet.name.clone(),
            })
            .collect();
        Self { steps }
    }

    pub fn steps(&self) -> &[PurchaseStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl IntoIterator for CheckoutPlan {
    type Item = PurchaseStep;
    type IntoIter = std::vec::IntoIter<PurchaseStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
