//! Checkout orchestrator for draining the cart into purchase requests.

use cart_store::CartSlot;
use chrono::Utc;
use common::CheckoutId;
use domain::{CartStore, IdentityProvider};

use crate::error::{CheckoutError, Result};
use crate::outcome::{CheckoutOutcome, LineOutcome, LineStatus};
use crate::plan::CheckoutPlan;
use crate::services::PurchaseApi;

/// Drives a checkout of the cart against the purchase API.
///
/// Lines are sent one at a time, in cart order, each awaited before the next.
/// A failed line is recorded and the drain continues. The cart is cleared
/// only when every line succeeded; otherwise it is left exactly as it was.
pub struct CheckoutOrchestrator<S, P, I>
where
    S: CartSlot,
    P: PurchaseApi,
    I: IdentityProvider,
{
    cart: CartStore<S>,
    purchases: P,
    identity: I,
}

impl<S, P, I> CheckoutOrchestrator<S, P, I>
where
    S: CartSlot,
    P: PurchaseApi,
    I: IdentityProvider,
{
    /// Creates a new checkout orchestrator.
    pub fn new(cart: CartStore<S>, purchases: P, identity: I) -> Self {
        Self {
            cart,
            purchases,
            identity,
        }
    }

    /// Returns the cart this orchestrator checks out.
    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Returns the purchase API.
    pub fn purchases(&self) -> &P {
        &self.purchases
    }

    /// Checks out the current cart.
    ///
    /// Fails with [`CheckoutError::Unauthenticated`] before any request is
    /// sent if nobody is signed in. Otherwise always returns an outcome;
    /// per-line failures are reported there.
    #[tracing::instrument(skip(self), fields(checkout_id = tracing::field::Empty))]
    pub async fn checkout(&self) -> Result<CheckoutOutcome> {
        let session = self.identity.current().ok_or_else(|| {
            tracing::warn!("checkout refused, nobody is signed in");
            CheckoutError::Unauthenticated
        })?;

        metrics::counter!("checkout_attempts_total").increment(1);
        let checkout_start = std::time::Instant::now();
        let started_at = Utc::now();
        let checkout_id = CheckoutId::new();
        tracing::Span::current().record("checkout_id", tracing::field::display(checkout_id));

        // 1. Snapshot the lines; later cart edits do not affect this run
        let plan = CheckoutPlan::from_lines(&self.cart.lines().await);
        tracing::info!(
            user = %session.username,
            lines = plan.len(),
            "checkout started"
        );

        // 2. Send each line in order, awaiting each before the next
        let mut lines = Vec::with_capacity(plan.len());
        for step in plan {
            let request = step.request;
            let status = match self.purchases.purchase(&session, request).await {
                Ok(level) => {
                    tracing::info!(
                        sweet_id = %request.sweet_id,
                        quantity = request.quantity,
                        remaining = level.remaining,
                        "line purchased"
                    );
                    LineStatus::Succeeded {
                        remaining_stock: level.remaining,
                    }
                }
                Err(error) => {
                    metrics::counter!("checkout_line_failures_total").increment(1);
                    tracing::warn!(
                        sweet_id = %request.sweet_id,
                        quantity = request.quantity,
                        error = %error,
                        "line purchase failed"
                    );
                    LineStatus::Failed { error }
                }
            };
            lines.push(LineOutcome {
                sweet_id: request.sweet_id,
                sweet_name: step.sweet_name,
                quantity: request.quantity,
                status,
            });
        }

        // 3. Clear only when nothing failed
        let all_succeeded = lines.iter().all(LineOutcome::is_success);
        if all_succeeded {
            self.cart.clear().await;
            metrics::counter!("checkout_succeeded_total").increment(1);
            tracing::info!(lines = lines.len(), "checkout succeeded, cart cleared");
        } else {
            let failed = lines.iter().filter(|line| !line.is_success()).count();
            metrics::counter!("checkout_failed_total").increment(1);
            tracing::warn!(
                lines = lines.len(),
                failed,
                "checkout failed, cart kept"
            );
        }

        metrics::histogram!("checkout_duration_seconds")
            .record(checkout_start.elapsed().as_secs_f64());

        Ok(CheckoutOutcome {
            checkout_id,
            lines,
            cart_cleared: all_succeeded,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
