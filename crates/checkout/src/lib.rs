//! Checkout of the cart against the remote inventory service.
//!
//! A checkout drains the cart one line at a time:
//! 1. Snapshot the cart's lines
//! 2. Send one purchase request per line, awaiting each before the next
//! 3. Record failures and keep going
//!
//! Only a checkout where every line succeeded clears the cart. Any failure
//! leaves the cart exactly as it was, so the user retries the whole cart.

pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod plan;
pub mod services;
pub mod state;

pub use error::CheckoutError;
pub use orchestrator::CheckoutOrchestrator;
pub use outcome::{CheckoutOutcome, LineOutcome, LineStatus};
pub use plan::{CheckoutPlan, PurchaseStep};
pub use services::{
    InMemoryPurchaseApi, PurchaseApi, PurchaseError, PurchaseRequest, StockLevel,
};
pub use state::CheckoutStatus;
