//! Purchase API trait and in-memory implementation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use common::SweetId;
use domain::Session;
use thiserror::Error;
use tokio::sync::Mutex;

/// One stock decrement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseRequest {
    /// The sweet to decrement.
    pub sweet_id: SweetId,
    /// Units to take from stock.
    pub quantity: u32,
}

/// Stock reported by the inventory service after a successful purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub sweet_id: SweetId,
    /// Units left after the decrement.
    pub remaining: u32,
}

/// Why a purchase request did not succeed.
///
/// Checkout treats every variant the same way (the line failed); the
/// distinction is kept for logs and for callers that itemize failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// Not enough units left.
    #[error("Insufficient stock for sweet {sweet_id}: requested {requested}")]
    InsufficientStock {
        sweet_id: SweetId,
        requested: u32,
        available: Option<u32>,
    },

    /// The sweet no longer exists.
    #[error("Sweet not found: {sweet_id}")]
    NotFound { sweet_id: SweetId },

    /// The service rejected the session's credentials.
    #[error("Purchase not authorized")]
    Unauthorized,

    /// The service answered with an error status.
    #[error("Purchase rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never got a response.
    #[error("Purchase transport error: {0}")]
    Transport(String),
}

/// Trait for the remote stock-decrement endpoint.
#[async_trait]
pub trait PurchaseApi: Send + Sync {
    /// Decrements stock for one sweet on behalf of `session`.
    async fn purchase(
        &self,
        session: &Session,
        request: PurchaseRequest,
    ) -> Result<StockLevel, PurchaseError>;
}

#[derive(Debug, Default)]
struct InMemoryPurchaseState {
    stock: HashMap<SweetId, u32>,
    unavailable: HashSet<SweetId>,
    calls: Vec<PurchaseRequest>,
    in_flight: usize,
    max_in_flight: usize,
}

/// In-memory inventory service for testing.
///
/// Follows the remote service's rules: unknown sweets are `NotFound`, a
/// request larger than the remaining stock is `InsufficientStock`, anything
/// else decrements stock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPurchaseApi {
    state: Arc<Mutex<InMemoryPurchaseState>>,
}

impl InMemoryPurchaseApi {
    /// Creates a new in-memory purchase API with no stock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an API with the given starting stock.
    pub fn with_stock(stock: impl IntoIterator<Item = (SweetId, u32)>) -> Self {
        let state = InMemoryPurchaseState {
            stock: stock.into_iter().collect(),
            ..InMemoryPurchaseState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Sets the stock for a sweet.
    pub async fn set_stock(&self, sweet_id: SweetId, units: u32) {
        self.state.lock().await.stock.insert(sweet_id, units);
    }

    /// Returns the current stock for a sweet.
    pub async fn stock(&self, sweet_id: SweetId) -> Option<u32> {
        self.state.lock().await.stock.get(&sweet_id).copied()
    }

    /// Makes every request for `sweet_id` fail with a service error.
    pub async fn set_unavailable(&self, sweet_id: SweetId, unavailable: bool) {
        let mut state = self.state.lock().await;
        if unavailable {
            state.unavailable.insert(sweet_id);
        } else {
            state.unavailable.remove(&sweet_id);
        }
    }

    /// Returns every request received, in arrival order.
    pub async fn calls(&self) -> Vec<PurchaseRequest> {
        self.state.lock().await.calls.clone()
    }

    /// Returns the number of requests received.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// Returns the highest number of requests ever in flight at once.
    pub async fn max_in_flight(&self) -> usize {
        self.state.lock().await.max_in_flight
    }

    fn settle(
        state: &mut InMemoryPurchaseState,
        request: PurchaseRequest,
    ) -> Result<StockLevel, PurchaseError> {
        let PurchaseRequest { sweet_id, quantity } = request;

        if state.unavailable.contains(&sweet_id) {
            return Err(PurchaseError::Rejected {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }

        let available = *state
            .stock
            .get(&sweet_id)
            .ok_or(PurchaseError::NotFound { sweet_id })?;

        if quantity < 1 {
            return Err(PurchaseError::Rejected {
                status: 400,
                message: "Count must be >= 1".to_string(),
            });
        }

        if available < quantity {
            return Err(PurchaseError::InsufficientStock {
                sweet_id,
                requested: quantity,
                available: Some(available),
            });
        }

        let remaining = available - quantity;
        state.stock.insert(sweet_id, remaining);
        Ok(StockLevel {
            sweet_id,
            remaining,
        })
    }
}

#[async_trait]
impl PurchaseApi for InMemoryPurchaseApi {
    async fn purchase(
        &self,
        _session: &Session,
        request: PurchaseRequest,
    ) -> Result<StockLevel, PurchaseError> {
        {
            let mut state = self.state.lock().await;
            state.calls.push(request);
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
        }

        // Give any concurrently issued request a chance to overlap.
        tokio::task::yield_now().await;

        let mut state = self.state.lock().await;
        state.in_flight -= 1;
        Self::settle(&mut state, request)
    }
}
