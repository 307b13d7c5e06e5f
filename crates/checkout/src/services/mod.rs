//! Purchase API trait and in-memory implementation.

pub mod purchase;

pub use purchase::{InMemoryPurchaseApi, PurchaseApi, PurchaseError, PurchaseRequest, StockLevel};
