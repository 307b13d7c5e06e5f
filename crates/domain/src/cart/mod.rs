//! Cart aggregate and related types.

mod aggregate;
mod events;
mod store;
mod value_objects;

pub use aggregate::Cart;
pub use events::CartEvent;
pub use store::{CartChange, CartStore};
pub use value_objects::{CartLine, CatalogItem};

use common::SweetId;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity is not a positive integer.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: i64 },

    /// Merging would overflow the line's quantity.
    #[error("Quantity overflow for sweet {sweet_id}")]
    QuantityOverflow { sweet_id: SweetId },

    /// More than one line for the same sweet.
    #[error("Duplicate line for sweet {sweet_id}")]
    DuplicateLine { sweet_id: SweetId },
}
