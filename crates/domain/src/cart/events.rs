//! Cart change events.

use common::SweetId;
use serde::{Deserialize, Serialize};

use super::CatalogItem;

/// Facts produced by cart commands and folded into the cart by `Cart::apply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CartEvent {
    /// A new line was appended.
    LineAdded { sweet: CatalogItem, quantity: u32 },

    /// An existing line's quantity changed.
    LineQuantityChanged {
        sweet_id: SweetId,
        old_quantity: u32,
        new_quantity: u32,
    },

    /// A line was removed.
    LineRemoved { sweet_id: SweetId },

    /// Every line was dropped.
    CartCleared { line_count: usize },
}

impl CartEvent {
    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded { .. } => "LineAdded",
            CartEvent::LineQuantityChanged { .. } => "LineQuantityChanged",
            CartEvent::LineRemoved { .. } => "LineRemoved",
            CartEvent::CartCleared { .. } => "CartCleared",
        }
    }
}
