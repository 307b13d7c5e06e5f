//! Cart aggregate implementation.

use std::collections::HashSet;

use common::{Money, SweetId};
use serde::{Deserialize, Serialize};

use super::{CartError, CartEvent, CartLine, CatalogItem};

/// The shopping cart.
///
/// Lines are kept in insertion order for display. Commands validate against
/// the current state and return events; `apply` folds those events in, so a
/// rejected command never leaves a half-modified cart behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

// Query methods
impl Cart {
    /// Returns all lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line for a sweet.
    pub fn line(&self, sweet_id: SweetId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.sweet.id == sweet_id)
    }

    /// Returns the number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price * quantity` over all lines, using the cached prices.
    ///
    /// Saturates instead of overflowing, so it never panics.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities across lines.
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Checks the line invariants on a cart that did not come from commands,
    /// e.g. one read back from storage.
    pub fn check_invariants(&self) -> Result<(), CartError> {
        let mut seen = HashSet::with_capacity(self.lines.len());
        for line in &self.lines {
            if line.quantity == 0 {
                return Err(CartError::InvalidQuantity { quantity: 0 });
            }
            if !seen.insert(line.sweet.id) {
                return Err(CartError::DuplicateLine {
                    sweet_id: line.sweet.id,
                });
            }
        }
        Ok(())
    }
}

// Command methods (return events)
impl Cart {
    /// Adds `quantity` units of a sweet.
    ///
    /// An existing line for the same sweet has its quantity increased; the
    /// cached sweet snapshot on that line is kept. Stock is not checked.
    pub fn add_line(&self, item: CatalogItem, quantity: i64) -> Result<Vec<CartEvent>, CartError> {
        let quantity = positive_quantity(quantity)?;

        if let Some(existing) = self.line(item.id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CartError::QuantityOverflow { sweet_id: item.id })?;
            Ok(vec![CartEvent::LineQuantityChanged {
                sweet_id: item.id,
                old_quantity: existing.quantity,
                new_quantity,
            }])
        } else {
            Ok(vec![CartEvent::LineAdded {
                sweet: item,
                quantity,
            }])
        }
    }

    /// Removes the line for a sweet. Absent lines are a no-op.
    pub fn remove_line(&self, sweet_id: SweetId) -> Vec<CartEvent> {
        if self.line(sweet_id).is_some() {
            vec![CartEvent::LineRemoved { sweet_id }]
        } else {
            vec![]
        }
    }

    /// Replaces a line's quantity.
    ///
    /// `quantity <= 0` removes the line. Sweets without a line are ignored.
    pub fn set_quantity(
        &self,
        sweet_id: SweetId,
        quantity: i64,
    ) -> Result<Vec<CartEvent>, CartError> {
        if quantity <= 0 {
            return Ok(self.remove_line(sweet_id));
        }

        let Some(existing) = self.line(sweet_id) else {
            return Ok(vec![]);
        };

        let new_quantity = positive_quantity(quantity)?;
        if new_quantity == existing.quantity {
            return Ok(vec![]);
        }

        Ok(vec![CartEvent::LineQuantityChanged {
            sweet_id,
            old_quantity: existing.quantity,
            new_quantity,
        }])
    }

    /// Drops every line.
    pub fn clear(&self) -> Vec<CartEvent> {
        vec![CartEvent::CartCleared {
            line_count: self.lines.len(),
        }]
    }
}

impl Cart {
    /// Applies an event to the cart.
    pub fn apply(&mut self, event: CartEvent) {
        match event {
            CartEvent::LineAdded { sweet, quantity } => {
                self.lines.push(CartLine { sweet, quantity });
            }
            CartEvent::LineQuantityChanged {
                sweet_id,
                new_quantity,
                ..
            } => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.sweet.id == sweet_id) {
                    line.quantity = new_quantity;
                }
            }
            CartEvent::LineRemoved { sweet_id } => {
                self.lines.retain(|line| line.sweet.id != sweet_id);
            }
            CartEvent::CartCleared { .. } => self.lines.clear(),
        }
    }

    /// Applies multiple events in sequence.
    pub fn apply_events(&mut self, events: impl IntoIterator<Item = CartEvent>) {
        for event in events {
            self.apply(event);
        }
    }
}

fn positive_quantity(quantity: i64) -> Result<u32, CartError> {
    u32::try_from(quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or(CartError::InvalidQuantity { quantity })
}
