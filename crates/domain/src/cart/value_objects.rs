//! Value objects for the cart domain.

use common::{Money, SweetId};
use serde::{Deserialize, Serialize};

/// A sweet as listed by the catalog at the time it was fetched.
///
/// The cart never mutates these; stock may be stale by the time the line is
/// checked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Catalog identifier.
    pub id: SweetId,

    /// Human-readable name.
    pub name: String,

    /// Category label, if the catalog assigned one.
    #[serde(default)]
    pub category: Option<String>,

    /// Price per unit.
    pub price: Money,

    /// Units in stock when the item was fetched.
    pub stock: u32,
}

impl CatalogItem {
    /// Creates a new catalog item without a category.
    pub fn new(id: impl Into<SweetId>, name: impl Into<String>, price: Money, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            price,
            stock,
        }
    }

    /// Sets the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns true if the snapshot reported any stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// One (sweet, quantity) pairing inside the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The sweet snapshot taken when the line was first added.
    pub sweet: CatalogItem,

    /// Requested quantity, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Returns the line's sweet ID.
    pub fn sweet_id(&self) -> SweetId {
        self.sweet.id
    }

    /// Returns `price * quantity` using the cached price.
    pub fn line_total(&self) -> Money {
        self.sweet.price.multiply(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = CartLine {
            sweet: CatalogItem::new(1, "Fudge", Money::from_cents(250), 10),
            quantity: 3,
        };
        assert_eq!(line.line_total().cents(), 750);
        assert_eq!(line.sweet_id(), SweetId::new(1));
    }

    #[test]
    fn test_is_in_stock() {
        assert!(CatalogItem::new(1, "Fudge", Money::from_cents(250), 1).is_in_stock());
        assert!(!CatalogItem::new(1, "Fudge", Money::from_cents(250), 0).is_in_stock());
    }

    #[test]
    fn test_category_defaults_to_none_when_absent() {
        let json = r#"{"id":5,"name":"Toffee","price":{"cents":150},"stock":4}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, None);
        assert_eq!(item.price, Money::from_cents(150));
    }
}
