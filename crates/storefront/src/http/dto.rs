//! Wire representation of a sweet.

use checkout::StockLevel;
use common::{Money, SweetId};
use domain::{CatalogError, CatalogItem};
use serde::{Deserialize, Serialize};

/// A sweet as the inventory service serializes it.
///
/// Prices arrive as decimal numbers and are rounded to whole cents. A
/// negative or non-finite price is rejected when converting to a
/// [`CatalogItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweetDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub price: f64,
    pub quantity: u32,
}

impl SweetDto {
    /// Returns the stock reported after a purchase.
    pub fn stock_level(&self) -> StockLevel {
        StockLevel {
            sweet_id: SweetId::new(self.id),
            remaining: self.quantity,
        }
    }
}

impl TryFrom<SweetDto> for CatalogItem {
    type Error = CatalogError;

    fn try_from(dto: SweetDto) -> Result<Self, Self::Error> {
        if !dto.price.is_finite() || dto.price < 0.0 {
            return Err(CatalogError::Decode(format!(
                "sweet {} has invalid price {}",
                dto.id, dto.price
            )));
        }

        let price = Money::from_decimal(dto.price);
        let item = CatalogItem::new(dto.id, dto.name, price, dto.quantity);
        Ok(match dto.category {
            Some(category) if !category.is_empty() => item.with_category(category),
            _ => item,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_and_convert() {
        let json = r#"{"id":7,"name":"Gummy Bears","category":"Chewy","price":2.5,"quantity":12}"#;
        let dto: SweetDto = serde_json::from_str(json).unwrap();

        let level = dto.stock_level();
        assert_eq!(level.sweet_id, SweetId::new(7));
        assert_eq!(level.remaining, 12);

        let item = CatalogItem::try_from(dto).unwrap();
        assert_eq!(item.price, Money::from_cents(250));
        assert_eq!(item.category.as_deref(), Some("Chewy"));
        assert_eq!(item.stock, 12);
    }

    #[test]
    fn test_missing_category() {
        let json = r#"{"id":1,"name":"Fudge","price":1.999,"quantity":0}"#;
        let item = CatalogItem::try_from(serde_json::from_str::<SweetDto>(json).unwrap()).unwrap();

        assert!(item.category.is_none());
        assert_eq!(item.price, Money::from_cents(200));
        assert!(!item.is_in_stock());
    }

    #[test]
    fn test_invalid_prices_rejected() {
        let dto = |price: f64| SweetDto {
            id: 3,
            name: "Nougat".to_string(),
            category: None,
            price,
            quantity: 4,
        };

        for price in [-0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                CatalogItem::try_from(dto(price)),
                Err(CatalogError::Decode(_))
            ));
        }
        assert_eq!(CatalogItem::try_from(dto(0.0)).unwrap().price, Money::zero());
    }
}
