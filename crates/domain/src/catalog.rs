//! Catalog collaborator.
//!
//! The catalog owns sweets and their stock; the storefront only reads
//! snapshots from it to build cart lines.

use std::sync::Arc;

use async_trait::async_trait;
use common::{Money, SweetId};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::cart::CatalogItem;

/// Errors returned by a catalog source.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never got a response.
    #[error("Catalog transport error: {0}")]
    Transport(String),

    /// The catalog answered with a non-success status.
    #[error("Catalog rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Catalog decode error: {0}")]
    Decode(String),
}

/// Search filters. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive substring of the sweet name.
    pub name: Option<String>,
    /// Case-insensitive substring of the category.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Money>,
    /// Inclusive upper price bound.
    pub max_price: Option<Money>,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Returns true if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().is_none_or(str::is_empty)
            && self.category.as_deref().is_none_or(str::is_empty)
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Returns true if `item` passes every set filter.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(name) = self.name.as_deref()
            && !contains_ignore_case(&item.name, name)
        {
            return false;
        }
        if let Some(category) = self.category.as_deref()
            && !item
                .category
                .as_deref()
                .is_some_and(|c| contains_ignore_case(c, category))
        {
            return false;
        }
        if let Some(min) = self.min_price
            && item.price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && item.price > max
        {
            return false;
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Read-only access to the sweets catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Lists every sweet.
    async fn list(&self) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Lists sweets passing `query`.
    async fn search(&self, query: &CatalogQuery) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Looks up one sweet by ID.
    async fn get(&self, id: SweetId) -> Result<Option<CatalogItem>, CatalogError> {
        Ok(self.list().await?.into_iter().find(|item| item.id == id))
    }
}

/// In-memory catalog for testing and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Arc<RwLock<Vec<CatalogItem>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-filled with `items`.
    pub fn with_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items.into_iter().collect())),
        }
    }

    /// Inserts or replaces a sweet.
    pub async fn upsert(&self, item: CatalogItem) {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn list(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self.items.read().await.clone())
    }

    async fn search(&self, query: &CatalogQuery) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|item| query.matches(item))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::with_items([
            CatalogItem::new(1, "Dark Chocolate Truffle", Money::from_cents(300), 5)
                .with_category("Chocolate"),
            CatalogItem::new(2, "Milk Chocolate Bar", Money::from_cents(150), 0)
                .with_category("Chocolate"),
            CatalogItem::new(3, "Sour Gummies", Money::from_cents(99), 40).with_category("Gummy"),
            CatalogItem::new(4, "Mystery Bag", Money::from_cents(500), 1),
        ])
    }

    fn ids(items: &[CatalogItem]) -> Vec<i64> {
        items.iter().map(|i| i.id.as_i64()).collect()
    }

    #[tokio::test]
    async fn test_empty_query_matches_everything() {
        let query = CatalogQuery::new().with_name("");
        assert!(query.is_empty());
        let found = catalog().search(&query).await.unwrap();
        assert_eq!(found.len(), 4);
    }

    #[tokio::test]
    async fn test_name_filter_is_case_insensitive_substring() {
        let found = catalog()
            .search(&CatalogQuery::new().with_name("CHOCOLATE"))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_category_filter_skips_uncategorised() {
        let found = catalog()
            .search(&CatalogQuery::new().with_category("gum"))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec![3]);
    }

    #[tokio::test]
    async fn test_price_bounds_are_inclusive() {
        let query = CatalogQuery::new()
            .with_price_range(Some(Money::from_cents(150)), Some(Money::from_cents(300)));
        let found = catalog().search(&query).await.unwrap();
        assert_eq!(ids(&found), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_get_and_upsert() {
        let catalog = catalog();
        catalog
            .upsert(CatalogItem::new(3, "Sour Gummies", Money::from_cents(99), 0))
            .await;

        let item = catalog.get(SweetId::new(3)).await.unwrap().unwrap();
        assert_eq!(item.stock, 0);
        assert!(catalog.get(SweetId::new(42)).await.unwrap().is_none());
    }
}
