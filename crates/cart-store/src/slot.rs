use async_trait::async_trait;

use crate::Result;

/// Fixed namespace key under which the whole cart is stored.
pub const CART_SLOT_KEY: &str = "sweet-shop-cart";

/// Core trait for durable local key-value slots.
///
/// A slot maps a flat string key to one serialized blob. Writes replace the
/// whole value; there are no partial or incremental updates. All
/// implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait CartSlot: Send + Sync {
    /// Reads the blob stored under `key`.
    ///
    /// Returns None if nothing has been written yet.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the blob stored under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<()>;
}
