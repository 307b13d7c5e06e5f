//! Persisted cart store shared by the UI bindings and checkout.

use std::sync::Arc;

use cart_store::{CART_SLOT_KEY, CartSlot, PersistedCart, SlotError};
use common::{Money, SweetId};
use tokio::sync::RwLock;

use super::{Cart, CartError, CartEvent, CartLine, CatalogItem};

/// Result of a cart mutation.
#[derive(Debug, Clone)]
pub struct CartChange {
    /// The cart after the mutation.
    pub cart: Cart,

    /// The events that were applied. Empty when the mutation was a no-op.
    pub events: Vec<CartEvent>,
}

impl CartChange {
    /// Returns true if the mutation changed nothing.
    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }
}

/// The session's authoritative cart.
///
/// Cloning the store yields another handle on the same cart, so the UI layer
/// and the checkout orchestrator can be constructed with the same instance.
/// Every mutation that produces events is followed by a full write of the
/// cart to the slot under [`CART_SLOT_KEY`].
pub struct CartStore<S: CartSlot> {
    cart: Arc<RwLock<Cart>>,
    slot: Arc<S>,
}

impl<S: CartSlot> Clone for CartStore<S> {
    fn clone(&self) -> Self {
        Self {
            cart: Arc::clone(&self.cart),
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<S: CartSlot> CartStore<S> {
    /// Creates a store by reading the persisted cart from `slot`.
    ///
    /// Missing, unreadable, or corrupt data yields an empty cart; the error is
    /// logged and never returned. A corrupt payload is overwritten with the
    /// empty cart so it is not read again on the next start.
    #[tracing::instrument(skip(slot))]
    pub async fn hydrate(slot: S) -> Self {
        let (cart, corrupt) = match slot.read(CART_SLOT_KEY).await {
            Ok(Some(blob)) => match decode(&blob) {
                Ok(cart) => {
                    tracing::info!(lines = cart.len(), "cart hydrated from slot");
                    (cart, false)
                }
                Err(error) => {
                    tracing::warn!(%error, "persisted cart corrupt, starting empty");
                    metrics::counter!("cart_hydrate_failures_total").increment(1);
                    (Cart::default(), true)
                }
            },
            Ok(None) => {
                tracing::debug!("no persisted cart, starting empty");
                (Cart::default(), false)
            }
            Err(error) => {
                tracing::warn!(%error, "persisted cart unreadable, starting empty");
                metrics::counter!("cart_hydrate_failures_total").increment(1);
                (Cart::default(), false)
            }
        };

        let store = Self {
            cart: Arc::new(RwLock::new(cart)),
            slot: Arc::new(slot),
        };
        if corrupt {
            store.persist(&Cart::default()).await;
        }
        store
    }

    /// Returns the slot the store writes to.
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Adds `quantity` units of a sweet, merging into an existing line.
    #[tracing::instrument(skip(self, item), fields(sweet_id = %item.id))]
    pub async fn add_line(&self, item: CatalogItem, quantity: i64) -> Result<CartChange, CartError> {
        self.execute(|cart| cart.add_line(item, quantity)).await
    }

    /// Adds a single unit of a sweet.
    pub async fn add_one(&self, item: CatalogItem) -> Result<CartChange, CartError> {
        self.add_line(item, 1).await
    }

    /// Removes the line for a sweet if there is one.
    #[tracing::instrument(skip(self))]
    pub async fn remove_line(&self, sweet_id: SweetId) -> CartChange {
        self.execute_infallible(|cart| cart.remove_line(sweet_id))
            .await
    }

    /// Replaces a line's quantity; `quantity <= 0` removes the line.
    #[tracing::instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        sweet_id: SweetId,
        quantity: i64,
    ) -> Result<CartChange, CartError> {
        self.execute(|cart| cart.set_quantity(sweet_id, quantity))
            .await
    }

    /// Empties the cart.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> CartChange {
        self.execute_infallible(Cart::clear).await
    }

    /// Returns a copy of the current cart.
    pub async fn snapshot(&self) -> Cart {
        self.cart.read().await.clone()
    }

    /// Returns a copy of the current lines in insertion order.
    pub async fn lines(&self) -> Vec<CartLine> {
        self.cart.read().await.lines().to_vec()
    }

    pub async fn total_price(&self) -> Money {
        self.cart.read().await.total_price()
    }

    pub async fn total_item_count(&self) -> u64 {
        self.cart.read().await.total_item_count()
    }

    /// Returns the number of distinct lines.
    pub async fn line_count(&self) -> usize {
        self.cart.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cart.read().await.is_empty()
    }

    /// Runs a command against the cart, applies its events, and persists.
    ///
    /// The write lock is held across the slot write so persisted snapshots
    /// land in the same order as the mutations that produced them.
    async fn execute<F>(&self, command: F) -> Result<CartChange, CartError>
    where
        F: FnOnce(&Cart) -> Result<Vec<CartEvent>, CartError>,
    {
        let mut cart = self.cart.write().await;
        let events = command(&cart)?;

        if events.is_empty() {
            return Ok(CartChange {
                cart: cart.clone(),
                events,
            });
        }

        for event in &events {
            tracing::debug!(event_type = event.event_type(), "applying cart event");
            cart.apply(event.clone());
        }
        self.persist(&cart).await;

        Ok(CartChange {
            cart: cart.clone(),
            events,
        })
    }

    async fn execute_infallible<F>(&self, command: F) -> CartChange
    where
        F: FnOnce(&Cart) -> Vec<CartEvent>,
    {
        let mut cart = self.cart.write().await;
        let events = command(&cart);

        if !events.is_empty() {
            for event in &events {
                tracing::debug!(event_type = event.event_type(), "applying cart event");
                cart.apply(event.clone());
            }
            self.persist(&cart).await;
        }

        CartChange {
            cart: cart.clone(),
            events,
        }
    }

    /// Writes the full cart to the slot.
    ///
    /// The in-memory cart stays authoritative for the session, so a failed
    /// write is logged and counted rather than returned.
    async fn persist(&self, cart: &Cart) {
        let result = match PersistedCart::new(cart).encode() {
            Ok(blob) => self.slot.write(CART_SLOT_KEY, &blob).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::trace!(lines = cart.len(), "cart persisted");
            }
            Err(error) => {
                metrics::counter!("cart_persist_failures_total").increment(1);
                tracing::warn!(%error, "failed to persist cart");
            }
        }
    }
}

/// Decodes a persisted blob and re-checks the line invariants.
fn decode(blob: &str) -> Result<Cart, SlotError> {
    let cart = PersistedCart::<Cart>::decode(blob)?.into_cart();
    cart.check_invariants().map_err(|e| {
        SlotError::Serialization(serde_json::Error::io(std::io::Error::other(e.to_string())))
    })?;
    Ok(cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use cart_store::InMemorySlot;

    /// Slot that counts reads before delegating to an in-memory slot.
    #[derive(Default)]
    struct CountingSlot {
        inner: InMemorySlot,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl CartSlot for CountingSlot {
        async fn read(&self, key: &str) -> cart_store::Result<Option<String>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.read(key).await
        }

        async fn write(&self, key: &str, value: &str) -> cart_store::Result<()> {
            self.inner.write(key, value).await
        }
    }

    fn fudge() -> CatalogItem {
        CatalogItem::new(1, "Fudge", Money::from_cents(250), 10)
    }

    #[tokio::test]
    async fn test_mutation_writes_full_cart() {
        let slot = InMemorySlot::new();
        let store = CartStore::hydrate(slot.clone()).await;

        store.add_line(fudge(), 2).await.unwrap();

        let blob = slot.get_raw(CART_SLOT_KEY).await.unwrap();
        let persisted = PersistedCart::<Cart>::decode(&blob).unwrap().into_cart();
        assert_eq!(persisted, store.snapshot().await);
        assert_eq!(slot.write_count().await, 1);
    }

    #[tokio::test]
    async fn test_rejected_mutation_does_not_write() {
        let slot = InMemorySlot::new();
        let store = CartStore::hydrate(slot.clone()).await;

        let result = store.add_line(fudge(), 0).await;

        assert!(matches!(result, Err(CartError::InvalidQuantity { quantity: 0 })));
        assert!(store.is_empty().await);
        assert_eq!(slot.write_count().await, 0);
    }

    #[tokio::test]
    async fn test_noop_removal_does_not_write() {
        let slot = InMemorySlot::new();
        let store = CartStore::hydrate(slot.clone()).await;

        let change = store.remove_line(SweetId::new(99)).await;

        assert!(change.is_noop());
        assert_eq!(slot.write_count().await, 0);
    }

    #[tokio::test]
    async fn test_clear_always_writes() {
        let slot = InMemorySlot::new();
        let store = CartStore::hydrate(slot.clone()).await;

        store.clear().await;

        assert_eq!(slot.write_count().await, 1);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_in_memory_change() {
        let slot = InMemorySlot::new();
        let store = CartStore::hydrate(slot.clone()).await;
        slot.set_fail_writes(true).await;

        store.add_line(fudge(), 1).await.unwrap();

        assert_eq!(store.line_count().await, 1);
        assert!(slot.get_raw(CART_SLOT_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_one_cart() {
        let store = CartStore::hydrate(InMemorySlot::new()).await;
        let other = store.clone();

        store.add_one(fudge()).await.unwrap();

        assert_eq!(other.total_item_count().await, 1);
    }

    #[tokio::test]
    async fn test_corrupt_slot_is_read_once_and_overwritten() {
        let slot = CountingSlot::default();
        slot.inner.insert_raw(CART_SLOT_KEY, "{oops").await;

        let store = CartStore::hydrate(slot).await;

        assert!(store.is_empty().await);
        assert_eq!(store.slot().reads.load(Ordering::SeqCst), 1);
        let blob = store.slot().inner.get_raw(CART_SLOT_KEY).await.unwrap();
        assert!(PersistedCart::<Cart>::decode(&blob).unwrap().into_cart().is_empty());
    }

    #[tokio::test]
    async fn test_missing_slot_is_read_once_and_left_alone() {
        let store = CartStore::hydrate(CountingSlot::default()).await;

        assert_eq!(store.slot().reads.load(Ordering::SeqCst), 1);
        assert_eq!(store.slot().inner.write_count().await, 0);
    }

    #[tokio::test]
    async fn test_total_price_of_huge_cart_does_not_panic() {
        let store = CartStore::hydrate(InMemorySlot::new()).await;
        let gold = CatalogItem::new(1, "Gold Ladoo", Money::from_cents(3_000_000_000), 10);

        store.add_line(gold, i64::from(u32::MAX)).await.unwrap();

        assert_eq!(store.total_price().await.cents(), i64::MAX);
    }
}
