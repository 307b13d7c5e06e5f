//! Sweet shop storefront.
//!
//! Wires the persisted cart, the catalog, the session holder and the
//! checkout orchestrator together, with HTTP adapters for the remote
//! inventory service.

pub mod config;
pub mod error;
pub mod http;

use cart_store::{CartSlot, FileSlot};
use checkout::{CheckoutOrchestrator, CheckoutOutcome, PurchaseApi};
use common::SweetId;
use domain::{CartChange, CartStore, CatalogSource, IdentityProvider, SessionStore};

pub use config::ClientConfig;
pub use error::{Result, StorefrontError};
pub use http::{HttpCatalog, HttpPurchaseApi};

/// The storefront as the binary runs it: file-backed cart, HTTP services.
pub type HttpStorefront = Storefront<FileSlot, HttpPurchaseApi, SessionStore, HttpCatalog>;

/// Composition root owning the cart store, catalog and checkout.
pub struct Storefront<S, P, I, C>
where
    S: CartSlot,
    P: PurchaseApi,
    I: IdentityProvider + Clone,
    C: CatalogSource,
{
    cart: CartStore<S>,
    identity: I,
    catalog: C,
    orchestrator: CheckoutOrchestrator<S, P, I>,
}

impl<S, P, I, C> Storefront<S, P, I, C>
where
    S: CartSlot,
    P: PurchaseApi,
    I: IdentityProvider + Clone,
    C: CatalogSource,
{
    /// Hydrates the cart from `slot` and wires the orchestrator around it.
    pub async fn new(slot: S, purchases: P, identity: I, catalog: C) -> Self {
        let cart = CartStore::hydrate(slot).await;
        let orchestrator = CheckoutOrchestrator::new(cart.clone(), purchases, identity.clone());
        Self {
            cart,
            identity,
            catalog,
            orchestrator,
        }
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn orchestrator(&self) -> &CheckoutOrchestrator<S, P, I> {
        &self.orchestrator
    }

    /// Looks `sweet_id` up in the catalog and adds it to the cart.
    pub async fn add_from_catalog(
        &self,
        sweet_id: SweetId,
        quantity: i64,
    ) -> Result<CartChange> {
        let item = self
            .catalog
            .get(sweet_id)
            .await?
            .ok_or(StorefrontError::UnknownSweet(sweet_id))?;
        Ok(self.cart.add_line(item, quantity).await?)
    }

    /// Checks out the current cart.
    pub async fn checkout(&self) -> Result<CheckoutOutcome> {
        Ok(self.orchestrator.checkout().await?)
    }
}

impl HttpStorefront {
    /// Opens the storefront described by `config`.
    ///
    /// The cart lives under `config.cart_dir`. If the config carries a
    /// token, the session starts signed in with it.
    pub async fn open(config: &ClientConfig) -> Result<Self> {
        let client = http::build_client(config.timeout())?;
        let purchases = HttpPurchaseApi::with_client(client.clone(), &config.api_url)?;
        let mut catalog = HttpCatalog::with_client(client, &config.api_url)?;

        let sessions = SessionStore::new();
        if let Some(token) = &config.token {
            let username = config.username.clone().unwrap_or_else(|| "guest".to_string());
            sessions.sign_in(domain::Session::new(username, Vec::new(), token.clone()));
            catalog = catalog.with_token(token.clone());
        }

        tracing::debug!(
            cart_dir = %config.cart_dir.display(),
            api_url = %config.api_url,
            "opening storefront"
        );
        let slot = FileSlot::new(config.cart_dir.clone());
        Ok(Self::new(slot, purchases, sessions, catalog).await)
    }
}
