//! Domain layer for the sweet shop storefront.
//!
//! This crate provides:
//! - The cart aggregate with its line invariants and merge rules
//! - `CartStore`, the persisted, shareable handle on the session's cart
//! - The catalog and authentication collaborator interfaces the cart and
//!   checkout consume

pub mod cart;
pub mod catalog;
pub mod session;

pub use cart::{
    Cart, CartChange, CartError, CartEvent, CartLine, CartStore, CatalogItem,
};
pub use catalog::{CatalogError, CatalogQuery, CatalogSource, InMemoryCatalog};
pub use session::{IdentityProvider, Session, SessionStore};
