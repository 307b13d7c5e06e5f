//! Storefront error types.

use checkout::CheckoutError;
use common::SweetId;
use domain::{CartError, CatalogError};
use thiserror::Error;

/// Errors raised while wiring or running the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// The configured base URL is unusable.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The catalog could not be read.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The cart refused the change.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The catalog does not list the requested sweet.
    #[error("Sweet not in catalog: {0}")]
    UnknownSweet(SweetId),

    /// A checkout could not start.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Convenience type alias for storefront results.
pub type Result<T> = std::result::Result<T, StorefrontError>;
