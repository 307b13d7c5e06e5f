//! Storefront entry point.
//!
//! Loads the persisted cart, reports what is in it and checks it out once.

use std::process::ExitCode;

use storefront::{ClientConfig, HttpStorefront, StorefrontError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

async fn run(config: ClientConfig) -> Result<bool, StorefrontError> {
    let storefront = HttpStorefront::open(&config).await?;
    let cart = storefront.cart();

    tracing::info!(
        lines = cart.line_count().await,
        items = cart.total_item_count().await,
        total = %cart.total_price().await,
        "cart loaded"
    );

    if cart.is_empty().await {
        tracing::info!("cart is empty, nothing to check out");
        return Ok(true);
    }

    let outcome = storefront.checkout().await?;
    for line in outcome.failed_lines() {
        if let Some(error) = line.error() {
            tracing::error!(
                sweet = %line.sweet_name,
                quantity = line.quantity,
                %error,
                "line not purchased"
            );
        }
    }

    tracing::info!(
        checkout_id = %outcome.checkout_id,
        status = %outcome.status(),
        cart_cleared = outcome.cart_cleared,
        "checkout finished"
    );
    Ok(outcome.is_success())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = ClientConfig::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(?config, "starting storefront");

    // 2. Check out
    match run(config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "storefront failed");
            ExitCode::FAILURE
        }
    }
}
