//! Hire pricing services with catalog access.
//!
//! Each lifecycle hook resolves base prices here (cache first, then the
//! catalog) and prices through the shared [`HirePricer`], so the preview,
//! the cart and the order always agree.

use std::sync::Arc;

use crate::error::Result;
use crate::AppState;

use super::calculators::HireQuote;
use super::cart::{self, CartLine, CartTotals};
use super::models::Product;
use super::order::{self, OrderLineItem};
use super::period::HirePeriod;
use super::requests::PreviewInput;

/// Hire request error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HireError {
    #[error("Invalid data received.")]
    InvalidRequest,

    #[error("Invalid hire duration or dates.")]
    InvalidPeriod,

    #[error("Product not found.")]
    ProductNotFound(i64),
}

/// Result of a price preview
#[derive(Debug, Clone)]
pub struct PricePreview {
    pub quote: HireQuote,
    /// Formatted price markup
    pub new_price: String,
}

/// Resolve a product, cache first.
pub async fn find_product(state: &AppState, product_id: i64) -> Result<Arc<Product>> {
    if let Some(cached) = state.cache.products.get(&product_id).await {
        tracing::debug!("Cache HIT for product: {}", product_id);
        return Ok(cached);
    }

    tracing::debug!("Cache MISS for product: {}", product_id);
    let product = state
        .catalog
        .find_product(product_id)
        .await?
        .ok_or(HireError::ProductNotFound(product_id))?;

    let product = Arc::new(product);
    state.cache.products.insert(product_id, product.clone()).await;
    Ok(product)
}

/// Price preview for the product page.
///
/// Unlike the cart hook, the preview refuses periods that are not billable
/// so the page shows no price instead of the fallback.
pub async fn preview_price(state: &AppState, input: PreviewInput) -> Result<PricePreview> {
    let period = HirePeriod::parse(&input.start_date, &input.end_date)
        .filter(HirePeriod::is_billable)
        .ok_or(HireError::InvalidPeriod)?;

    let product = find_product(state, input.product_id).await?;
    let quote = state.pricer.quote(product.unit_price(), Some(period))?;
    let new_price = state.price_format.to_html(quote.total)?;

    tracing::debug!(
        "Preview for Product ID: {}, {} to {}, {} days: {}",
        input.product_id,
        period.start_date,
        period.end_date,
        quote.days,
        quote.total
    );

    Ok(PricePreview { quote, new_price })
}

/// Cart totals hook over the host's cart lines.
pub async fn recalculate_cart(state: &AppState, lines: Vec<CartLine>) -> Result<CartTotals> {
    let mut priced_inputs = Vec::with_capacity(lines.len());
    for line in lines {
        let product = find_product(state, line.product_id).await?;
        priced_inputs.push((line, product.unit_price()));
    }

    Ok(cart::recalculate(&state.pricer, priced_inputs)?)
}

/// Order line hook: reprice the cart one last time and freeze each line.
pub async fn finalize_order(state: &AppState, lines: Vec<CartLine>) -> Result<Vec<OrderLineItem>> {
    let totals = recalculate_cart(state, lines).await?;
    Ok(totals.lines.iter().map(order::finalize_line).collect())
}
