//! Cart hooks.
//!
//! Hire dates are captured when a product is added to the cart, shown next
//! to the line in cart and checkout, and every totals pass reprices the line
//! from the product's base price. Repricing never reads a previously
//! computed price, so repeated passes give the same result.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::calculators::{round_money, HirePricer, HireQuote, UnitPrice};
use super::period::HireDates;
use super::services::HireError;

pub const HIRE_START_LABEL: &str = "Hire Start Date";
pub const HIRE_END_LABEL: &str = "Hire End Date";

/// A name/value pair displayed under a cart, checkout or order line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemMeta {
    pub name: String,
    pub value: String,
}

/// Data attached to a cart line when it is added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemData {
    pub hire: Option<HireDates>,
    /// Set for hired lines so two hires of one product stay separate lines
    pub unique_key: Option<Uuid>,
}

/// Capture hire dates from an add-to-cart submission.
pub fn add_cart_item_data(hire_start_date: Option<&str>, hire_end_date: Option<&str>) -> CartItemData {
    match HireDates::capture(hire_start_date, hire_end_date) {
        Some(hire) => CartItemData {
            hire: Some(hire),
            unique_key: Some(Uuid::new_v4()),
        },
        None => CartItemData {
            hire: None,
            unique_key: None,
        },
    }
}

/// Display pairs for a line's hire dates
pub fn item_display_data(hire: Option<&HireDates>) -> Vec<ItemMeta> {
    let Some(hire) = hire else {
        return Vec::new();
    };

    [(HIRE_START_LABEL, &hire.start), (HIRE_END_LABEL, &hire.end)]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| ItemMeta {
            name: name.to_string(),
            value: value.clone(),
        })
        .collect()
}

/// A cart line as the host shop holds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub key: Option<Uuid>,
    pub product_id: i64,
    pub quantity: u32,
    pub hire: Option<HireDates>,
}

/// A cart line with its price for this totals pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLineItem {
    pub key: Option<Uuid>,
    pub product_id: i64,
    pub quantity: u32,
    pub hire: Option<HireDates>,
    /// Present only for hired lines
    pub quote: Option<HireQuote>,
    /// Active per-unit price after hire pricing
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl PricedLineItem {
    pub fn item_data(&self) -> Vec<ItemMeta> {
        item_display_data(self.hire.as_ref())
    }
}

/// Result of one cart totals pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotals {
    pub lines: Vec<PricedLineItem>,
    pub subtotal: Decimal,
}

/// Price a single cart line from the product's unit prices.
pub fn price_line(
    pricer: &HirePricer,
    line: &CartLine,
    unit: UnitPrice,
) -> Result<PricedLineItem, HireError> {
    let (quote, unit_price) = match &line.hire {
        Some(hire) => {
            let quote = pricer.quote(unit, hire.period())?;
            debug!(
                "Product ID: {}, Start Date: {}, End Date: {}, Days Hired: {}",
                line.product_id, hire.start, hire.end, quote.days
            );
            if quote.is_fallback() {
                info!(
                    "Resetting price for Product ID: {} to base price {}",
                    line.product_id, quote.total
                );
            } else {
                debug!("New price for Product ID: {} is {}", line.product_id, quote.total);
            }
            (Some(quote), quote.total)
        }
        None => (None, round_money(unit.price, pricer.decimals())),
    };

    let line_total = unit_price
        .checked_mul(Decimal::from(line.quantity))
        .ok_or(HireError::InvalidRequest)?;

    Ok(PricedLineItem {
        key: line.key,
        product_id: line.product_id,
        quantity: line.quantity,
        hire: line.hire.clone(),
        quote,
        unit_price,
        line_total: round_money(line_total, pricer.decimals()),
    })
}

/// Cart totals hook: reprice every line.
pub fn recalculate(
    pricer: &HirePricer,
    lines: impl IntoIterator<Item = (CartLine, UnitPrice)>,
) -> Result<CartTotals, HireError> {
    let lines = lines
        .into_iter()
        .map(|(line, unit)| price_line(pricer, &line, unit))
        .collect::<Result<Vec<_>, _>>()?;
    let subtotal = lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.line_total))
        .ok_or(HireError::InvalidRequest)?;

    Ok(CartTotals { lines, subtotal })
}
