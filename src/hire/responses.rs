//! Response DTOs for hire API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::cache::CacheStats;

use super::calculators::PriceBasis;
use super::cart::{CartItemData, CartTotals, ItemMeta, PricedLineItem};
use super::format::PriceFormat;
use super::order::OrderLineItem;

/// Envelope read by the product page script: `{"success": .., "data": ..}`
#[derive(Debug, Serialize)]
pub struct AjaxResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> AjaxResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }

    pub fn failure(data: T) -> Self {
        Self {
            success: false,
            data,
        }
    }
}

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, format: &PriceFormat) -> Self {
        Self {
            amount,
            currency: format.currency_code.clone(),
        }
    }
}

/// Response for the price preview
#[derive(Debug, Serialize)]
pub struct PricePreviewResponse {
    /// Price markup ready to drop into the page
    pub new_price: String,
    #[serde(flatten)]
    pub price: MoneyResponse,
    pub days: i64,
}

/// Response for add-to-cart capture
#[derive(Debug, Serialize)]
pub struct CartItemDataResponse {
    pub product_id: i64,
    pub quantity: u32,
    pub unique_key: Option<Uuid>,
    pub hire_start_date: Option<String>,
    pub hire_end_date: Option<String>,
    pub item_data: Vec<ItemMeta>,
}

impl CartItemDataResponse {
    pub fn new(product_id: i64, quantity: u32, data: CartItemData) -> Self {
        let item_data = super::cart::item_display_data(data.hire.as_ref());
        let (hire_start_date, hire_end_date) = match data.hire {
            Some(hire) => (Some(hire.start), Some(hire.end)),
            None => (None, None),
        };

        Self {
            product_id,
            quantity,
            unique_key: data.unique_key,
            hire_start_date,
            hire_end_date,
            item_data,
        }
    }
}

/// One repriced cart line
#[derive(Debug, Serialize)]
pub struct PricedLineResponse {
    pub key: Option<Uuid>,
    pub product_id: i64,
    pub quantity: u32,
    pub days: Option<i64>,
    pub basis: Option<PriceBasis>,
    pub unit_price: MoneyResponse,
    pub line_total: MoneyResponse,
    pub item_data: Vec<ItemMeta>,
}

impl PricedLineResponse {
    pub fn new(line: &PricedLineItem, format: &PriceFormat) -> Self {
        Self {
            key: line.key,
            product_id: line.product_id,
            quantity: line.quantity,
            days: line.quote.map(|q| q.days),
            basis: line.quote.map(|q| q.basis),
            unit_price: MoneyResponse::new(line.unit_price, format),
            line_total: MoneyResponse::new(line.line_total, format),
            item_data: line.item_data(),
        }
    }
}

/// Response for the cart recompute hook
#[derive(Debug, Serialize)]
pub struct CartTotalsResponse {
    pub lines: Vec<PricedLineResponse>,
    pub subtotal: MoneyResponse,
    pub formatted_subtotal: String,
}

impl CartTotalsResponse {
    pub fn new(totals: &CartTotals, format: &PriceFormat) -> Self {
        Self {
            lines: totals
                .lines
                .iter()
                .map(|l| PricedLineResponse::new(l, format))
                .collect(),
            subtotal: MoneyResponse::new(totals.subtotal, format),
            formatted_subtotal: format.format_plain(totals.subtotal),
        }
    }
}

/// One finalized order line
#[derive(Debug, Serialize)]
pub struct OrderLineResponse {
    pub cart_item_key: Option<Uuid>,
    pub product_id: i64,
    pub quantity: u32,
    pub subtotal: MoneyResponse,
    pub total: MoneyResponse,
    pub meta: Vec<ItemMeta>,
}

impl OrderLineResponse {
    pub fn new(line: &OrderLineItem, format: &PriceFormat) -> Self {
        Self {
            cart_item_key: line.cart_item_key(),
            product_id: line.product_id(),
            quantity: line.quantity(),
            subtotal: MoneyResponse::new(line.subtotal(), format),
            total: MoneyResponse::new(line.total(), format),
            meta: line.meta().to_vec(),
        }
    }
}

/// Response for the order finalize hook
#[derive(Debug, Serialize)]
pub struct OrderLinesResponse {
    pub lines: Vec<OrderLineResponse>,
}

/// Liveness check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache: CacheStats,
}
