//! Core hire pricing calculation.
//!
//! Pure functions for pricing math - no database access. The preview
//! endpoint, the cart recompute hook and the order finalize hook all price
//! through [`HirePricer::quote`], so they always agree.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use super::period::HirePeriod;
use super::services::HireError;

/// Minor-unit precision used when none is configured.
pub const DEFAULT_DECIMALS: u32 = 2;

/// Round to specified decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use hire_scheduling::hire::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// assert_eq!(round_money(dec!(1.005), 2), dec!(1.01));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Per-unit prices of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPrice {
    /// Active price, possibly discounted. Multiplied by the hire duration.
    pub price: Decimal,
    /// Undiscounted price. Charged when the period is not billable.
    pub regular_price: Decimal,
}

impl UnitPrice {
    pub fn new(price: Decimal, regular_price: Decimal) -> Self {
        Self {
            price,
            regular_price,
        }
    }
}

impl From<Decimal> for UnitPrice {
    fn from(price: Decimal) -> Self {
        Self::new(price, price)
    }
}

/// How a quoted total was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    /// Unit price multiplied by the hired days
    Duration,
    /// Period missing, unparseable or not positive: regular price charged
    Fallback,
}

/// Result of pricing one unit over a hire period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HireQuote {
    pub total: Decimal,
    /// Whole days hired; zero when no period could be parsed.
    pub days: i64,
    pub basis: PriceBasis,
}

impl HireQuote {
    pub fn is_fallback(&self) -> bool {
        self.basis == PriceBasis::Fallback
    }
}

/// Prices hire periods at a fixed currency precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HirePricer {
    decimals: u32,
}

impl HirePricer {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Price one unit over `period`.
    ///
    /// A positive duration charges `unit.price * days`. Anything else,
    /// including a period that could not be parsed, charges the regular price.
    /// Totals beyond `Decimal` range are rejected as invalid requests.
    pub fn quote(
        &self,
        unit: UnitPrice,
        period: Option<HirePeriod>,
    ) -> Result<HireQuote, HireError> {
        let days = period.map(|p| p.days()).unwrap_or(0);

        if days > 0 {
            let total = unit
                .price
                .checked_mul(Decimal::from(days))
                .ok_or(HireError::InvalidRequest)?;
            Ok(HireQuote {
                total: round_money(total, self.decimals),
                days,
                basis: PriceBasis::Duration,
            })
        } else {
            Ok(HireQuote {
                total: round_money(unit.regular_price, self.decimals),
                days,
                basis: PriceBasis::Fallback,
            })
        }
    }
}

impl Default for HirePricer {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMALS)
    }
}

/// Total hire price for `base_price` between two customer-entered dates.
///
/// Unparseable or non-positive periods return `base_price` unchanged
/// (rounded to the default precision).
pub fn hire_price(
    base_price: Decimal,
    start_date: &str,
    end_date: &str,
) -> Result<Decimal, HireError> {
    let quote = HirePricer::default().quote(
        UnitPrice::from(base_price),
        HirePeriod::parse(start_date, end_date),
    )?;
    Ok(quote.total)
}
