//! Product records used for hire pricing.
//!
//! `Product` derives sqlx's FromRow for direct database deserialization and
//! serde's Deserialize for the static JSON catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::calculators::UnitPrice;

/// Product from shop_products
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Active unit price (sale price when on sale)
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// Undiscounted unit price; falls back to `price` when unset
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub regular_price: Option<Decimal>,
}

impl Product {
    pub fn unit_price(&self) -> UnitPrice {
        UnitPrice::new(self.price, self.regular_price.unwrap_or(self.price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unit_price_defaults_regular_to_active() {
        let product = Product {
            id: 1,
            name: "Cement mixer".to_string(),
            price: dec!(25),
            regular_price: None,
        };
        assert_eq!(product.unit_price(), UnitPrice::new(dec!(25), dec!(25)));
    }

    #[test]
    fn test_deserialize_from_catalog_json() {
        let product: Product = serde_json::from_str(
            r#"{"id": 7, "name": "Trailer", "price": "40.00", "regular_price": "45.00"}"#,
        )
        .unwrap();
        assert_eq!(product.unit_price(), UnitPrice::new(dec!(40), dec!(45)));

        let product: Product =
            serde_json::from_str(r#"{"id": 8, "name": "Ladder", "price": "5"}"#).unwrap();
        assert_eq!(product.regular_price, None);
    }
}
