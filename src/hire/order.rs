//! Order line finalization.
//!
//! At checkout each priced cart line becomes an order line whose total and
//! subtotal are the last computed line total. Order lines are immutable.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::cart::{ItemMeta, PricedLineItem};
use super::period::HireDates;

/// A frozen order line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineItem {
    cart_item_key: Option<Uuid>,
    product_id: i64,
    quantity: u32,
    hire: Option<HireDates>,
    subtotal: Decimal,
    total: Decimal,
    meta: Vec<ItemMeta>,
}

impl OrderLineItem {
    pub fn cart_item_key(&self) -> Option<Uuid> {
        self.cart_item_key
    }

    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn hire(&self) -> Option<&HireDates> {
        self.hire.as_ref()
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn meta(&self) -> &[ItemMeta] {
        &self.meta
    }
}

/// Order line hook: freeze a priced cart line.
pub fn finalize_line(line: &PricedLineItem) -> OrderLineItem {
    OrderLineItem {
        cart_item_key: line.key,
        product_id: line.product_id,
        quantity: line.quantity,
        hire: line.hire.clone(),
        subtotal: line.line_total,
        total: line.line_total,
        meta: line.item_data(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hire::calculators::{HirePricer, UnitPrice};
    use crate::hire::cart::{price_line, CartLine};
    use rust_decimal_macros::dec;

    #[test]
    fn test_finalize_copies_computed_total() {
        let line = CartLine {
            key: Some(Uuid::new_v4()),
            product_id: 9,
            quantity: 2,
            hire: Some(HireDates::new("2024-01-01", "2024-01-04")),
        };
        let priced =
            price_line(&HirePricer::default(), &line, UnitPrice::from(dec!(10))).unwrap();

        let order_line = finalize_line(&priced);
        assert_eq!(order_line.total(), dec!(60));
        assert_eq!(order_line.subtotal(), dec!(60));
        assert_eq!(order_line.cart_item_key(), line.key);
        assert_eq!(order_line.meta().len(), 2);
        assert_eq!(order_line.hire(), line.hire.as_ref());
    }

    #[test]
    fn test_finalize_plain_line() {
        let line = CartLine {
            key: None,
            product_id: 3,
            quantity: 1,
            hire: None,
        };
        let priced =
            price_line(&HirePricer::default(), &line, UnitPrice::from(dec!(7.25))).unwrap();

        let order_line = finalize_line(&priced);
        assert_eq!(order_line.total(), dec!(7.25));
        assert!(order_line.meta().is_empty());
        assert_eq!(order_line.quantity(), 1);
        assert_eq!(order_line.product_id(), 3);
    }
}
