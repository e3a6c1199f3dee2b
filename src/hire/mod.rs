//! Hire scheduling and duration-based pricing.
//!
//! Customers pick a hire start and end date; the product is charged its unit
//! price for every whole day hired. The same price is shown on the product
//! page, applied to the cart line and frozen onto the order line.

pub mod calculators;
pub mod cart;
pub mod format;
pub mod models;
pub mod order;
pub mod period;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{hire_price, round_money, HirePricer, HireQuote, PriceBasis, UnitPrice};
pub use period::{HireDates, HirePeriod};
pub use routes::router;
pub use services::{HireError, PricePreview};
