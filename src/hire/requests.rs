//! Request DTOs for hire API endpoints.

use serde::Deserialize;
use uuid::Uuid;

use super::cart::CartLine;
use super::period::HireDates;
use super::services::HireError;

/// Price preview as posted by the product page script (form-encoded)
#[derive(Debug, Default, Deserialize)]
pub struct PreviewPriceRequest {
    /// Sent by the client script; not used for routing
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
}

/// A preview request with every field present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInput {
    pub product_id: i64,
    pub start_date: String,
    pub end_date: String,
}

impl PreviewPriceRequest {
    /// All three fields are required and the product id must be numeric.
    pub fn validate(self) -> Result<PreviewInput, HireError> {
        let (Some(start_date), Some(end_date), Some(product_id)) =
            (self.start_date, self.end_date, self.product_id)
        else {
            return Err(HireError::InvalidRequest);
        };

        let product_id = product_id
            .trim()
            .parse::<i64>()
            .map_err(|_| HireError::InvalidRequest)?;

        Ok(PreviewInput {
            product_id,
            start_date,
            end_date,
        })
    }
}

fn default_quantity() -> u32 {
    1
}

/// Add-to-cart submission
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub hire_start_date: Option<String>,
    #[serde(default)]
    pub hire_end_date: Option<String>,
}

/// A cart line as sent by the host shop
#[derive(Debug, Clone, Deserialize)]
pub struct CartLineRequest {
    #[serde(default)]
    pub key: Option<Uuid>,
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub hire_start_date: Option<String>,
    #[serde(default)]
    pub hire_end_date: Option<String>,
}

impl From<CartLineRequest> for CartLine {
    fn from(req: CartLineRequest) -> Self {
        CartLine {
            key: req.key,
            product_id: req.product_id,
            quantity: req.quantity,
            hire: HireDates::capture(req.hire_start_date.as_deref(), req.hire_end_date.as_deref()),
        }
    }
}

/// Cart contents for the recompute and finalize hooks
#[derive(Debug, Deserialize)]
pub struct CartRequest {
    pub lines: Vec<CartLineRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: Option<&str>, end: Option<&str>, product: Option<&str>) -> PreviewPriceRequest {
        PreviewPriceRequest {
            action: Some("calculate_price".to_string()),
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
            product_id: product.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_complete_request() {
        let input = request(Some("2024-01-01"), Some("2024-01-04"), Some(" 42 "))
            .validate()
            .unwrap();
        assert_eq!(input.product_id, 42);
        assert_eq!(input.start_date, "2024-01-01");
    }

    #[test]
    fn test_validate_missing_fields() {
        assert_eq!(
            request(Some("2024-01-01"), Some("2024-01-04"), None).validate(),
            Err(HireError::InvalidRequest)
        );
        assert_eq!(
            request(None, Some("2024-01-04"), Some("1")).validate(),
            Err(HireError::InvalidRequest)
        );
        assert_eq!(
            PreviewPriceRequest::default().validate(),
            Err(HireError::InvalidRequest)
        );
    }

    #[test]
    fn test_validate_non_numeric_product() {
        assert_eq!(
            request(Some("2024-01-01"), Some("2024-01-04"), Some("abc")).validate(),
            Err(HireError::InvalidRequest)
        );
    }

    #[test]
    fn test_cart_line_request_defaults() {
        let req: CartLineRequest = serde_json::from_str(r#"{"product_id": 3}"#).unwrap();
        assert_eq!(req.quantity, 1);

        let line = CartLine::from(req);
        assert!(line.hire.is_none());
        assert!(line.key.is_none());
    }

    #[test]
    fn test_cart_line_request_with_dates() {
        let req: CartLineRequest = serde_json::from_str(
            r#"{"product_id": 3, "quantity": 2, "hire_start_date": "2024-01-01", "hire_end_date": "2024-01-05"}"#,
        )
        .unwrap();

        let line = CartLine::from(req);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.hire.unwrap().period().unwrap().days(), 4);
    }
}
