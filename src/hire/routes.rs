//! Hire route handlers

use axum::{
    extract::{rejection::FormRejection, State},
    routing::post,
    Form, Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::cart::{self, CartLine};
use super::requests::{AddToCartRequest, CartRequest, PreviewPriceRequest};
use super::responses::{
    AjaxResponse, CartItemDataResponse, CartTotalsResponse, MoneyResponse, OrderLineResponse,
    OrderLinesResponse, PricePreviewResponse,
};
use super::services::{self, HireError};

/// Routes for the hire hooks
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hire/price", post(preview_price))
        .route("/cart/items", post(add_to_cart))
        .route("/cart/recalculate", post(recalculate_cart))
        .route("/orders/line-items", post(finalize_order))
}

/// Price preview for the product page (form-encoded)
async fn preview_price(
    State(state): State<AppState>,
    form: std::result::Result<Form<PreviewPriceRequest>, FormRejection>,
) -> Result<Json<AjaxResponse<PricePreviewResponse>>> {
    let Form(request) = form.map_err(|_| HireError::InvalidRequest)?;
    let input = request.validate()?;

    let preview = services::preview_price(&state, input).await?;

    Ok(Json(AjaxResponse::success(PricePreviewResponse {
        new_price: preview.new_price,
        price: MoneyResponse::new(preview.quote.total, &state.price_format),
        days: preview.quote.days,
    })))
}

/// Capture hire dates for a product being added to the cart
async fn add_to_cart(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<AjaxResponse<CartItemDataResponse>>> {
    services::find_product(&state, request.product_id).await?;

    let data = cart::add_cart_item_data(
        request.hire_start_date.as_deref(),
        request.hire_end_date.as_deref(),
    );

    Ok(Json(AjaxResponse::success(CartItemDataResponse::new(
        request.product_id,
        request.quantity,
        data,
    ))))
}

/// Cart totals hook
async fn recalculate_cart(
    State(state): State<AppState>,
    Json(request): Json<CartRequest>,
) -> Result<Json<AjaxResponse<CartTotalsResponse>>> {
    let lines: Vec<CartLine> = request.lines.into_iter().map(CartLine::from).collect();
    let totals = services::recalculate_cart(&state, lines).await?;

    Ok(Json(AjaxResponse::success(CartTotalsResponse::new(
        &totals,
        &state.price_format,
    ))))
}

/// Order line hook
async fn finalize_order(
    State(state): State<AppState>,
    Json(request): Json<CartRequest>,
) -> Result<Json<AjaxResponse<OrderLinesResponse>>> {
    let lines: Vec<CartLine> = request.lines.into_iter().map(CartLine::from).collect();
    let order_lines = services::finalize_order(&state, lines).await?;

    Ok(Json(AjaxResponse::success(OrderLinesResponse {
        lines: order_lines
            .iter()
            .map(|l| OrderLineResponse::new(l, &state.price_format))
            .collect(),
    })))
}
