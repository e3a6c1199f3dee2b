//! Database queries for hire products.

use sqlx::PgPool;

use crate::error::AppError;

use super::models::Product;

/// Get a live product by id
pub async fn get_product(pool: &PgPool, product_id: i64) -> Result<Option<Product>, AppError> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, price, regular_price
        FROM shop_products
        WHERE id = $1
          AND deleted_at IS NULL
        "#,
    )
    .bind(product_id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

/// List live products, most recently updated first
pub async fn list_products(pool: &PgPool, limit: i64) -> Result<Vec<Product>, AppError> {
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, price, regular_price
        FROM shop_products
        WHERE deleted_at IS NULL
        ORDER BY updated_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(products)
}
