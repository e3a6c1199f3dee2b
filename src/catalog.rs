//! Product catalog the pricing hooks read base prices from.
//!
//! Backed by PostgreSQL in production. A static catalog loaded from JSON
//! serves local runs and tests without a database.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::AppError;
use crate::hire::models::Product;
use crate::hire::queries;

/// Errors loading a static catalog file
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where products come from
#[derive(Debug, Clone)]
pub enum Catalog {
    Postgres(PgPool),
    Static(Arc<HashMap<i64, Product>>),
}

impl Catalog {
    /// Connect to the shop database
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::Postgres(pool))
    }

    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self::Static(Arc::new(
            products.into_iter().map(|p| (p.id, p)).collect(),
        ))
    }

    /// Parse a JSON array of products
    pub fn from_json_str(json: &str) -> Result<Self, CatalogLoadError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::from_products(products))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogLoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Look up one product by id
    pub async fn find_product(&self, product_id: i64) -> Result<Option<Product>, AppError> {
        match self {
            Catalog::Postgres(pool) => queries::get_product(pool, product_id).await,
            Catalog::Static(products) => Ok(products.get(&product_id).cloned()),
        }
    }

    /// Products worth keeping warm in the cache
    pub async fn products(&self, limit: i64) -> Result<Vec<Product>, AppError> {
        match self {
            Catalog::Postgres(pool) => queries::list_products(pool, limit).await,
            Catalog::Static(products) => {
                let mut all: Vec<Product> = products.values().cloned().collect();
                all.sort_by_key(|p| p.id);
                all.truncate(usize::try_from(limit).unwrap_or(0));
                Ok(all)
            }
        }
    }
}
