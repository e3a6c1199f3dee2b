//! In-memory caching using moka
//!
//! Keeps resolved products close so every pricing hook reads the same base
//! price without a database round-trip.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::hire::models::Product;

/// Number of products preloaded by the cache warmer
const WARM_PRODUCT_LIMIT: i64 = 500;

/// Application cache holding product records
#[derive(Clone)]
pub struct AppCache {
    /// Products (id -> Product)
    pub products: Cache<i64, Arc<Product>>,
}

impl AppCache {
    /// Create a new cache instance with the given product TTL
    pub fn new(product_ttl: Duration) -> Self {
        Self {
            products: Cache::builder()
                .max_capacity(5_000)
                .time_to_live(product_ttl)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            products_size: self.products.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.products.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate a single product, e.g. after a price change
    pub async fn invalidate_product(&self, product_id: i64) {
        self.products.invalidate(&product_id).await;
        info!("Cache invalidated for product: {}", product_id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(10 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub products_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every `every`.
pub async fn start_cache_warmer(cache: AppCache, catalog: Catalog, every: Duration) {
    let mut interval = interval(every);
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &catalog).await;
    }
}

/// Warm the cache with the catalog's products
pub async fn warm_cache(cache: &AppCache, catalog: &Catalog) {
    info!("Starting cache warm-up...");

    match catalog.products(WARM_PRODUCT_LIMIT).await {
        Ok(products) => {
            for product in products {
                cache.products.insert(product.id, Arc::new(product)).await;
            }
        }
        Err(e) => warn!("Failed to warm product cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(id: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price: dec!(10),
            regular_price: None,
        }
    }

    #[tokio::test]
    async fn test_warm_cache_loads_products() {
        let cache = AppCache::default();
        let catalog = Catalog::from_products(vec![product(1), product(2)]);

        warm_cache(&cache, &catalog).await;

        assert!(cache.products.get(&1).await.is_some());
        assert!(cache.products.get(&2).await.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_product() {
        let cache = AppCache::default();
        cache.products.insert(1, Arc::new(product(1))).await;
        cache.products.insert(2, Arc::new(product(2))).await;

        cache.invalidate_product(1).await;

        assert!(cache.products.get(&1).await.is_none());
        assert!(cache.products.get(&2).await.is_some());
    }
}
