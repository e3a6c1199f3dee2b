use anyhow::Context;
use hire_scheduling::{app, cache, catalog::Catalog, config::Config, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hire_scheduling=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load config")?;

    let catalog = match (&config.database_url, &config.products_file) {
        (Some(url), _) => {
            tracing::info!("Using PostgreSQL product catalog");
            Catalog::connect(url)
                .await
                .context("Failed to connect to database")?
        }
        (None, Some(path)) => {
            tracing::info!("Using static product catalog from {}", path.display());
            Catalog::from_json_file(path).context("Failed to load products file")?
        }
        (None, None) => {
            tracing::warn!("No DATABASE_URL or PRODUCTS_FILE set, catalog is empty");
            Catalog::from_products(Vec::new())
        }
    };

    let app_cache = cache::AppCache::new(config.product_cache_ttl);
    tokio::spawn(cache::start_cache_warmer(
        app_cache.clone(),
        catalog.clone(),
        config.cache_warm_interval,
    ));

    let state = AppState::new(catalog, app_cache, config.price_format.clone());
    let app = app(state, &config.assets_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
