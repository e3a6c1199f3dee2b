//! Runtime configuration from the environment.
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file by the binary.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::hire::format::{PriceFormat, SymbolPosition};

/// Largest supported minor-unit precision
const MAX_DECIMALS: u32 = 8;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub products_file: Option<PathBuf>,
    pub assets_dir: PathBuf,
    pub price_format: PriceFormat,
    pub product_cache_ttl: Duration,
    pub cache_warm_interval: Duration,
}

impl Config {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup. Unset and blank values take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = PriceFormat::default();

        let bind_addr = parse_or(get("BIND_ADDR"), "BIND_ADDR", "0.0.0.0:3000", |v| {
            v.parse::<SocketAddr>().ok()
        })?;

        let position = parse_or(get("CURRENCY_POSITION"), "CURRENCY_POSITION", "left", |v| {
            SymbolPosition::parse(v)
        })?;

        let decimals = parse_or(get("PRICE_DECIMALS"), "PRICE_DECIMALS", "2", |v| {
            v.parse::<u32>().ok().filter(|d| *d <= MAX_DECIMALS)
        })?;

        let price_format = PriceFormat {
            currency_code: get("CURRENCY_CODE").unwrap_or(defaults.currency_code),
            symbol: get("CURRENCY_SYMBOL").unwrap_or(defaults.symbol),
            position,
            decimals,
            decimal_separator: lookup("PRICE_DECIMAL_SEPARATOR")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.decimal_separator),
            thousand_separator: lookup("PRICE_THOUSAND_SEPARATOR")
                .unwrap_or(defaults.thousand_separator),
        };

        let product_cache_ttl = parse_secs(get("PRODUCT_CACHE_TTL_SECS"), "PRODUCT_CACHE_TTL_SECS")?;
        let cache_warm_interval =
            parse_secs(get("CACHE_WARM_INTERVAL_SECS"), "CACHE_WARM_INTERVAL_SECS")?;

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            products_file: get("PRODUCTS_FILE").map(PathBuf::from),
            assets_dir: get("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("assets")),
            price_format,
            product_cache_ttl,
            cache_warm_interval,
        })
    }
}

fn parse_or<T>(
    raw: Option<String>,
    key: &'static str,
    default: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    let value = raw.unwrap_or_else(|| default.to_string());
    parse(value.trim()).ok_or(ConfigError::Invalid {
        key,
        value,
        reason: "unrecognised value",
    })
}

fn parse_secs(raw: Option<String>, key: &'static str) -> Result<Duration, ConfigError> {
    let secs = parse_or(raw, key, "600", |v| v.parse::<u64>().ok())?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
            reason: "must be positive",
        });
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert!(config.database_url.is_none());
        assert!(config.products_file.is_none());
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.price_format, PriceFormat::default());
        assert_eq!(config.product_cache_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("CURRENCY_CODE", "EUR"),
            ("CURRENCY_SYMBOL", "€"),
            ("CURRENCY_POSITION", "right_space"),
            ("PRICE_DECIMALS", "0"),
            ("PRICE_DECIMAL_SEPARATOR", ","),
            ("PRICE_THOUSAND_SEPARATOR", " "),
            ("CACHE_WARM_INTERVAL_SECS", "60"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/shop"));
        assert_eq!(config.price_format.currency_code, "EUR");
        assert_eq!(config.price_format.position, SymbolPosition::RightSpace);
        assert_eq!(config.price_format.decimals, 0);
        assert_eq!(config.price_format.thousand_separator, " ");
        assert_eq!(config.cache_warm_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_empty_thousand_separator_allowed() {
        let config = load(&[("PRICE_THOUSAND_SEPARATOR", "")]).unwrap();
        assert_eq!(config.price_format.thousand_separator, "");
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("PRICE_DECIMALS", "12")]).unwrap_err();
        assert!(err.to_string().contains("PRICE_DECIMALS"));

        assert!(load(&[("CURRENCY_POSITION", "centre")]).is_err());
        assert!(load(&[("BIND_ADDR", "not an address")]).is_err());
        assert!(load(&[("PRODUCT_CACHE_TTL_SECS", "0")]).is_err());
    }
}
