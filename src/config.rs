use std::env;

use dotenvy::dotenv;

/// Default SQLite file used for cart persistence.
pub const DEFAULT_DATABASE_URL: &str = "storefront.db";

/// Where cart contents are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartBackend {
    /// SQLite database at [`StorefrontConfig::database_url`].
    #[default]
    Sqlite,
    /// Process memory only; carts are lost on restart.
    Memory,
}

impl CartBackend {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "sqlite" => Some(CartBackend::Sqlite),
            "memory" => Some(CartBackend::Memory),
            _ => None,
        }
    }
}

/// Runtime settings for a storefront session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub cart_backend: CartBackend,
    pub database_url: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            cart_backend: CartBackend::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Read settings from the environment, loading `.env` first when present.
    ///
    /// Recognised variables are `CART_BACKEND` (`sqlite` or `memory`) and
    /// `DATABASE_URL`. Unknown values fall back to the defaults.
    pub fn from_env() -> Self {
        dotenv().ok();

        let cart_backend = match env::var("CART_BACKEND") {
            Ok(value) => CartBackend::from_env_value(&value).unwrap_or_else(|| {
                log::warn!("Unknown CART_BACKEND `{value}`, using sqlite");
                CartBackend::Sqlite
            }),
            Err(_) => CartBackend::default(),
        };
        let database_url = env::var("DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL.to_string());

        Self {
            cart_backend,
            database_url,
        }
    }

    /// Configuration that keeps carts in memory only.
    pub fn in_memory() -> Self {
        Self {
            cart_backend: CartBackend::Memory,
            ..Self::default()
        }
    }
}
