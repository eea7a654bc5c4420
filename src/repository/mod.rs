use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbConnection, DbPool, establish_connection_pool};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};
use thiserror::Error;

use crate::config::{CartBackend, StorefrontConfig};
use crate::domain::cart::CartItem;
use crate::domain::product::{Category, Product};

pub mod cart;
pub mod catalog;
pub mod memory;

#[cfg(test)]
pub mod mock;

pub use catalog::StaticCatalog;
pub use memory::MemoryCartStorage;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised by catalog and cart storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database or connection pool failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
    /// Stored cart could not be encoded.
    #[error("failed to encode cart: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Another user of the storage panicked while holding its lock.
    #[error("storage lock poisoned")]
    Poisoned,
    /// The backend could not be opened.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Pending schema migrations could not be applied.
    #[error("failed to run migrations: {0}")]
    Migration(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Clone)]
/// Diesel-backed cart storage that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Apply any embedded migrations that have not run yet.
    pub fn run_migrations(&self) -> StorageResult<()> {
        let mut conn = self.conn()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| StorageError::Migration(err.to_string()))?;
        Ok(())
    }
}

/// Read-only access to the product catalog.
pub trait CatalogReader {
    fn list_all(&self) -> StorageResult<Vec<Product>>;
    fn get_by_id(&self, id: &str) -> StorageResult<Option<Product>>;
    fn list_featured(&self) -> StorageResult<Vec<Product>>;
    fn list_by_category(&self, category: Category) -> StorageResult<Vec<Product>>;
}

/// Durable per-user persistence of cart contents.
pub trait CartStorage {
    fn load_cart(&self, user_id: &str) -> StorageResult<Vec<CartItem>>;
    fn save_cart(&self, user_id: &str, items: &[CartItem]) -> StorageResult<()>;
}

impl<T: CartStorage + ?Sized> CartStorage for Box<T> {
    fn load_cart(&self, user_id: &str) -> StorageResult<Vec<CartItem>> {
        (**self).load_cart(user_id)
    }

    fn save_cart(&self, user_id: &str, items: &[CartItem]) -> StorageResult<()> {
        (**self).save_cart(user_id, items)
    }
}

/// Open the cart backend selected by `config`.
///
/// Falls back to in-memory storage when the database cannot be prepared, so
/// carts keep working for the session but are not persisted.
pub fn open_cart_storage(config: &StorefrontConfig) -> Box<dyn CartStorage> {
    match config.cart_backend {
        CartBackend::Memory => Box::new(MemoryCartStorage::new()),
        CartBackend::Sqlite => match open_database(&config.database_url) {
            Ok(repo) => Box::new(repo),
            Err(err) => {
                log::error!(
                    "Cart database `{}` unavailable, carts will not be persisted: {err}",
                    config.database_url
                );
                Box::new(MemoryCartStorage::new())
            }
        },
    }
}

fn open_database(database_url: &str) -> StorageResult<DieselRepository> {
    let pool = establish_connection_pool(database_url)
        .map_err(|err| StorageError::Unavailable(err.to_string()))?;
    let repo = DieselRepository::new(pool);
    repo.run_migrations()?;
    Ok(repo)
}
