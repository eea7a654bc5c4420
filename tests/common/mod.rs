//! Helpers for integration tests.

use diesel_migrations::MigrationHarness;
use tempfile::TempDir;

use pushkind_common::db::{DbPool, establish_connection_pool};
use storefront::repository::MIGRATIONS;

/// Temporary cart database used in integration tests.
///
/// The file lives in its own directory, removed together with the SQLite
/// side files when the value is dropped.
pub struct TestDb {
    pool: DbPool,
    path: String,
    dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename).to_string_lossy().into_owned();

        let pool =
            establish_connection_pool(&path).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb { pool, path, dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    #[allow(dead_code)]
    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }
}
