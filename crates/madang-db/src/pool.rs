//! # Database Pool Management
//!
//! Connection pool creation, first-run bootstrap and repository access.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Lifecycle                                 │
//! │                                                                         │
//! │  Counter startup                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path).seed_dir(dir)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       │                                                                 │
//! │       ├── file existed? ──────────────► open pool, ensure schema       │
//! │       │                                                                 │
//! │       └── file absent?  ──► create, schema, load seed CSVs             │
//! │                             (failure: close + delete file, fatal)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  reads and write transactions share it │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::close().await  (at shutdown)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Durability
//! WAL journal with `synchronous = FULL`: a committed write is on disk
//! before the call returns.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::bootstrap::{self, SeedSummary};
use crate::error::{DbError, DbResult};
use crate::repository::book::BookRepository;
use crate::repository::customer::CustomerRepository;
use crate::repository::order::OrderRepository;
use crate::schema;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("madang.db")
///     .seed_dir("data")
///     .max_connections(2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Directory holding the seed CSVs, loaded only when the database file
    /// is created by this call. `None` leaves a fresh database empty.
    pub seed_dir: Option<PathBuf>,

    /// Maximum number of connections in the pool.
    /// Default: 4 (one operator, one command at a time)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            seed_dir: None,
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the seed directory used on first run.
    pub fn seed_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.seed_dir = Some(dir.into());
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Always treated as a fresh database, so a configured seed directory
    /// is loaded every time.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY),
            seed_dir: None,
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
        }
    }

    /// Returns true for the in-memory configuration.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cheap to clone: clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// What the first-run bootstrap loaded, if it ran.
    seeded: Option<SeedSummary>,
}

impl Database {
    /// Opens (and if needed creates and seeds) the database.
    ///
    /// ## What This Does
    /// 1. Notes whether the file exists yet
    /// 2. Creates the pool: WAL, FULL synchronous, foreign keys ON
    /// 3. Ensures the three tables exist
    /// 4. If the file was just created and a seed dir is configured,
    ///    bulk-loads the seed CSVs
    ///
    /// ## Errors
    /// A failed bootstrap closes the pool and removes the half-built file,
    /// so the next start retries from scratch.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let fresh = config.is_in_memory() || !config.database_path.exists();

        info!(
            path = %config.database_path.display(),
            fresh,
            "Initializing database connection"
        );

        if config.max_connections == 0 {
            return Err(DbError::ConnectionFailed(
                "max_connections must be at least 1".to_string(),
            ));
        }

        // The path is a filename, never a URL: '%' and '?' are literal
        let base_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
        };

        let connect_options = base_options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full)
            // SQLite has foreign keys disabled by default
            .foreign_keys(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = config.max_connections, "Database pool created");

        match Self::prepare(&pool, fresh, config.seed_dir.as_deref()).await {
            Ok(seeded) => Ok(Database { pool, seeded }),
            Err(err) => {
                pool.close().await;
                if fresh && !config.is_in_memory() {
                    remove_database_files(&config.database_path);
                }
                Err(err)
            }
        }
    }

    async fn prepare(
        pool: &SqlitePool,
        fresh: bool,
        seed_dir: Option<&Path>,
    ) -> DbResult<Option<SeedSummary>> {
        schema::apply_schema(pool).await?;

        match (fresh, seed_dir) {
            (true, Some(dir)) => Ok(Some(bootstrap::load_seed(pool, dir).await?)),
            _ => Ok(None),
        }
    }

    /// Returns a reference to the connection pool.
    ///
    /// Prefer repository methods; this is for diagnostics and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the seed summary when this open created the database.
    pub fn seeded(&self) -> Option<SeedSummary> {
        self.seeded
    }

    /// Returns the customer repository.
    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    /// Returns the book repository.
    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.pool.clone())
    }

    /// Returns the order repository (also hosts the order workflow).
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// ## Note
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}

/// Deletes a half-created database and its WAL side files.
fn remove_database_files(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let file = PathBuf::from(file);

        if file.exists() {
            match std::fs::remove_file(&file) {
                Ok(()) => debug!(path = %file.display(), "Removed partial database file"),
                Err(e) => warn!(path = %file.display(), error = %e, "Could not remove partial database file"),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert_eq!(db.seeded(), None);
        assert_eq!(db.customers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .seed_dir("/tmp/seed")
            .max_connections(10);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.seed_dir, Some(PathBuf::from("/tmp/seed")));
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_file_database_seeds_once() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("madang.db");
        let seed_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");

        let db = Database::new(DbConfig::new(&db_path).seed_dir(&seed_dir))
            .await
            .unwrap();
        let summary = db.seeded().unwrap();
        assert_eq!((summary.customers, summary.books, summary.orders), (5, 10, 10));
        db.close().await;

        // Second open: file exists, no re-seed, data still there
        let db = Database::new(DbConfig::new(&db_path).seed_dir(&seed_dir))
            .await
            .unwrap();
        assert_eq!(db.seeded(), None);
        assert_eq!(db.books().count().await.unwrap(), 10);
        db.close().await;
    }

    #[tokio::test]
    async fn test_failed_bootstrap_removes_file() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("madang.db");
        let empty_seed = dir.path().join("no-seed-here");

        let err = Database::new(DbConfig::new(&db_path).seed_dir(&empty_seed))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::BootstrapFailed { .. }));
        assert!(!db_path.exists());
    }

    #[tokio::test]
    async fn test_path_with_url_characters_is_opened_verbatim() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("shop%41.db");
        let seed_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");

        let db = Database::new(DbConfig::new(&db_path).seed_dir(&seed_dir))
            .await
            .unwrap();
        assert!(db.seeded().is_some());
        db.close().await;

        assert!(db_path.exists());
        assert!(!dir.path().join("shopA.db").exists());

        // Reopening finds the same file and does not seed again
        let db = Database::new(DbConfig::new(&db_path).seed_dir(&seed_dir))
            .await
            .unwrap();
        assert_eq!(db.seeded(), None);
        assert_eq!(db.customers().count().await.unwrap(), 5);
        db.close().await;
    }

    #[tokio::test]
    async fn test_path_with_question_mark() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("what?.db");

        let db = Database::new(DbConfig::new(&db_path)).await.unwrap();
        db.close().await;

        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_zero_connections_rejected() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("z.db");

        let err = Database::new(DbConfig::new(&db_path).max_connections(0))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ConnectionFailed(_)));
        assert!(!db_path.exists());
    }
}
