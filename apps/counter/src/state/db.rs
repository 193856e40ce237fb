//! # Database State
//!
//! Wraps the `Database` handle opened at startup.
//!
//! ## Lifecycle
//! One handle per process: opened in `run`, passed by reference to every
//! command, closed once at shutdown. The inner `SqlitePool` is thread-safe.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn lookup_history(db: &DbState, name: &str) -> ApiResult<History> {
//!     Ok(db.inner().orders().history_for(name).await?)
//! }
//! ```

use madang_db::{Database, DbConfig};

use crate::error::ApiResult;
use crate::state::CounterConfig;

/// Wrapper around `Database` for command state.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens the database described by the config, bootstrapping it from
    /// the seed directory when the file does not exist yet.
    pub async fn open(config: &CounterConfig) -> ApiResult<Self> {
        let db_config = DbConfig::new(&config.database_path)
            .seed_dir(&config.seed_dir)
            .max_connections(config.max_connections);

        Ok(DbState::new(Database::new(db_config).await?))
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Closes the pool. Called once at shutdown.
    pub async fn close(&self) {
        self.db.close().await;
    }
}
