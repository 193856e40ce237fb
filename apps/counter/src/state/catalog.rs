//! # Catalog State
//!
//! Process-lifetime cache of the book selection list.
//!
//! ## Cache Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Cache                                      │
//! │                                                                         │
//! │  choices(db) ──► cached? ──yes──► clone of cached list                 │
//! │                     │                                                   │
//! │                     no                                                  │
//! │                     ▼                                                   │
//! │         BookRepository::catalog() ──► store ──► return                 │
//! │                                                                         │
//! │  Any successful write ──► invalidate() ──► next read reloads           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Protected by `Arc<RwLock<_>>`; clones share one cache.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use madang_core::BookChoice;
use madang_db::Database;

use crate::error::ApiResult;

/// Cached book selection list.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    inner: Arc<RwLock<Option<Vec<BookChoice>>>>,
}

impl CatalogState {
    /// Creates an empty (unloaded) cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the catalog, loading it on first use.
    pub async fn choices(&self, db: &Database) -> ApiResult<Vec<BookChoice>> {
        if let Some(cached) = self.inner.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let mut guard = self.inner.write().await;
        // Another task may have filled it while we waited for the lock
        if let Some(cached) = guard.as_ref() {
            return Ok(cached.clone());
        }

        let loaded = db.books().catalog().await?;
        debug!(count = loaded.len(), "Catalog cache filled");
        *guard = Some(loaded.clone());
        Ok(loaded)
    }

    /// Drops the cached list so the next read goes to the database.
    pub async fn invalidate(&self) {
        *self.inner.write().await = None;
        debug!("Catalog cache invalidated");
    }

    /// True when a list is cached.
    pub async fn is_loaded(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
