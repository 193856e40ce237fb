//! # madang-db: Database Layer for the Madang Counter
//!
//! SQLite storage for customers, books and orders, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Madang Counter Data Flow                         │
//! │                                                                         │
//! │  Counter command (place_order, lookup_history)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     madang-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Bootstrap   │  │   │
//! │  │   │   (pool.rs)   │    │               │    │              │  │   │
//! │  │   │               │    │ CustomerRepo  │    │ schema.sql   │  │   │
//! │  │   │ SqlitePool    │◄───│ BookRepo      │    │ seed CSVs    │  │   │
//! │  │   │ Lifecycle     │    │ OrderRepo     │    │ (first run)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (madang.db)                 │   │
//! │  │              Customer, Book, Orders - nothing else              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation, first-run detection
//! - [`schema`] - Embedded table definitions
//! - [`bootstrap`] - Seed CSV bulk load
//! - [`error`] - Database error types
//! - [`repository`] - Customer, book and order repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use madang_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("madang.db").seed_dir("data")).await?;
//!
//! let catalog = db.books().catalog().await?;
//! let history = db.orders().history_for("박지성").await?;
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bootstrap;
pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use bootstrap::SeedSummary;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::{BookRepository, CustomerRepository, OrderRepository};
