//! # State Module
//!
//! Application state for the counter, split into focused types.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      run() (lib.rs)                             │   │
//! │  │  config  = CounterConfig::load(..)                              │   │
//! │  │  db      = DbState::open(&config)                               │   │
//! │  │  catalog = CatalogState::new()                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │   DbState    │  │ CatalogState │  │  CounterConfig   │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Database    │  │  Arc<RwLock< │  │  database_path   │              │
//! │  │  (SQLite     │  │   Option<    │  │  seed_dir        │              │
//! │  │   pool)      │  │   Vec<Book   │  │  store_name      │              │
//! │  │              │  │   Choice>>>> │  │  currency_symbol │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  Commands take only the state they need.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod db;

pub use catalog::CatalogState;
pub use config::{default_config_path, ConfigError, ConfigOverrides, CounterConfig};
pub use db::DbState;
