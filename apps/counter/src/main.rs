//! # Madang Counter Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Madang Counter                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Terminal                                    │  │
//! │  │  madang shell   madang lookup   madang order   madang books      │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Starts the runtime, calls run()                  │  │
//! │  │  lib.rs ─────► Logging, config, database, dispatch              │  │
//! │  │  commands/ ──► lookup_history, place_order, list_books          │  │
//! │  │  state/ ─────► DbState, CatalogState, CounterConfig             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  madang.db (Customer, Book, Orders; WAL mode)                    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Setup lives in lib.rs
    madang_counter::run().await
}
