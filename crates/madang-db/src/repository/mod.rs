//! # Repository Module
//!
//! Database repository implementations for the Madang counter.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Counter command                                                       │
//! │       │                                                                 │
//! │       │  db.orders().place(&request)                                   │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── place(&self, request)      customer + order, one transaction      │
//! │  ├── create(&self, custid, line)                                       │
//! │  └── history_for(&self, name)                                          │
//! │       │                                                                 │
//! │       │  parameterized SQL                                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`] - Name resolution and customer creation
//! - [`BookRepository`] - Catalog reads
//! - [`OrderRepository`] - Order creation, the order workflow, history
//!
//! Write helpers that must share a transaction take a
//! `&mut SqliteConnection` so callers can pass `&mut *tx`.

pub mod book;
pub mod customer;
pub mod order;

pub use book::BookRepository;
pub use customer::CustomerRepository;
pub use order::OrderRepository;
