//! # Commands Module
//!
//! One async handler per operator action. The interactive shell and the
//! one-shot subcommands both call these.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── customer.rs  ◄─── lookup_history, resolve_customer, register_customer
//! ├── order.rs     ◄─── place_order (transaction entry submit)
//! └── book.rs      ◄─── list_books, book_choices
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs database
//! async fn lookup_history(db: &DbState, name: &str)
//!
//! // Writes invalidate the catalog cache
//! async fn place_order(db: &DbState, catalog: &CatalogState, form: &OrderForm, date: NaiveDate)
//! ```

pub mod book;
pub mod customer;
pub mod order;
