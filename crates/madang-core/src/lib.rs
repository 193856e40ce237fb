//! # madang-core: Pure Business Logic for the Madang Counter
//!
//! This crate holds the domain model of the bookstore counter and every rule
//! that can be checked without touching the database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Madang Counter Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Terminal (apps/counter)                         │   │
//! │  │     lookup view ──► order view ──► books ──► one-shot CLI       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ madang-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐                │   │
//! │  │   │   types   │  │   price   │  │ validation  │                │   │
//! │  │   │ Customer  │  │   Price   │  │ names, book │                │   │
//! │  │   │ Book Order│  │  (won)    │  │ token, price│                │   │
//! │  │   └───────────┘  └───────────┘  └─────────────┘                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    madang-db (Database Layer)                   │   │
//! │  │        SQLite pool, CSV bootstrap, repositories, workflow       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Book, Order, OrderRequest, ...)
//! - [`price`] - Whole-won sale price type
//! - [`error`] - Domain error types
//! - [`validation`] - Operator input parsing and validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use madang_core::OrderRequest;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//! let request = OrderRequest::parse("박지성", Some("3,축구의 이해"), "21000", date, None).unwrap();
//!
//! assert_eq!(request.bookid, 3);
//! assert_eq!(request.saleprice.won(), 21_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod price;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use price::Price;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a customer name, in characters.
pub const MAX_NAME_CHARS: usize = 40;

/// Maximum length of a customer address, in characters.
pub const MAX_ADDRESS_CHARS: usize = 100;

/// Maximum length of a phone string, in characters.
///
/// The phone number is free-form; only the length is bounded.
pub const MAX_PHONE_CHARS: usize = 30;

/// Placeholder shown to the operator for the phone field.
///
/// Display only. Input is never checked against this shape.
pub const PHONE_FORMAT_HINT: &str = "000-0000-0000";
