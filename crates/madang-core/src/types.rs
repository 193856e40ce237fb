//! # Domain Types
//!
//! Core domain types used throughout the Madang counter.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │      Book       │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  custid (PK)    │◄──┤  bookid (PK)    │◄──┤  orderid (PK)   │       │
//! │  │  name           │   │  bookname       │   │  custid  (FK)   │       │
//! │  │  address?       │   │  publisher?     │   │  bookid  (FK)   │       │
//! │  │  phone?         │   │  price?         │   │  saleprice      │       │
//! │  └─────────────────┘   └─────────────────┘   │  orderdate      │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  Workflow inputs/outputs:                                              │
//! │  NewCustomer, CustomerDetails, OrderRequest, CustomerResolution,       │
//! │  History, PlacedOrder, BookChoice                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `custid` and `orderid` are surrogate integers assigned as current
//! maximum + 1 by the database layer. Rows are never updated or deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::price::Price;
use crate::validation::{
    normalize_lookup_name, normalize_phone, parse_book_selection, parse_price, validate_address,
    validate_customer_name, ValidationResult,
};

// =============================================================================
// Customer
// =============================================================================

/// A bookstore customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Surrogate id, max + 1 on creation.
    pub custid: i64,

    /// Display name; lookups match it exactly.
    pub name: String,

    pub address: Option<String>,

    /// Free-form phone text.
    pub phone: Option<String>,
}

/// Details required to register a customer the counter has never seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub address: String,
    pub phone: Option<String>,
}

impl CustomerDetails {
    /// Validates raw address/phone input.
    ///
    /// Address is required; a blank phone becomes `None`.
    pub fn parse(address: &str, phone: Option<&str>) -> ValidationResult<Self> {
        Ok(CustomerDetails {
            address: validate_address(address)?,
            phone: normalize_phone(phone)?,
        })
    }
}

/// A validated customer insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
}

impl NewCustomer {
    /// Validates the name and combines it with already-validated details.
    pub fn new(name: &str, details: CustomerDetails) -> ValidationResult<Self> {
        Ok(NewCustomer {
            name: validate_customer_name(name)?,
            address: details.address,
            phone: details.phone,
        })
    }

    /// Validates every field from raw input.
    pub fn parse(name: &str, address: &str, phone: Option<&str>) -> ValidationResult<Self> {
        NewCustomer::new(name, CustomerDetails::parse(address, phone)?)
    }
}

/// Outcome of looking a customer up by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CustomerResolution {
    /// The name matched; orders go to this customer.
    Existing(Customer),

    /// No customer has this name. Address (and optionally phone) must be
    /// supplied before an order can be placed.
    New { name: String },
}

impl CustomerResolution {
    /// Returns the customer id when the name resolved to a row.
    pub fn custid(&self) -> Option<i64> {
        match self {
            CustomerResolution::Existing(c) => Some(c.custid),
            CustomerResolution::New { .. } => None,
        }
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    pub bookid: i64,
    pub bookname: String,
    pub publisher: Option<String>,
    /// List price in won, as seeded. Not used by the order workflow.
    pub price: Option<i64>,
}

/// One entry of the book selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BookChoice {
    pub bookid: i64,
    pub bookname: String,
}

impl BookChoice {
    /// The `"id,name"` token shown to the operator.
    ///
    /// [`parse_book_selection`] reads the id back out of it.
    pub fn token(&self) -> String {
        format!("{},{}", self.bookid, self.bookname)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A stored order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub orderid: i64,
    pub custid: i64,
    pub bookid: i64,
    /// Sale price in whole won.
    pub saleprice: i64,
    pub orderdate: NaiveDate,
}

impl Order {
    /// Returns the sale price as a [`Price`].
    #[inline]
    pub fn price(&self) -> Price {
        Price::from_won(self.saleprice).unwrap_or_default()
    }
}

/// The order fields that do not depend on which customer places it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub bookid: i64,
    pub saleprice: Price,
    pub orderdate: NaiveDate,
}

/// A fully parsed transaction-entry submission.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Transaction Entry                                                      │
/// │                                                                         │
/// │  name ──► resolve ──┬── Existing ──────────────────┐                    │
/// │                     │                              │                    │
/// │                     └── New ──► address, phone ────┤                    │
/// │                                                    ▼                    │
/// │                          book token + price ──► OrderRequest::parse     │
/// │                                                    │                    │
/// │                                                    ▼                    │
/// │                              OrderRepository::place (one transaction)  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_name: String,
    pub bookid: i64,
    pub saleprice: Price,
    pub orderdate: NaiveDate,
    /// Used only when `customer_name` does not resolve to a customer.
    pub new_customer: Option<CustomerDetails>,
}

impl OrderRequest {
    /// Parses raw operator input.
    ///
    /// `orderdate` is passed in by the caller (the local date at submit
    /// time) so this stays free of clock access.
    pub fn parse(
        customer_name: &str,
        book_selection: Option<&str>,
        price: &str,
        orderdate: NaiveDate,
        new_customer: Option<CustomerDetails>,
    ) -> ValidationResult<Self> {
        Ok(OrderRequest {
            customer_name: normalize_lookup_name(customer_name)?,
            bookid: parse_book_selection(book_selection)?,
            saleprice: parse_price(price)?,
            orderdate,
            new_customer,
        })
    }

    /// Returns the customer-independent part of the order.
    pub fn line(&self) -> OrderLine {
        OrderLine {
            bookid: self.bookid,
            saleprice: self.saleprice,
            orderdate: self.orderdate,
        }
    }
}

/// Result of a successful transaction entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order: Order,
    pub customer: Customer,
    /// True when the customer row was created by this submission.
    pub created_customer: bool,
}

// =============================================================================
// Order History
// =============================================================================

/// One row of the customer lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct HistoryRow {
    pub custid: i64,
    pub name: String,
    pub bookname: String,
    pub orderdate: NaiveDate,
    pub saleprice: i64,
}

/// Result of an order-history lookup.
///
/// Keeps "no such customer" apart from "customer with no orders".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum History {
    UnknownCustomer,
    Orders(Vec<HistoryRow>),
}

impl History {
    /// Sum of all sale prices in the history (zero for unknown customers).
    pub fn total(&self) -> Price {
        match self {
            History::UnknownCustomer => Price::zero(),
            History::Orders(rows) => rows
                .iter()
                .filter_map(|r| Price::from_won(r.saleprice))
                .sum(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
