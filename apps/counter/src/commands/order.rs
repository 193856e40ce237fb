//! # Order Commands
//!
//! Submission of the transaction-entry form.
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Transaction Entry Submit                             │
//! │                                                                         │
//! │  OrderForm (raw strings as typed)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CustomerDetails::parse  (only if an address was entered)              │
//! │  OrderRequest::parse     (name, book token, price digits)              │
//! │       │        └── invalid? ──► ValidationError, nothing written        │
//! │       ▼                                                                 │
//! │  OrderRepository::place  (customer + order, one transaction)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogState::invalidate                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use madang_core::{CustomerDetails, OrderRequest, PlacedOrder};

use crate::error::ApiResult;
use crate::state::{CatalogState, DbState};

/// Raw transaction-entry input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderForm {
    pub name: String,

    /// `"id,name"` token or a bare id. `None` means nothing was selected.
    pub book: Option<String>,

    /// Price as typed; digits only.
    pub price: String,

    /// Only read when the name is not a known customer.
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl OrderForm {
    /// Validates the form into an order request dated `orderdate`.
    pub fn to_request(&self, orderdate: NaiveDate) -> ApiResult<OrderRequest> {
        let new_customer = self
            .address
            .as_deref()
            .map(|address| CustomerDetails::parse(address, self.phone.as_deref()))
            .transpose()?;

        Ok(OrderRequest::parse(
            &self.name,
            self.book.as_deref(),
            &self.price,
            orderdate,
            new_customer,
        )?)
    }
}

/// The local calendar date used for new orders.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Places an order, creating the customer first when the name is new.
pub async fn place_order(
    db: &DbState,
    catalog: &CatalogState,
    form: &OrderForm,
    orderdate: NaiveDate,
) -> ApiResult<PlacedOrder> {
    debug!(name = %form.name, book = ?form.book, "place_order command");

    let request = form.to_request(orderdate)?;
    let placed = db.inner().orders().place(&request).await?;
    catalog.invalidate().await;

    info!(
        orderid = placed.order.orderid,
        custid = placed.customer.custid,
        created_customer = placed.created_customer,
        "place_order complete"
    );
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::customer::lookup_history;
    use crate::error::ErrorCode;
    use crate::test_support::seeded_state;
    use madang_core::History;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    fn form(name: &str, book: Option<&str>, price: &str) -> OrderForm {
        OrderForm {
            name: name.to_string(),
            book: book.map(str::to_string),
            price: price.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_existing_customer_order() {
        let (db, catalog) = seeded_state().await;

        let placed = place_order(&db, &catalog, &form("박세리", Some("9,올림픽 이야기"), "7500"), date())
            .await
            .unwrap();
        assert_eq!(placed.order.orderid, 11);
        assert_eq!(placed.customer.custid, 5);

        let History::Orders(rows) = lookup_history(&db, "박세리").await.unwrap() else {
            panic!("expected orders");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bookname, "올림픽 이야기");
        assert_eq!(rows[0].orderdate, date());
        assert_eq!(rows[0].saleprice, 7500);
    }

    #[tokio::test]
    async fn test_new_customer_needs_address() {
        let (db, catalog) = seeded_state().await;

        let err = place_order(&db, &catalog, &form("손흥민", Some("1"), "7000"), date())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CustomerDetailsRequired);
    }

    #[tokio::test]
    async fn test_new_customer_with_blank_address() {
        let (db, catalog) = seeded_state().await;
        let mut f = form("손흥민", Some("1"), "7000");
        f.address = Some("   ".to_string());

        let err = place_order(&db, &catalog, &f, date()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_new_customer_order() {
        let (db, catalog) = seeded_state().await;
        let mut f = form("손흥민", Some("2,축구아는 여자"), "13000");
        f.address = Some("영국 런던".to_string());
        f.phone = Some(String::new());

        let placed = place_order(&db, &catalog, &f, date()).await.unwrap();
        assert!(placed.created_customer);
        assert_eq!(placed.customer.phone, None);
    }

    #[tokio::test]
    async fn test_missing_book_selection() {
        let (db, catalog) = seeded_state().await;

        let err = place_order(&db, &catalog, &form("김연아", None, "7000"), date())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "book is required");
    }

    #[tokio::test]
    async fn test_unknown_book() {
        let (db, catalog) = seeded_state().await;

        let err = place_order(&db, &catalog, &form("김연아", Some("55"), "7000"), date())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_write_invalidates_catalog() {
        let (db, catalog) = seeded_state().await;
        catalog.choices(db.inner()).await.unwrap();
        assert!(catalog.is_loaded().await);

        place_order(&db, &catalog, &form("김연아", Some("3"), "20000"), date())
            .await
            .unwrap();
        assert!(!catalog.is_loaded().await);
    }
}
