//! # Customer Commands
//!
//! The customer lookup view and the first step of transaction entry.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Customer Lookup                                      │
//! │                                                                         │
//! │  Operator enters "박지성"                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lookup_history(db, "박지성")                                           │
//! │       │                                                                 │
//! │       ├── UnknownCustomer ──► "no customer named ..." warning           │
//! │       ├── Orders([])      ──► "no orders yet" warning                   │
//! │       └── Orders(rows)    ──► table: name, book, date, price            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use madang_core::{Customer, CustomerResolution, History, NewCustomer};

use crate::error::ApiResult;
use crate::state::{CatalogState, DbState};

/// Loads the order history for a customer name.
pub async fn lookup_history(db: &DbState, name: &str) -> ApiResult<History> {
    debug!(name = %name, "lookup_history command");

    let history = db.inner().orders().history_for(name).await?;

    if let History::Orders(rows) = &history {
        debug!(count = rows.len(), "lookup_history complete");
    }
    Ok(history)
}

/// Decides whether the transaction-entry view continues with an existing
/// customer or asks for new-customer details.
pub async fn resolve_customer(db: &DbState, name: &str) -> ApiResult<CustomerResolution> {
    debug!(name = %name, "resolve_customer command");

    Ok(db.inner().customers().resolve(name).await?)
}

/// Registers a customer without placing an order.
///
/// ## Arguments
/// * `address` - required
/// * `phone` - optional; blank is stored as NULL
pub async fn register_customer(
    db: &DbState,
    catalog: &CatalogState,
    name: &str,
    address: &str,
    phone: Option<&str>,
) -> ApiResult<Customer> {
    let new_customer = NewCustomer::parse(name, address, phone)?;

    let customer = db.inner().customers().create(&new_customer).await?;
    catalog.invalidate().await;

    info!(custid = customer.custid, "register_customer complete");
    Ok(customer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::seeded_state;

    #[tokio::test]
    async fn test_lookup_known_customer() {
        let (db, _catalog) = seeded_state().await;

        let History::Orders(rows) = lookup_history(&db, "추신수").await.unwrap() else {
            panic!("expected orders");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bookname, "야구의 추억");
    }

    #[tokio::test]
    async fn test_lookup_blank_name() {
        let (db, _catalog) = seeded_state().await;

        let err = lookup_history(&db, "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_register_then_resolve() {
        let (db, catalog) = seeded_state().await;

        let created = register_customer(&db, &catalog, "손흥민", "영국 런던", None)
            .await
            .unwrap();
        assert_eq!(created.custid, 6);

        let resolution = resolve_customer(&db, "손흥민").await.unwrap();
        assert_eq!(resolution.custid(), Some(6));
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let (db, catalog) = seeded_state().await;

        let err = register_customer(&db, &catalog, "박지성", "서울", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Duplicate);
    }
}
