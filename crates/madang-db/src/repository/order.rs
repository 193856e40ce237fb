//! # Order Repository
//!
//! Order creation, the transaction-entry workflow and order history.
//!
//! ## Transaction-Entry Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    OrderRepository::place                               │
//! │                                                                         │
//! │  OrderRequest (already validated: name, bookid, price, date)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │       │                                                                 │
//! │       ├── name resolves ──► existing custid                            │
//! │       │                                                                 │
//! │       └── unknown name ──► details supplied? ──no──► NewCustomer...    │
//! │                                │                    DetailsRequired    │
//! │                               yes                                       │
//! │                                ▼                                        │
//! │                     INSERT Customer (MAX+1)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  book exists? ──no──► NotFound(Book)   (customer insert rolled back)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT Orders (MAX+1)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ──► PlacedOrder                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use madang_core::validation::normalize_lookup_name;
use madang_core::{
    CoreError, CustomerResolution, History, HistoryRow, NewCustomer, Order, OrderLine,
    OrderRequest, PlacedOrder,
};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::{book, customer};

/// Repository for order database operations.
///
/// ## Usage
/// ```rust,ignore
/// let request = OrderRequest::parse("박지성", Some("3,축구의 이해"), "21000", today, None)?;
/// let placed = db.orders().place(&request).await?;
///
/// let history = db.orders().history_for("박지성").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts one order for an existing customer.
    ///
    /// ## Errors
    /// * `NotFound { entity: "Customer" }` - custid does not exist
    /// * `NotFound { entity: "Book" }` - bookid does not exist
    pub async fn create(&self, custid: i64, line: &OrderLine) -> DbResult<Order> {
        let mut tx = self.pool.begin().await?;
        let order = insert(&mut *tx, custid, line).await?;
        tx.commit().await?;

        Ok(order)
    }

    /// Runs a transaction entry: resolve or create the customer, then
    /// insert the order, all in one transaction.
    ///
    /// Nothing is written unless both steps succeed.
    pub async fn place(&self, request: &OrderRequest) -> DbResult<PlacedOrder> {
        debug!(
            name = %request.customer_name,
            bookid = request.bookid,
            saleprice = request.saleprice.won(),
            "Placing order"
        );

        let mut tx = self.pool.begin().await?;

        let (customer, created_customer) =
            match customer::resolve_on(&mut *tx, &request.customer_name).await? {
                CustomerResolution::Existing(c) => (c, false),
                CustomerResolution::New { name } => {
                    let Some(details) = request.new_customer.clone() else {
                        warn!(name = %name, "New customer without address, order refused");
                        return Err(CoreError::NewCustomerDetailsRequired { name }.into());
                    };
                    let new_customer = NewCustomer::new(&name, details)?;
                    (customer::insert(&mut *tx, &new_customer).await?, true)
                }
            };

        let order = insert(&mut *tx, customer.custid, &request.line()).await?;

        tx.commit().await?;

        Ok(PlacedOrder {
            order,
            customer,
            created_customer,
        })
    }

    /// Loads the order history of every customer with exactly this name.
    ///
    /// ## Returns
    /// * `History::UnknownCustomer` - no customer has this name
    /// * `History::Orders(rows)` - rows ordered by orderdate then orderid,
    ///   empty when the customer has never ordered
    pub async fn history_for(&self, name: &str) -> DbResult<History> {
        let name = normalize_lookup_name(name)?;

        debug!(name = %name, "Loading order history");

        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT c.custid, c.name, b.bookname, o.orderdate, o.saleprice
            FROM Orders o
            INNER JOIN Customer c ON c.custid = o.custid
            INNER JOIN Book b ON b.bookid = o.bookid
            WHERE c.name = ?1
            ORDER BY o.orderdate, o.orderid
            "#,
        )
        .bind(&name)
        .fetch_all(&mut *conn)
        .await?;

        if rows.is_empty() && customer::find_by_name_on(&mut conn, &name).await?.is_none() {
            return Ok(History::UnknownCustomer);
        }

        Ok(History::Orders(rows))
    }

    /// Counts all orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Inserts an order with the next orderid. Caller owns the transaction.
async fn insert(conn: &mut SqliteConnection, custid: i64, line: &OrderLine) -> DbResult<Order> {
    if !customer::exists_on(conn, custid).await? {
        return Err(DbError::not_found("Customer", custid));
    }
    if book::get_by_id_on(conn, line.bookid).await?.is_none() {
        return Err(DbError::not_found("Book", line.bookid));
    }

    let order = sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO Orders (orderid, custid, bookid, saleprice, orderdate)
        SELECT COALESCE(MAX(orderid), 0) + 1, ?1, ?2, ?3, ?4 FROM Orders
        RETURNING orderid, custid, bookid, saleprice, orderdate
        "#,
    )
    .bind(custid)
    .bind(line.bookid)
    .bind(line.saleprice.won())
    .bind(line.orderdate)
    .fetch_one(&mut *conn)
    .await?;

    info!(
        orderid = order.orderid,
        custid = order.custid,
        bookid = order.bookid,
        saleprice = order.saleprice,
        "Order created"
    );
    Ok(order)
}

// =============================================================================
// Unit Tests
// =============================================================================
