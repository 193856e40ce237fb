//! # First-Run Bootstrap
//!
//! Loads the seed CSV files into a freshly created database.
//!
//! ## Seed Files
//! ```text
//! seed_dir/
//! ├── Customer_madang.csv   custid,name,address,phone
//! ├── Book_madang.csv       bookid,bookname,publisher,price
//! └── Orders_madang.csv     orderid,custid,bookid,saleprice,orderdate
//! ```
//!
//! All three files are parsed before anything is written, then inserted in
//! a single transaction (customers and books before orders, so the foreign
//! keys hold). Any failure is a [`DbError::BootstrapFailed`] naming the file.

use std::path::{Path, PathBuf};

use madang_core::{Book, Customer, Order};
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

pub const CUSTOMER_CSV: &str = "Customer_madang.csv";
pub const BOOK_CSV: &str = "Book_madang.csv";
pub const ORDERS_CSV: &str = "Orders_madang.csv";

const CUSTOMER_COLUMNS: &[&str] = &["custid", "name", "address", "phone"];
const BOOK_COLUMNS: &[&str] = &["bookid", "bookname", "publisher", "price"];
const ORDERS_COLUMNS: &[&str] = &["orderid", "custid", "bookid", "saleprice", "orderdate"];

/// Row counts loaded by [`load_seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub customers: usize,
    pub books: usize,
    pub orders: usize,
}

/// Parsed contents of the three seed files.
#[derive(Debug)]
struct SeedData {
    customers: Vec<Customer>,
    books: Vec<Book>,
    orders: Vec<Order>,
}

impl SeedData {
    fn read(seed_dir: &Path) -> DbResult<Self> {
        Ok(SeedData {
            customers: read_csv(&seed_dir.join(CUSTOMER_CSV), CUSTOMER_COLUMNS)?,
            books: read_csv(&seed_dir.join(BOOK_CSV), BOOK_COLUMNS)?,
            orders: read_csv(&seed_dir.join(ORDERS_CSV), ORDERS_COLUMNS)?,
        })
    }
}

/// Bulk-loads the seed CSVs from `seed_dir` into the (empty) tables.
pub async fn load_seed(pool: &SqlitePool, seed_dir: &Path) -> DbResult<SeedSummary> {
    info!(seed_dir = %seed_dir.display(), "Bootstrapping database from seed files");

    let seed = SeedData::read(seed_dir)?;

    let mut tx = pool.begin().await?;

    for c in &seed.customers {
        sqlx::query("INSERT INTO Customer (custid, name, address, phone) VALUES (?1, ?2, ?3, ?4)")
            .bind(c.custid)
            .bind(&c.name)
            .bind(&c.address)
            .bind(&c.phone)
            .execute(&mut *tx)
            .await
            .map_err(|e| seed_error(seed_dir, CUSTOMER_CSV, c.custid, e))?;
    }

    for b in &seed.books {
        sqlx::query("INSERT INTO Book (bookid, bookname, publisher, price) VALUES (?1, ?2, ?3, ?4)")
            .bind(b.bookid)
            .bind(&b.bookname)
            .bind(&b.publisher)
            .bind(b.price)
            .execute(&mut *tx)
            .await
            .map_err(|e| seed_error(seed_dir, BOOK_CSV, b.bookid, e))?;
    }

    for o in &seed.orders {
        sqlx::query(
            "INSERT INTO Orders (orderid, custid, bookid, saleprice, orderdate) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(o.orderid)
        .bind(o.custid)
        .bind(o.bookid)
        .bind(o.saleprice)
        .bind(o.orderdate)
        .execute(&mut *tx)
        .await
        .map_err(|e| seed_error(seed_dir, ORDERS_CSV, o.orderid, e))?;
    }

    tx.commit().await?;

    let summary = SeedSummary {
        customers: seed.customers.len(),
        books: seed.books.len(),
        orders: seed.orders.len(),
    };
    info!(
        customers = summary.customers,
        books = summary.books,
        orders = summary.orders,
        "Seed data loaded"
    );

    Ok(summary)
}

/// Reads one seed file, checking its header matches `columns` exactly.
fn read_csv<T: DeserializeOwned>(path: &Path, columns: &[&str]) -> DbResult<Vec<T>> {
    debug!(path = %path.display(), "Reading seed file");

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DbError::bootstrap(path, e))?;

    let headers = reader.headers().map_err(|e| DbError::bootstrap(path, e))?;
    if !headers.iter().eq(columns.iter().copied()) {
        return Err(DbError::bootstrap(
            path,
            format!(
                "expected columns [{}], found [{}]",
                columns.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        ));
    }

    reader
        .deserialize()
        .enumerate()
        .map(|(i, row)| row.map_err(|e| DbError::bootstrap(path, format!("row {}: {}", i + 1, e))))
        .collect()
}

fn seed_error(seed_dir: &Path, file: &str, id: i64, err: sqlx::Error) -> DbError {
    let path: PathBuf = seed_dir.join(file);
    DbError::bootstrap(path, format!("row with id {}: {}", id, DbError::from(err)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use std::fs;
    use tempfile::TempDir;

    fn write_seed(dir: &Path, customers: &str, books: &str, orders: &str) {
        fs::write(dir.join(CUSTOMER_CSV), customers).unwrap();
        fs::write(dir.join(BOOK_CSV), books).unwrap();
        fs::write(dir.join(ORDERS_CSV), orders).unwrap();
    }

    const CUSTOMERS: &str = "custid,name,address,phone\n1,박지성,영국 맨체스타,000-5000-0001\n5,박세리,대한민국 대전,\n";
    const BOOKS: &str = "bookid,bookname,publisher,price\n1,축구의 역사,굿스포츠,7000\n3,축구의 이해,대한미디어,22000\n";
    const ORDERS: &str = "orderid,custid,bookid,saleprice,orderdate\n1,1,1,6000,2014-07-01\n2,1,3,21000,2014-07-03\n";

    #[tokio::test]
    async fn test_load_seed_counts_and_nulls() {
        let dir = TempDir::new().unwrap();
        write_seed(dir.path(), CUSTOMERS, BOOKS, ORDERS);

        let db = Database::new(DbConfig::in_memory().seed_dir(dir.path()))
            .await
            .unwrap();

        assert_eq!(db.customers().count().await.unwrap(), 2);
        assert_eq!(db.books().count().await.unwrap(), 2);
        assert_eq!(db.orders().count().await.unwrap(), 2);

        let seri = db.customers().get_by_id(5).await.unwrap().unwrap();
        assert_eq!(seri.phone, None);
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CUSTOMER_CSV), CUSTOMERS).unwrap();

        let err = Database::new(DbConfig::in_memory().seed_dir(dir.path()))
            .await
            .unwrap_err();

        match err {
            DbError::BootstrapFailed { path, .. } => assert!(path.ends_with(BOOK_CSV)),
            other => panic!("expected BootstrapFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wrong_header_fails() {
        let dir = TempDir::new().unwrap();
        write_seed(
            dir.path(),
            "name,custid,address,phone\n박지성,1,영국,000\n",
            BOOKS,
            ORDERS,
        );

        let err = Database::new(DbConfig::in_memory().seed_dir(dir.path()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("expected columns [custid,name,address,phone]"));
    }

    #[tokio::test]
    async fn test_bad_type_fails_before_any_insert() {
        let dir = TempDir::new().unwrap();
        write_seed(
            dir.path(),
            CUSTOMERS,
            BOOKS,
            "orderid,custid,bookid,saleprice,orderdate\n1,1,1,six thousand,2014-07-01\n",
        );

        let err = Database::new(DbConfig::in_memory().seed_dir(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::BootstrapFailed { .. }));
    }

    #[tokio::test]
    async fn test_dangling_order_rolls_back_everything() {
        let dir = TempDir::new().unwrap();
        write_seed(
            dir.path(),
            CUSTOMERS,
            BOOKS,
            "orderid,custid,bookid,saleprice,orderdate\n1,99,1,6000,2014-07-01\n",
        );

        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = load_seed(db.pool(), dir.path()).await.unwrap_err();
        assert!(matches!(err, DbError::BootstrapFailed { .. }));

        assert_eq!(db.customers().count().await.unwrap(), 0);
        assert_eq!(db.books().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_shipped_seed_files() {
        let seed_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");

        let db = Database::new(DbConfig::in_memory().seed_dir(&seed_dir))
            .await
            .unwrap();

        assert_eq!(db.customers().count().await.unwrap(), 5);
        assert_eq!(db.books().count().await.unwrap(), 10);
        assert_eq!(db.orders().count().await.unwrap(), 10);
    }
}
