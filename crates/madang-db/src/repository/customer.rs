//! # Customer Repository
//!
//! Name resolution and customer creation.
//!
//! ## Id Assignment
//! ```text
//! INSERT INTO Customer (custid, name, address, phone)
//! SELECT COALESCE(MAX(custid), 0) + 1, ?1, ?2, ?3 FROM Customer
//! RETURNING ...
//! ```
//! Max and insert happen in one statement inside the write transaction, so
//! sequential creations get gap-free increasing ids starting at 1.

use madang_core::validation::normalize_lookup_name;
use madang_core::{Customer, CustomerResolution, NewCustomer};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Repository for customer database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
///
/// match repo.resolve("박지성").await? {
///     CustomerResolution::Existing(c) => println!("custid {}", c.custid),
///     CustomerResolution::New { name } => println!("{name} needs an address"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Resolves a name to an existing customer or a pending new one.
    ///
    /// ## Rules
    /// - The name is trimmed; a blank name is a validation error and no
    ///   query runs
    /// - Match is exact; with duplicate names the lowest custid wins
    pub async fn resolve(&self, name: &str) -> DbResult<CustomerResolution> {
        let name = normalize_lookup_name(name)?;

        let mut conn = self.pool.acquire().await?;
        resolve_on(&mut conn, &name).await
    }

    /// Finds the customer with exactly this name (lowest custid first).
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Customer>> {
        let name = normalize_lookup_name(name)?;

        let mut conn = self.pool.acquire().await?;
        find_by_name_on(&mut conn, &name).await
    }

    /// Gets a customer by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - No such custid
    pub async fn get_by_id(&self, custid: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT custid, name, address, phone FROM Customer WHERE custid = ?1",
        )
        .bind(custid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Creates a customer in its own transaction.
    ///
    /// ## Errors
    /// * `UniqueViolation` - a customer with this exact name exists
    pub async fn create(&self, customer: &NewCustomer) -> DbResult<Customer> {
        let mut tx = self.pool.begin().await?;
        let created = insert(&mut *tx, customer).await?;
        tx.commit().await?;

        Ok(created)
    }

    /// Counts all customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Customer")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Connection-level helpers (shared with the order workflow)
// =============================================================================

pub(crate) async fn find_by_name_on(
    conn: &mut SqliteConnection,
    name: &str,
) -> DbResult<Option<Customer>> {
    debug!(name = %name, "Looking up customer by name");

    let customer = sqlx::query_as::<_, Customer>(
        "SELECT custid, name, address, phone FROM Customer WHERE name = ?1 ORDER BY custid LIMIT 1",
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(customer)
}

pub(crate) async fn resolve_on(
    conn: &mut SqliteConnection,
    name: &str,
) -> DbResult<CustomerResolution> {
    Ok(match find_by_name_on(conn, name).await? {
        Some(customer) => CustomerResolution::Existing(customer),
        None => CustomerResolution::New {
            name: name.to_string(),
        },
    })
}

pub(crate) async fn exists_on(conn: &mut SqliteConnection, custid: i64) -> DbResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT custid FROM Customer WHERE custid = ?1")
        .bind(custid)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(found.is_some())
}

/// Inserts a customer with the next custid. Caller owns the transaction.
pub(crate) async fn insert(
    conn: &mut SqliteConnection,
    customer: &NewCustomer,
) -> DbResult<Customer> {
    if find_by_name_on(conn, &customer.name).await?.is_some() {
        return Err(DbError::duplicate("name", customer.name.clone()));
    }

    let created = sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO Customer (custid, name, address, phone)
        SELECT COALESCE(MAX(custid), 0) + 1, ?1, ?2, ?3 FROM Customer
        RETURNING custid, name, address, phone
        "#,
    )
    .bind(&customer.name)
    .bind(&customer.address)
    .bind(&customer.phone)
    .fetch_one(&mut *conn)
    .await?;

    info!(custid = created.custid, name = %created.name, "Customer created");
    Ok(created)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use madang_core::{CoreError, ValidationError};

    async fn empty_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn new_customer(name: &str) -> NewCustomer {
        NewCustomer::parse(name, "대한민국 서울", Some("000-1234-5678")).unwrap()
    }

    #[tokio::test]
    async fn test_first_customer_gets_id_one() {
        let db = empty_db().await;

        let created = db.customers().create(&new_customer("손흥민")).await.unwrap();
        assert_eq!(created.custid, 1);
        assert_eq!(created.address.as_deref(), Some("대한민국 서울"));
    }

    #[tokio::test]
    async fn test_sequential_ids_are_gap_free() {
        let db = empty_db().await;
        let repo = db.customers();

        let mut ids = Vec::new();
        for name in ["가", "나", "다", "라"] {
            ids.push(repo.create(&new_customer(name)).await.unwrap().custid);
        }
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_ids_continue_after_seeded_max() {
        let db = empty_db().await;
        sqlx::query("INSERT INTO Customer (custid, name) VALUES (41, '기존')")
            .execute(db.pool())
            .await
            .unwrap();

        let created = db.customers().create(&new_customer("신규")).await.unwrap();
        assert_eq!(created.custid, 42);
    }

    #[tokio::test]
    async fn test_resolve_existing_and_new() {
        let db = empty_db().await;
        let repo = db.customers();
        repo.create(&new_customer("김연아")).await.unwrap();

        match repo.resolve("  김연아 ").await.unwrap() {
            CustomerResolution::Existing(c) => assert_eq!(c.custid, 1),
            other => panic!("expected existing customer, got {other:?}"),
        }

        assert_eq!(
            repo.resolve("김연").await.unwrap(),
            CustomerResolution::New {
                name: "김연".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_blank_name_is_rejected() {
        let db = empty_db().await;

        let err = db.customers().resolve("   ").await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::Validation(ValidationError::Required { .. }))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = empty_db().await;
        let repo = db.customers();
        repo.create(&new_customer("추신수")).await.unwrap();

        let err = repo.create(&new_customer("추신수")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_rows_resolve_to_lowest_id() {
        let db = empty_db().await;
        sqlx::query("INSERT INTO Customer (custid, name) VALUES (7, '박세리'), (3, '박세리')")
            .execute(db.pool())
            .await
            .unwrap();

        let found = db.customers().find_by_name("박세리").await.unwrap().unwrap();
        assert_eq!(found.custid, 3);
    }

    #[tokio::test]
    async fn test_blank_phone_stored_as_null() {
        let db = empty_db().await;
        let customer = NewCustomer::parse("장미란", "대한민국 강원도", Some("  ")).unwrap();

        let created = db.customers().create(&customer).await.unwrap();
        let stored = db.customers().get_by_id(created.custid).await.unwrap().unwrap();
        assert_eq!(stored.phone, None);
    }

    #[tokio::test]
    async fn test_long_stored_name_still_resolves() {
        let db = empty_db().await;
        let long = "가".repeat(madang_core::MAX_NAME_CHARS + 5);
        sqlx::query("INSERT INTO Customer (custid, name) VALUES (1, ?1)")
            .bind(&long)
            .execute(db.pool())
            .await
            .unwrap();

        let resolution = db.customers().resolve(&long).await.unwrap();
        assert_eq!(resolution.custid(), Some(1));

        // Creating a new customer with such a name is still refused
        let err = NewCustomer::parse(&long, "서울", None).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { .. }));
    }
}
