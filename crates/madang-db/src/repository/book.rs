//! # Book Repository
//!
//! Read-only catalog access. Books are only ever written by the bootstrap.

use madang_core::{Book, BookChoice};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

/// Repository for book database operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Loads the selection list, ordered by bookid.
    ///
    /// ## Usage
    /// Feeds the book picker of the transaction-entry view. The counter
    /// caches the result until the next write.
    pub async fn catalog(&self) -> DbResult<Vec<BookChoice>> {
        let choices = sqlx::query_as::<_, BookChoice>(
            "SELECT bookid, bookname FROM Book ORDER BY bookid",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = choices.len(), "Catalog loaded");
        Ok(choices)
    }

    /// Lists every book with publisher and list price, ordered by bookid.
    pub async fn list(&self) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT bookid, bookname, publisher, price FROM Book ORDER BY bookid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Gets a book by id.
    pub async fn get_by_id(&self, bookid: i64) -> DbResult<Option<Book>> {
        let mut conn = self.pool.acquire().await?;
        get_by_id_on(&mut conn, bookid).await
    }

    /// Counts all books.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Book")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

pub(crate) async fn get_by_id_on(
    conn: &mut SqliteConnection,
    bookid: i64,
) -> DbResult<Option<Book>> {
    let book = sqlx::query_as::<_, Book>(
        "SELECT bookid, bookname, publisher, price FROM Book WHERE bookid = ?1",
    )
    .bind(bookid)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(book)
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use std::path::Path;

    async fn seeded_db() -> Database {
        let seed_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
        Database::new(DbConfig::in_memory().seed_dir(seed_dir))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_catalog_is_ordered_by_id() {
        let db = seeded_db().await;

        let catalog = db.books().catalog().await.unwrap();
        assert_eq!(catalog.len(), 10);

        let ids: Vec<i64> = catalog.iter().map(|c| c.bookid).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(catalog[0].token(), "1,축구의 역사");
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = seeded_db().await;
        let books = db.books();

        let book = books.get_by_id(3).await.unwrap().unwrap();
        assert_eq!(book.bookname, "축구의 이해");
        assert_eq!(book.price, Some(22000));

        assert!(books.get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.books().catalog().await.unwrap().is_empty());
        assert!(db.books().list().await.unwrap().is_empty());
    }
}
