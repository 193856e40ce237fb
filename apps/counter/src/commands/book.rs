//! # Book Commands
//!
//! Catalog listing and the selection list of the transaction-entry view.

use tracing::debug;

use madang_core::{Book, BookChoice};

use crate::error::ApiResult;
use crate::state::{CatalogState, DbState};

/// Full catalog with publisher and list price, for the `books` command.
pub async fn list_books(db: &DbState) -> ApiResult<Vec<Book>> {
    debug!("list_books command");

    Ok(db.inner().books().list().await?)
}

/// The cached selection list (ordered by bookid).
pub async fn book_choices(db: &DbState, catalog: &CatalogState) -> ApiResult<Vec<BookChoice>> {
    catalog.choices(db.inner()).await
}

/// Selection tokens as offered to the operator.
///
/// The first entry is empty so "nothing selected" is a valid state that
/// submit then rejects.
pub fn selection_tokens(choices: &[BookChoice]) -> Vec<String> {
    std::iter::once(String::new())
        .chain(choices.iter().map(BookChoice::token))
        .collect()
}
