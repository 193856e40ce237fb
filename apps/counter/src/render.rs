//! # Rendering
//!
//! Terminal tables for history and catalog, built with `tabled`.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use madang_core::{Book, Customer, History, HistoryRow, PlacedOrder};

use crate::state::CounterConfig;

#[derive(Tabled)]
struct HistoryDisplay {
    #[tabled(rename = "Customer")]
    name: String,
    #[tabled(rename = "Book")]
    bookname: String,
    #[tabled(rename = "Date")]
    orderdate: String,
    #[tabled(rename = "Price")]
    saleprice: String,
}

impl HistoryDisplay {
    fn new(row: &HistoryRow, config: &CounterConfig) -> Self {
        HistoryDisplay {
            name: row.name.clone(),
            bookname: row.bookname.clone(),
            orderdate: row.orderdate.format("%Y-%m-%d").to_string(),
            saleprice: config.format_price(row.saleprice),
        }
    }
}

#[derive(Tabled)]
struct BookDisplay {
    #[tabled(rename = "ID")]
    bookid: i64,
    #[tabled(rename = "Title")]
    bookname: String,
    #[tabled(rename = "Publisher")]
    publisher: String,
    #[tabled(rename = "List Price")]
    price: String,
}

#[derive(Tabled)]
struct ChoiceDisplay {
    #[tabled(rename = "Select")]
    token: String,
}

fn styled(mut table: Table) -> String {
    table.with(Style::rounded());
    table.to_string()
}

/// Order history of a name, or the matching warning line.
pub fn history(name: &str, history: &History, config: &CounterConfig) -> String {
    match history {
        History::UnknownCustomer => format!("No customer named '{}'.", name.trim()),
        History::Orders(rows) if rows.is_empty() => {
            format!("'{}' has no orders yet.", name.trim())
        }
        History::Orders(rows) => {
            let display: Vec<HistoryDisplay> =
                rows.iter().map(|r| HistoryDisplay::new(r, config)).collect();
            format!(
                "{}\nTotal: {}",
                styled(Table::new(display)),
                config.format_price(history.total().won())
            )
        }
    }
}

/// Full catalog table.
pub fn books(books: &[Book], config: &CounterConfig) -> String {
    if books.is_empty() {
        return "No books in the catalog.".to_string();
    }

    let display: Vec<BookDisplay> = books
        .iter()
        .map(|b| BookDisplay {
            bookid: b.bookid,
            bookname: b.bookname.clone(),
            publisher: b.publisher.clone().unwrap_or_else(|| "-".to_string()),
            price: b
                .price
                .map(|p| config.format_price(p))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    styled(Table::new(display))
}

/// Selection list shown before the book prompt. An empty token is the
/// "no selection" row.
pub fn choices(tokens: &[String]) -> String {
    let display: Vec<ChoiceDisplay> = tokens
        .iter()
        .map(|token| ChoiceDisplay {
            token: if token.is_empty() {
                "(none)".to_string()
            } else {
                token.clone()
            },
        })
        .collect();
    styled(Table::new(display))
}

/// Confirmation line after a successful submit.
pub fn placed(placed: &PlacedOrder, bookname: Option<&str>, config: &CounterConfig) -> String {
    let mut line = format!(
        "Order #{} recorded: {} bought {} for {} on {}.",
        placed.order.orderid,
        placed.customer.name,
        bookname.unwrap_or("book"),
        config.format_price(placed.order.saleprice),
        placed.order.orderdate.format("%Y-%m-%d"),
    );
    if placed.created_customer {
        line.push_str(&format!(
            " New customer registered (custid {}).",
            placed.customer.custid
        ));
    }
    line
}

/// Confirmation line after registering a customer.
pub fn registered(customer: &Customer) -> String {
    format!("Registered {} (custid {}).", customer.name, customer.custid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(book: &str, price: i64) -> HistoryRow {
        HistoryRow {
            custid: 1,
            name: "박지성".to_string(),
            bookname: book.to_string(),
            orderdate: NaiveDate::from_ymd_opt(2014, 7, 1).unwrap(),
            saleprice: price,
        }
    }

    #[test]
    fn test_history_warnings() {
        let config = CounterConfig::default();
        assert_eq!(
            history(" 아무개", &History::UnknownCustomer, &config),
            "No customer named '아무개'."
        );
        assert_eq!(
            history("박세리", &History::Orders(vec![]), &config),
            "'박세리' has no orders yet."
        );
    }

    #[test]
    fn test_history_table() {
        let config = CounterConfig::default();
        let out = history(
            "박지성",
            &History::Orders(vec![row("축구의 역사", 6000), row("축구의 이해", 21000)]),
            &config,
        );

        assert!(out.contains("축구의 이해"));
        assert!(out.contains("2014-07-01"));
        assert!(out.contains("₩21,000"));
        assert!(out.ends_with("Total: ₩27,000"));
    }

    #[test]
    fn test_books_table_fills_missing_fields() {
        let config = CounterConfig::default();
        let out = books(
            &[Book {
                bookid: 1,
                bookname: "축구의 역사".to_string(),
                publisher: None,
                price: None,
            }],
            &config,
        );
        assert!(out.contains("축구의 역사"));
        assert!(out.contains('-'));
        assert_eq!(books(&[], &config), "No books in the catalog.");
    }

    #[test]
    fn test_choices_show_no_selection_row_first() {
        let out = choices(&["".to_string(), "1,축구의 역사".to_string()]);

        let none_at = out.find("(none)").unwrap();
        let first_book_at = out.find("1,축구의 역사").unwrap();
        assert!(none_at < first_book_at);
    }
}
