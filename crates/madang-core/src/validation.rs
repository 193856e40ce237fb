//! # Validation Module
//!
//! Parses and validates what the operator types at the counter.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal (apps/counter)                                      │
//! │  └── Collects raw strings from prompts / CLI flags                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Names and addresses: trimmed, non-empty, bounded                  │
//! │  ├── Book selection token "id,name" → bookid                           │
//! │  └── Price: ASCII digits only → Price                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints (Orders → Customer, Book)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here runs before a query is issued. A failure never
//! leaves state behind.

use crate::error::ValidationError;
use crate::price::Price;
use crate::{MAX_ADDRESS_CHARS, MAX_NAME_CHARS, MAX_PHONE_CHARS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates the name of a customer about to be created and returns it
/// trimmed.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - At most [`MAX_NAME_CHARS`] characters
///
/// ## Example
/// ```rust
/// use madang_core::validation::validate_customer_name;
///
/// assert_eq!(validate_customer_name("  김연아 ").unwrap(), "김연아");
/// assert!(validate_customer_name("   ").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    required_text("name", name, MAX_NAME_CHARS)
}

/// Trims a name used to find existing customers.
///
/// Blank names are rejected. No length cap: stored names (seeded ones
/// included) may be longer than [`MAX_NAME_CHARS`] and must stay reachable.
pub fn normalize_lookup_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }
    Ok(name.to_string())
}

/// Validates a customer address and returns it trimmed.
///
/// Address is mandatory when creating a customer.
pub fn validate_address(address: &str) -> ValidationResult<String> {
    required_text("address", address, MAX_ADDRESS_CHARS)
}

/// Normalizes an optional phone number.
///
/// Free-form: no pattern is enforced. Blank input becomes `None`.
pub fn normalize_phone(phone: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    if phone.chars().count() > MAX_PHONE_CHARS {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: MAX_PHONE_CHARS,
        });
    }

    Ok(Some(phone.to_string()))
}

fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Price
// =============================================================================

/// Parses a sale price typed by the operator.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Empty → `Required`
/// - Anything but ASCII digits `0-9` → `InvalidFormat`
/// - More than fits in an `i64` → `OutOfRange`
///
/// ## Example
/// ```rust
/// use madang_core::validation::parse_price;
///
/// assert_eq!(parse_price("13000").unwrap().won(), 13000);
/// assert!(parse_price("-13000").is_err());
/// assert!(parse_price("130.00").is_err());
/// assert!(parse_price("").is_err());
/// ```
pub fn parse_price(input: &str) -> ValidationResult<Price> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::required("price"));
    }

    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "price",
            "must contain digits only",
        ));
    }

    let won: i64 = input.parse().map_err(|_| ValidationError::OutOfRange {
        field: "price".to_string(),
        min: 0,
        max: i64::MAX,
    })?;

    // Digits only, so never negative.
    Price::from_won(won).ok_or_else(|| ValidationError::invalid_format("price", "must not be negative"))
}

// =============================================================================
// Book Selection
// =============================================================================

/// Extracts the book id from a selection token.
///
/// ## Token Format
/// The book list shows tokens like `"3,축구의 이해"`. The id is the first
/// comma-delimited field. A bare id (`"3"`) is accepted too, so one-shot
/// CLI callers can pass just the number.
///
/// ## Rules
/// - `None` or blank → `Required` (nothing selected)
/// - First field not an integer → `InvalidFormat`
///
/// ## Example
/// ```rust
/// use madang_core::validation::parse_book_selection;
///
/// assert_eq!(parse_book_selection(Some("10,Olympic Champions")).unwrap(), 10);
/// assert_eq!(parse_book_selection(Some("7")).unwrap(), 7);
/// assert!(parse_book_selection(None).is_err());
/// ```
pub fn parse_book_selection(selection: Option<&str>) -> ValidationResult<i64> {
    let Some(selection) = selection.map(str::trim).filter(|s| !s.is_empty()) else {
        return Err(ValidationError::required("book"));
    };

    let id_field = selection.split(',').next().unwrap_or_default().trim();

    id_field.parse::<i64>().map_err(|_| {
        ValidationError::invalid_format("book", format!("'{}' does not start with a book id", selection))
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_customer_name() {
        assert_eq!(validate_customer_name("박지성").unwrap(), "박지성");
        assert_eq!(validate_customer_name("  추신수\t").unwrap(), "추신수");

        assert_eq!(
            validate_customer_name(""),
            Err(ValidationError::required("name"))
        );
        assert!(validate_customer_name(" \n ").is_err());
        assert!(validate_customer_name(&"가".repeat(MAX_NAME_CHARS + 1)).is_err());
        // Length is counted in characters, not bytes
        assert!(validate_customer_name(&"가".repeat(MAX_NAME_CHARS)).is_ok());
    }

    #[test]
    fn test_lookup_name_has_no_length_cap() {
        let long = "가".repeat(MAX_NAME_CHARS + 10);
        assert_eq!(normalize_lookup_name(&format!(" {} ", long)).unwrap(), long);
        assert_eq!(normalize_lookup_name("  "), Err(ValidationError::required("name")));
    }

    #[test]
    fn test_validate_address() {
        assert_eq!(validate_address(" 대한민국 부산 ").unwrap(), "대한민국 부산");
        assert!(validate_address("").is_err());
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone(None).unwrap(), None);
        assert_eq!(normalize_phone(Some("   ")).unwrap(), None);
        assert_eq!(
            normalize_phone(Some(" 000-5000-0001 ")).unwrap(),
            Some("000-5000-0001".to_string())
        );
        // Not validated against the hint format
        assert_eq!(
            normalize_phone(Some("call after 6pm")).unwrap(),
            Some("call after 6pm".to_string())
        );
        assert!(normalize_phone(Some(&"1".repeat(MAX_PHONE_CHARS + 1))).is_err());
    }

    #[test]
    fn test_parse_price_accepts_digits() {
        assert_eq!(parse_price("0").unwrap().won(), 0);
        assert_eq!(parse_price("7000").unwrap().won(), 7000);
        assert_eq!(parse_price(" 21000 ").unwrap().won(), 21000);
        assert_eq!(parse_price("007").unwrap().won(), 7);
    }

    #[test]
    fn test_parse_price_rejects_non_digits() {
        for bad in ["-100", "+100", "10.5", "1,000", "12a", "abc", "１２"] {
            assert!(
                matches!(parse_price(bad), Err(ValidationError::InvalidFormat { .. })),
                "expected {:?} to be rejected",
                bad
            );
        }
        assert_eq!(parse_price("  "), Err(ValidationError::required("price")));
    }

    #[test]
    fn test_parse_price_overflow() {
        assert!(matches!(
            parse_price("99999999999999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_book_selection() {
        assert_eq!(parse_book_selection(Some("1,축구의 역사")).unwrap(), 1);
        assert_eq!(parse_book_selection(Some(" 10 ,Olympic Champions")).unwrap(), 10);
        assert_eq!(parse_book_selection(Some("4")).unwrap(), 4);

        assert_eq!(parse_book_selection(None), Err(ValidationError::required("book")));
        assert_eq!(parse_book_selection(Some("")), Err(ValidationError::required("book")));
        assert!(matches!(
            parse_book_selection(Some("골프 바이블")),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_book_selection(Some(",골프")).is_err());
    }
}
