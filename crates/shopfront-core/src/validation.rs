//! # Validation Module
//!
//! Field validation for product submissions and checkout details.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input boundary                                               │
//! │  └── Raw text is accepted as-is (ProductInput holds Option<String>)    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Every rule runs, every failure is reported                        │
//! │  └── Output: Vec<ErrorKey> (empty = valid), never an Err               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Presentation                                                 │
//! │  └── Localizer maps each ErrorKey to text for the current locale       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::{validate_product, ErrorKey};
//! use shopfront_core::ProductInput;
//!
//! let keys = validate_product(&ProductInput {
//!     name: Some("Pen".into()),
//!     ..ProductInput::default()
//! });
//! assert_eq!(keys.first(), Some(&ErrorKey::NameTooShort));
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use ts_rs::TS;

use rust_decimal::Decimal;

use crate::money::{parse_decimal, parse_price, parse_quantity};
use crate::types::{non_blank, OrderInput, ProductInput};
use crate::{DESCRIPTION_MAX, DETAILS_MAX, NAME_MAX, NAME_MIN_EXCLUSIVE, TEXT_MIN};

/// Any code point in the Unicode "Other" general category (Cc, Cf, Cs, Co, Cn).
static ILLEGAL_CHARACTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{C}").expect("Invalid regex"));

// =============================================================================
// Error Keys
// =============================================================================

/// Locale-independent tag for one validation failure.
///
/// The set is closed; presentation layers map keys to text through a
/// [`Localizer`](crate::localization::Localizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ErrorKey {
    MissingName,
    NameIllegalCharacter,
    NameTooShort,
    NameTooLong,

    MissingPrice,
    PriceNotANumber,
    PriceNotGreaterThanZero,

    MissingStock,
    StockNotAnInteger,
    StockNotGreaterThanZero,

    MissingDetails,
    DetailsIllegalCharacter,
    DetailsTooShort,
    DetailsTooLong,

    MissingDescription,
    DescriptionIllegalCharacter,
    DescriptionTooShort,
    DescriptionTooLong,

    // Checkout
    MissingOrderName,
    MissingAddress,
    MissingCity,
    MissingZip,
    MissingCountry,
}

impl ErrorKey {
    /// Stable identifier, suitable as a resource key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKey::MissingName => "MissingName",
            ErrorKey::NameIllegalCharacter => "NameIllegalCharacter",
            ErrorKey::NameTooShort => "NameTooShort",
            ErrorKey::NameTooLong => "NameTooLong",
            ErrorKey::MissingPrice => "MissingPrice",
            ErrorKey::PriceNotANumber => "PriceNotANumber",
            ErrorKey::PriceNotGreaterThanZero => "PriceNotGreaterThanZero",
            ErrorKey::MissingStock => "MissingStock",
            ErrorKey::StockNotAnInteger => "StockNotAnInteger",
            ErrorKey::StockNotGreaterThanZero => "StockNotGreaterThanZero",
            ErrorKey::MissingDetails => "MissingDetails",
            ErrorKey::DetailsIllegalCharacter => "DetailsIllegalCharacter",
            ErrorKey::DetailsTooShort => "DetailsTooShort",
            ErrorKey::DetailsTooLong => "DetailsTooLong",
            ErrorKey::MissingDescription => "MissingDescription",
            ErrorKey::DescriptionIllegalCharacter => "DescriptionIllegalCharacter",
            ErrorKey::DescriptionTooShort => "DescriptionTooShort",
            ErrorKey::DescriptionTooLong => "DescriptionTooLong",
            ErrorKey::MissingOrderName => "MissingOrderName",
            ErrorKey::MissingAddress => "MissingAddress",
            ErrorKey::MissingCity => "MissingCity",
            ErrorKey::MissingZip => "MissingZip",
            ErrorKey::MissingCountry => "MissingCountry",
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Text Rules
// =============================================================================

/// Keys reported by one free-text field.
struct TextRule {
    missing: ErrorKey,
    illegal: ErrorKey,
    too_short: ErrorKey,
    too_long: ErrorKey,
    /// Shortest accepted length.
    min: usize,
    /// Longest accepted length.
    max: usize,
}

const NAME_RULE: TextRule = TextRule {
    missing: ErrorKey::MissingName,
    illegal: ErrorKey::NameIllegalCharacter,
    too_short: ErrorKey::NameTooShort,
    too_long: ErrorKey::NameTooLong,
    min: NAME_MIN_EXCLUSIVE + 1,
    max: NAME_MAX,
};

const DETAILS_RULE: TextRule = TextRule {
    missing: ErrorKey::MissingDetails,
    illegal: ErrorKey::DetailsIllegalCharacter,
    too_short: ErrorKey::DetailsTooShort,
    too_long: ErrorKey::DetailsTooLong,
    min: TEXT_MIN,
    max: DETAILS_MAX,
};

const DESCRIPTION_RULE: TextRule = TextRule {
    missing: ErrorKey::MissingDescription,
    illegal: ErrorKey::DescriptionIllegalCharacter,
    too_short: ErrorKey::DescriptionTooShort,
    too_long: ErrorKey::DescriptionTooLong,
    min: TEXT_MIN,
    max: DESCRIPTION_MAX,
};

/// Checks one text field.
///
/// A blank value reports only the missing key. Otherwise the character scan
/// and both length bounds are checked independently. The scan runs on the
/// raw text; lengths count Unicode scalar values of the trimmed text.
fn check_text(value: &Option<String>, rule: &TextRule, errors: &mut Vec<ErrorKey>) {
    let Some(text) = non_blank(value) else {
        errors.push(rule.missing);
        return;
    };

    if ILLEGAL_CHARACTER.is_match(text) {
        errors.push(rule.illegal);
    }

    let len = text.trim().chars().count();
    if len < rule.min {
        errors.push(rule.too_short);
    }
    if len > rule.max {
        errors.push(rule.too_long);
    }
}

/// Checks a raw price.
///
/// The missing check and the parse are independent: absent text reports
/// both `MissingPrice` and `PriceNotANumber`. The sign is checked on the
/// exact decimal, so `"0.001"` is positive. A positive amount too large to
/// hold in cents is `PriceNotANumber`.
fn check_price(value: &Option<String>, errors: &mut Vec<ErrorKey>) {
    if non_blank(value).is_none() {
        errors.push(ErrorKey::MissingPrice);
    }

    let text = value.as_deref().unwrap_or_default();
    match parse_decimal(text) {
        Ok(price) if price <= Decimal::ZERO => errors.push(ErrorKey::PriceNotGreaterThanZero),
        Ok(_) if parse_price(text).is_err() => errors.push(ErrorKey::PriceNotANumber),
        Ok(_) => {}
        Err(_) => errors.push(ErrorKey::PriceNotANumber),
    }
}

/// Checks a raw stock count, same structure as [`check_price`].
fn check_stock(value: &Option<String>, errors: &mut Vec<ErrorKey>) {
    if non_blank(value).is_none() {
        errors.push(ErrorKey::MissingStock);
    }

    match parse_quantity(value.as_deref().unwrap_or_default()) {
        Ok(stock) if stock <= 0 => errors.push(ErrorKey::StockNotGreaterThanZero),
        Ok(_) => {}
        Err(_) => errors.push(ErrorKey::StockNotAnInteger),
    }
}

// =============================================================================
// Validators
// =============================================================================

/// Validates a product submission.
///
/// ## Rules
/// - Name: required, no control/format characters, 4 to 100 characters
/// - Price: required, decimal, greater than zero
/// - Stock: required, integer, greater than zero
/// - Details: required, no control/format characters, 10 to 200 characters
/// - Description: required, no control/format characters, 10 to 100 characters
///
/// ## Returns
/// Every failing rule's key, in field order (name, price, stock, details,
/// description). Empty means valid.
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_product;
/// use shopfront_core::ProductInput;
///
/// // A blank submission reports seven keys
/// assert_eq!(validate_product(&ProductInput::default()).len(), 7);
/// ```
pub fn validate_product(input: &ProductInput) -> Vec<ErrorKey> {
    let mut errors = Vec::new();

    check_text(&input.name, &NAME_RULE, &mut errors);
    check_price(&input.price, &mut errors);
    check_stock(&input.stock, &mut errors);
    check_text(&input.details, &DETAILS_RULE, &mut errors);
    check_text(&input.description, &DESCRIPTION_RULE, &mut errors);

    errors
}

/// Validates checkout shipping details: every field is required.
pub fn validate_order(input: &OrderInput) -> Vec<ErrorKey> {
    [
        (&input.name, ErrorKey::MissingOrderName),
        (&input.address, ErrorKey::MissingAddress),
        (&input.city, ErrorKey::MissingCity),
        (&input.zip, ErrorKey::MissingZip),
        (&input.country, ErrorKey::MissingCountry),
    ]
    .into_iter()
    .filter(|(value, _)| non_blank(value).is_none())
    .map(|(_, key)| key)
    .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
