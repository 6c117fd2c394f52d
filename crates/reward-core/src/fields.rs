//! # Field Parsers
//!
//! Wire-format parsing for the individual fields of a receipt submission.
//!
//! ## Field Formats
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field              Format                       Parsed as              │
//! │  ─────────────────  ───────────────────────────  ──────────────────     │
//! │  retailer           word chars, spaces, - and &  trimmed String         │
//! │  shortDescription   word chars, spaces, -        trimmed String         │
//! │  purchaseDate       YYYY-MM-DD (real date)       NaiveDate              │
//! │  purchaseTime       HH:MM, 24-hour               NaiveTime              │
//! │  price / total      digits "." two digits        Money (cents)          │
//! │                                                                         │
//! │  Every value is trimmed before matching. Inner whitespace is kept.     │
//! │  "Word chars" means ASCII letters, digits and underscore.               │
//! │  "Spaces" means tab, newline, form feed, carriage return and space.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each field has a plain string parser (`parse_*`) and a newtype that
//! deserializes from any JSON value. A non-string JSON value fails with the
//! field's own error, exactly like a malformed string.
//!
//! ## Usage
//! ```rust
//! use reward_core::fields::{parse_amount, parse_retailer};
//! use reward_core::Money;
//!
//! assert_eq!(parse_retailer("  M&M Corner Market ").unwrap(), "M&M Corner Market");
//! assert_eq!(parse_amount("35.35").unwrap(), Money::from_cents(3535));
//! assert!(parse_amount("35.3").is_err());
//! ```

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{FieldError, FieldResult};
use crate::money::Money;

// =============================================================================
// Regex Patterns (compiled once)
// =============================================================================

// Whitespace is tab, newline, form feed, carriage return or space. No vertical tab.

static RETAILER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?-u:[\w\t\n\f\r \-&])+$").expect("Invalid retailer regex"));

static DESCRIPTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?-u:[\w\t\n\f\r \-])+$").expect("Invalid description regex"));

/// YYYY-MM-DD
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$")
        .expect("Invalid date regex")
});

/// HH:MM in 24-hour format
static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[01][0-9]|2[0-3]):[0-5][0-9]$").expect("Invalid time regex")
});

/// Used for both total and price
static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\.([0-9]{2})$").expect("Invalid amount regex"));

// =============================================================================
// String Parsers
// =============================================================================

/// Parses a retailer name.
///
/// ## Example
/// ```rust
/// use reward_core::fields::parse_retailer;
///
/// assert_eq!(parse_retailer("Walgreens").unwrap(), "Walgreens");
/// assert!(parse_retailer("Shop#42").is_err());
/// assert!(parse_retailer("   ").is_err());
/// ```
pub fn parse_retailer(raw: &str) -> FieldResult<String> {
    let trimmed = raw.trim();

    if !RETAILER_PATTERN.is_match(trimmed) {
        return Err(FieldError::InvalidRetailerFormat);
    }

    Ok(trimmed.to_string())
}

/// Parses an item's short description.
///
/// Unlike the retailer, `&` is not allowed here.
pub fn parse_short_description(raw: &str) -> FieldResult<String> {
    let trimmed = raw.trim();

    if !DESCRIPTION_PATTERN.is_match(trimmed) {
        return Err(FieldError::InvalidDescriptionFormat);
    }

    Ok(trimmed.to_string())
}

/// Parses a purchase date.
///
/// The pattern only bounds month and day ranges, so `2023-02-30` passes the
/// pattern and is then rejected by the calendar check.
pub fn parse_purchase_date(raw: &str) -> FieldResult<NaiveDate> {
    let trimmed = raw.trim();

    if !DATE_PATTERN.is_match(trimmed) {
        return Err(FieldError::InvalidDateFormat);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| FieldError::InvalidDateFormat)
}

/// Parses a purchase time of day.
pub fn parse_purchase_time(raw: &str) -> FieldResult<NaiveTime> {
    let trimmed = raw.trim();

    if !TIME_PATTERN.is_match(trimmed) {
        return Err(FieldError::InvalidTimeFormat);
    }

    NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| FieldError::InvalidTimeFormat)
}

/// Parses a monetary amount with exactly two fractional digits.
///
/// ## Rules
/// - One or more digits, a dot, exactly two digits
/// - No sign, so a parsed amount is never negative
/// - Amounts that overflow `i64` cents are rejected
pub fn parse_amount(raw: &str) -> FieldResult<Money> {
    let trimmed = raw.trim();

    let captures = AMOUNT_PATTERN
        .captures(trimmed)
        .ok_or(FieldError::InvalidAmountFormat)?;

    let major: i64 = captures[1]
        .parse()
        .map_err(|_| FieldError::InvalidAmountFormat)?;
    let minor: i64 = captures[2]
        .parse()
        .map_err(|_| FieldError::InvalidAmountFormat)?;

    Money::from_major_minor(major, minor).ok_or(FieldError::InvalidAmountFormat)
}

/// Runs `parse` on a JSON string, failing with `error` for any other JSON type.
fn parse_json_str<T>(
    value: &Value,
    error: FieldError,
    parse: impl FnOnce(&str) -> FieldResult<T>,
) -> FieldResult<T> {
    match value {
        Value::String(raw) => parse(raw),
        _ => Err(error),
    }
}

// =============================================================================
// Deserializable Field Types
// =============================================================================

/// A validated retailer name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Retailer(String);

impl Retailer {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for Retailer {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_retailer(s).map(Retailer)
    }
}

impl TryFrom<Value> for Retailer {
    type Error = FieldError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        parse_json_str(&value, FieldError::InvalidRetailerFormat, parse_retailer).map(Retailer)
    }
}

/// A validated item description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct ShortDescription(String);

impl ShortDescription {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for ShortDescription {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_short_description(s).map(ShortDescription)
    }
}

impl TryFrom<Value> for ShortDescription {
    type Error = FieldError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        parse_json_str(
            &value,
            FieldError::InvalidDescriptionFormat,
            parse_short_description,
        )
        .map(ShortDescription)
    }
}

/// A validated purchase date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct PurchaseDate(NaiveDate);

impl PurchaseDate {
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for PurchaseDate {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_purchase_date(s).map(PurchaseDate)
    }
}

impl TryFrom<Value> for PurchaseDate {
    type Error = FieldError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        parse_json_str(&value, FieldError::InvalidDateFormat, parse_purchase_date)
            .map(PurchaseDate)
    }
}

/// A validated purchase time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct PurchaseTime(NaiveTime);

impl PurchaseTime {
    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for PurchaseTime {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_purchase_time(s).map(PurchaseTime)
    }
}

impl TryFrom<Value> for PurchaseTime {
    type Error = FieldError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        parse_json_str(&value, FieldError::InvalidTimeFormat, parse_purchase_time)
            .map(PurchaseTime)
    }
}

/// A validated price or total.
///
/// Wrapped in `Option` on the submission so a missing key can be told apart
/// from an explicit `"0.00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Amount(Money);

impl Amount {
    pub fn money(&self) -> Money {
        self.0
    }
}

impl FromStr for Amount {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_amount(s).map(Amount)
    }
}

impl TryFrom<Value> for Amount {
    type Error = FieldError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        parse_json_str(&value, FieldError::InvalidAmountFormat, parse_amount).map(Amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
