//! Input validation shared by the stores and the CLI.
//!
//! Amounts follow `DECIMAL(10,2)` semantics: two fractional digits, at most
//! ten digits overall.

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Largest amount representable as DECIMAL(10,2).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Fractional digits kept for every stored amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Date format used on input and in storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years a stored date may fall in. Outside this range the `YYYY-MM-DD`
/// text no longer sorts in date order.
pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 9999;

/// Parse free-form amount input.
///
/// Empty input is a missing field; anything that is not a decimal number is
/// an invalid amount.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("amount is required".to_string()));
    }
    let amount = Decimal::from_str(trimmed)
        .map_err(|_| Error::InvalidAmount(format!("{trimmed:?} is not a number")))?;
    amount_checked(amount)
}

/// Check an amount and normalize it to two decimal places.
pub fn amount_checked(amount: Decimal) -> Result<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::InvalidAmount(format!(
            "{amount} is negative; amounts must be zero or more"
        )));
    }

    let mut rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded > MAX_AMOUNT {
        return Err(Error::InvalidAmount(format!(
            "{amount} exceeds the maximum of {MAX_AMOUNT}"
        )));
    }
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(AMOUNT_SCALE);
    Ok(rounded)
}

/// Trim a category and require it to be non-empty.
pub fn category(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("category is required".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("date is required".to_string()));
    }
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        Error::Validation(format!("{trimmed:?} is not a date (expected YYYY-MM-DD)"))
    })?;
    date_checked(date)
}

/// Require a four-digit year, as a SQL `DATE` column does.
pub fn date_checked(date: NaiveDate) -> Result<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(Error::Validation(format!(
            "{date} is out of range (years {MIN_YEAR} to {MAX_YEAR})"
        )));
    }
    Ok(date)
}

/// Storage text for a date already passed through [`date_checked`].
pub(crate) fn date_text(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
