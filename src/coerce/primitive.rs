//! Scalar cell parsing.
//!
//! Cells are trimmed first; an empty cell always coerces to the target
//! kind's zero value instead of erroring. Everything else is a base-10 /
//! standard-float / boolean-vocabulary parse with a hard error on failure.

use std::str::FromStr;

use crate::coerce::Outcome;
use crate::error::CoerceError;

/// Parse a signed integer cell at the target width.
pub(crate) fn parse_signed<T: FromStr + Default>(cell: &str) -> Outcome<T> {
    let value = cell.trim();
    if value.is_empty() {
        return Outcome::Applied(T::default());
    }
    match value.parse::<T>() {
        Ok(parsed) => Outcome::Applied(parsed),
        Err(_) => Outcome::Failed(CoerceError::InvalidInt(value.to_string())),
    }
}

/// Parse an unsigned integer cell at the target width.
pub(crate) fn parse_unsigned<T: FromStr + Default>(cell: &str) -> Outcome<T> {
    let value = cell.trim();
    if value.is_empty() {
        return Outcome::Applied(T::default());
    }
    match value.parse::<T>() {
        Ok(parsed) => Outcome::Applied(parsed),
        Err(_) => Outcome::Failed(CoerceError::InvalidUint(value.to_string())),
    }
}

/// Parse a float cell at the target width.
pub(crate) fn parse_float<T: FromStr + Default>(cell: &str) -> Outcome<T> {
    let value = cell.trim();
    if value.is_empty() {
        return Outcome::Applied(T::default());
    }
    match value.parse::<T>() {
        Ok(parsed) => Outcome::Applied(parsed),
        Err(_) => Outcome::Failed(CoerceError::InvalidFloat(value.to_string())),
    }
}

/// Parse a boolean cell.
pub(crate) fn parse_bool(cell: &str) -> Outcome<bool> {
    let value = cell.trim();
    if value.is_empty() {
        return Outcome::Applied(false);
    }
    match parse_bool_value(value) {
        Some(parsed) => Outcome::Applied(parsed),
        None => Outcome::Failed(CoerceError::InvalidBool(value.to_string())),
    }
}

/// Boolean vocabulary: the lenient yes/no set first, then the strict
/// single-letter forms the fallback parser has always accepted.
pub(crate) fn parse_bool_value(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => return Some(true),
        "false" | "no" | "n" | "0" => return Some(false),
        _ => {}
    }
    match value {
        "t" | "T" => Some(true),
        "f" | "F" => Some(false),
        _ => None,
    }
}
