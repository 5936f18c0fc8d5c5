//! Cell coercion strategies.
//!
//! Each submodule converts one cell's text into a typed value: scalars with
//! timestamp inference ([`primitive`], [`date`]), delimited lists
//! ([`list`]), loose JSON ([`json`]), hex blobs ([`hex`]) and bit-string
//! blobs ([`binary`]). [`FromCell`] is the seam the record binder drives:
//! one method per strategy hint, with defaults that refuse strategies a
//! target shape cannot accept.

pub mod binary;
pub mod date;
pub mod hex;
pub mod json;
pub mod list;
pub mod primitive;

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;

use crate::error::CoerceError;

// =============================================================================
// Conversion Outcome
// =============================================================================

/// Result of applying one coercion strategy to one cell.
///
/// The three shapes preserve the engine's deliberate asymmetry: `Skipped`
/// marks a coercer's invalid sentinel and leaves the field at its prior
/// value, while `Failed` aborts the whole record. Only the primitive path
/// produces `Failed`.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The cell converted; the value was (or should be) written.
    Applied(T),
    /// The strategy produced its invalid sentinel; the field is untouched.
    Skipped,
    /// Hard conversion failure; aborts the record.
    Failed(CoerceError),
}

impl<T> Outcome<T> {
    /// The applied value, if any.
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            _ => None,
        }
    }

    /// Whether this outcome is the invalid sentinel.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped)
    }

    /// Whether this outcome is a hard failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

// =============================================================================
// FromCell
// =============================================================================

/// A type that can be populated from one CSV cell.
///
/// One method per strategy hint. The defaults reject a strategy with
/// [`Outcome::Skipped`], so only shapes a strategy can target opt in: byte
/// vectors accept `hex`/`binary`, element vectors accept `list`, and every
/// implementor accepts `json` through serde.
pub trait FromCell: Sized + DeserializeOwned {
    /// Primitive path: scalars and timestamps. Failures are hard errors.
    ///
    /// `layout` carries an unrecognized strategy hint, attempted as an
    /// explicit chrono date layout by timestamp targets and ignored by
    /// everything else.
    fn from_primitive(cell: &str, layout: Option<&str>) -> Outcome<Self>;

    /// `list` hint: bracketed or bare comma-separated elements.
    fn from_list(_cell: &str) -> Outcome<Self> {
        Outcome::Skipped
    }

    /// `json` hint: loose-JSON repair then serde decode.
    fn from_json(cell: &str) -> Outcome<Self> {
        match json::decode_loose(cell) {
            Some(value) => Outcome::Applied(value),
            None => Outcome::Skipped,
        }
    }

    /// `hex` hint: hex digit string into bytes.
    fn from_hex(_cell: &str) -> Outcome<Self> {
        Outcome::Skipped
    }

    /// `binary` hint: bit string into bytes.
    fn from_binary(_cell: &str) -> Outcome<Self> {
        Outcome::Skipped
    }
}

impl FromCell for String {
    fn from_primitive(cell: &str, _layout: Option<&str>) -> Outcome<Self> {
        Outcome::Applied(cell.trim().to_string())
    }
}

macro_rules! signed_from_cell {
    ($($ty:ty),*) => {$(
        impl FromCell for $ty {
            fn from_primitive(cell: &str, _layout: Option<&str>) -> Outcome<Self> {
                primitive::parse_signed(cell)
            }
        }
    )*};
}

macro_rules! unsigned_from_cell {
    ($($ty:ty),*) => {$(
        impl FromCell for $ty {
            fn from_primitive(cell: &str, _layout: Option<&str>) -> Outcome<Self> {
                primitive::parse_unsigned(cell)
            }
        }
    )*};
}

macro_rules! float_from_cell {
    ($($ty:ty),*) => {$(
        impl FromCell for $ty {
            fn from_primitive(cell: &str, _layout: Option<&str>) -> Outcome<Self> {
                primitive::parse_float(cell)
            }
        }
    )*};
}

signed_from_cell!(i8, i16, i32, i64);
unsigned_from_cell!(u8, u16, u32, u64);
float_from_cell!(f32, f64);

impl FromCell for bool {
    fn from_primitive(cell: &str, _layout: Option<&str>) -> Outcome<Self> {
        primitive::parse_bool(cell)
    }
}

impl FromCell for NaiveDateTime {
    fn from_primitive(cell: &str, layout: Option<&str>) -> Outcome<Self> {
        let value = cell.trim();
        if value.is_empty() {
            return Outcome::Applied(NaiveDateTime::default());
        }
        match date::coerce(value, layout) {
            Ok(parsed) => Outcome::Applied(parsed),
            Err(err) => Outcome::Failed(err),
        }
    }
}

impl FromCell for serde_json::Value {
    fn from_primitive(_cell: &str, _layout: Option<&str>) -> Outcome<Self> {
        Outcome::Failed(CoerceError::Unsupported(std::any::type_name::<Self>()))
    }
}

impl<V: DeserializeOwned> FromCell for HashMap<String, V> {
    fn from_primitive(_cell: &str, _layout: Option<&str>) -> Outcome<Self> {
        Outcome::Failed(CoerceError::Unsupported(std::any::type_name::<Self>()))
    }
}

// =============================================================================
// List Elements
// =============================================================================

/// Element kinds the list coercer can convert.
///
/// Conversion follows the primitive scalar rules; element extraction decides
/// trimming, so `parse_element` sees the text as extracted.
pub trait ListElement: Sized {
    /// Convert one extracted element, `None` on failure.
    fn parse_element(text: &str) -> Option<Self>;

    /// Accept a decoded hex/binary blob. Only byte elements do.
    fn from_blob(_bytes: Vec<u8>) -> Option<Vec<Self>> {
        None
    }
}

impl ListElement for String {
    fn parse_element(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl ListElement for bool {
    fn parse_element(text: &str) -> Option<Self> {
        primitive::parse_bool_value(text)
    }
}

macro_rules! numeric_list_element {
    ($($ty:ty),*) => {$(
        impl ListElement for $ty {
            fn parse_element(text: &str) -> Option<Self> {
                text.parse().ok()
            }
        }
    )*};
}

numeric_list_element!(i8, i16, i32, i64, u16, u32, u64, f32, f64);

impl ListElement for u8 {
    fn parse_element(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    fn from_blob(bytes: Vec<u8>) -> Option<Vec<Self>> {
        Some(bytes)
    }
}

impl<T> FromCell for Vec<T>
where
    T: ListElement + DeserializeOwned,
{
    fn from_primitive(_cell: &str, _layout: Option<&str>) -> Outcome<Self> {
        Outcome::Failed(CoerceError::Unsupported(std::any::type_name::<Self>()))
    }

    fn from_list(cell: &str) -> Outcome<Self> {
        match list::coerce(cell) {
            Some(elements) => Outcome::Applied(elements),
            None => Outcome::Skipped,
        }
    }

    fn from_hex(cell: &str) -> Outcome<Self> {
        match hex::coerce(cell).and_then(T::from_blob) {
            Some(bytes) => Outcome::Applied(bytes),
            None => Outcome::Skipped,
        }
    }

    fn from_binary(cell: &str) -> Outcome<Self> {
        match binary::coerce(cell).and_then(T::from_blob) {
            Some(bytes) => Outcome::Applied(bytes),
            None => Outcome::Skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_string_trims() {
        assert_eq!(
            String::from_primitive("  hello world  ", None).applied(),
            Some("hello world".to_string())
        );
        assert_eq!(String::from_primitive("", None).applied(), Some(String::new()));
    }

    #[test]
    fn test_timestamp_empty_is_zero_value() {
        assert_eq!(
            NaiveDateTime::from_primitive("   ", None).applied(),
            Some(NaiveDateTime::default())
        );
    }

    #[test]
    fn test_timestamp_layout_hint_passthrough() {
        let parsed = NaiveDateTime::from_primitive("15/05/2023", Some("%d/%m/%Y"))
            .applied()
            .unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2023, 5, 15).unwrap());
    }

    #[test]
    fn test_unused_layout_ignored_by_scalars() {
        // An unrecognized hint reaches scalar targets too; they ignore it.
        assert_eq!(i64::from_primitive("7", Some("%Y-%m-%d")).applied(), Some(7));
    }

    #[test]
    fn test_vec_rejects_primitive_path() {
        assert!(Vec::<String>::from_primitive("a,b", None).is_failed());
    }

    #[test]
    fn test_vec_list_round() {
        assert_eq!(
            Vec::<i64>::from_list("[1, 2, 3]").applied(),
            Some(vec![1, 2, 3])
        );
        assert!(Vec::<i64>::from_list("[1, two]").is_skipped());
    }

    #[test]
    fn test_bytes_hex_and_binary() {
        assert_eq!(
            Vec::<u8>::from_hex("0xAABB").applied(),
            Some(vec![0xAA, 0xBB])
        );
        assert!(Vec::<u8>::from_hex("0xGG").is_skipped());
        assert_eq!(
            Vec::<u8>::from_binary("b'10101010'").applied(),
            Some(vec![0xAA])
        );
        // Blobs only target byte vectors.
        assert!(Vec::<i64>::from_hex("0xAABB").is_skipped());
    }

    #[test]
    fn test_json_default_path() {
        assert_eq!(
            serde_json::Value::from_json("{'a': 1}").applied(),
            Some(serde_json::json!({"a": 1}))
        );
        assert!(serde_json::Value::from_json("").is_skipped());
        assert!(i64::from_json("42").applied() == Some(42));
    }

    #[test]
    fn test_scalar_rejects_blob_paths() {
        assert!(i64::from_hex("0xAA").is_skipped());
        assert!(String::from_binary("b'101'").is_skipped());
        assert!(bool::from_list("[true]").is_skipped());
    }
}
