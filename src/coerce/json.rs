//! Loose-JSON repair and decoding.
//!
//! Cells may carry quasi-JSON with single quotes and bare identifier keys.
//! The repair pass rewrites that into strict JSON text before handing it to
//! serde: every `'` becomes `"` (a blunt global substitution with no
//! escaping awareness - string values containing an apostrophe get
//! corrupted, which is the documented contract), then bare keys inside flat
//! brace groups are quoted.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;

static BRACE_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^{}]*").expect("invalid brace pattern"));
static BARE_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)(\s*:)").expect("invalid key pattern"));

/// Rewrite relaxed object/array/scalar text into strict JSON text.
pub fn repair(text: &str) -> String {
    let quoted = text.replace('\'', "\"");
    BRACE_GROUP
        .replace_all(&quoted, |caps: &Captures<'_>| {
            BARE_KEY.replace_all(&caps[0], "\"$1\"$2").into_owned()
        })
        .into_owned()
}

/// Repair then decode a cell into the target shape.
///
/// Returns `None` on any decode failure (malformed text or shape mismatch);
/// the field is left untouched rather than partially populated. Empty input
/// is always a failure.
pub fn decode_loose<T: DeserializeOwned>(cell: &str) -> Option<T> {
    serde_json::from_str(&repair(cell)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Account {
        name: String,
        age: i64,
        balance: f64,
        active: bool,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Profile {
        id: i64,
        user: Account,
        tags: Vec<String>,
        scores: Vec<i64>,
    }

    #[test]
    fn test_single_quoted_object() {
        let parsed: Account =
            decode_loose("{'name': 'John', 'age': 30, 'balance': 100.50, 'active': true}").unwrap();
        assert_eq!(parsed.name, "John");
        assert_eq!(parsed.age, 30);
        assert_eq!(parsed.balance, 100.50);
        assert!(parsed.active);
    }

    #[test]
    fn test_strict_json_passes_through() {
        let parsed: Account =
            decode_loose(r#"{"name": "Jane", "age": 25, "balance": 200.75, "active": false}"#)
                .unwrap();
        assert_eq!(parsed.name, "Jane");
        assert!(!parsed.active);
    }

    #[test]
    fn test_bare_keys_quoted() {
        let parsed: Account =
            decode_loose("{name: 'Alice', age: 22, balance: 150.25, active: true}").unwrap();
        assert_eq!(parsed.name, "Alice");
        assert_eq!(parsed.age, 22);
    }

    #[test]
    fn test_mixed_quoting_and_spacing() {
        let parsed: Account =
            decode_loose("{name:'Bob',age:   35,  balance: 300.00,'active':false}").unwrap();
        assert_eq!(parsed.name, "Bob");
        assert_eq!(parsed.age, 35);
    }

    #[test]
    fn test_nested_object() {
        let parsed: Profile = decode_loose(
            "{'id': 1, 'user': {'name': 'Charlie', 'age': 40, 'balance': 500.0, 'active': true}, \
             'tags': ['developer', 'rust'], 'scores': [85, 90, 95]}",
        )
        .unwrap();
        assert_eq!(parsed.id, 1);
        assert_eq!(parsed.user.name, "Charlie");
        assert_eq!(parsed.tags, vec!["developer", "rust"]);
        assert_eq!(parsed.scores, vec![85, 90, 95]);
    }

    #[test]
    fn test_scalars_and_arrays() {
        assert_eq!(
            decode_loose::<String>("'Hello World'"),
            Some("Hello World".to_string())
        );
        assert_eq!(decode_loose::<i64>("42"), Some(42));
        assert_eq!(
            decode_loose::<Vec<String>>("['apple', 'banana']"),
            Some(vec!["apple".to_string(), "banana".to_string()])
        );
        assert_eq!(decode_loose::<Vec<i64>>("[1, 2, 3]"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_empty_object_yields_defaults() {
        let parsed: serde_json::Value = decode_loose("{}").unwrap();
        assert_eq!(parsed, serde_json::json!({}));
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(
            decode_loose::<Account>("{name: 'Invalid, missing closing brace"),
            None
        );
        assert_eq!(decode_loose::<Account>(""), None);
    }

    #[test]
    fn test_shape_mismatch_is_no_value() {
        // "thirty" cannot convert into the numeric age field.
        assert_eq!(
            decode_loose::<Account>(
                "{'name': 'John', 'age': 'thirty', 'balance': 100.50, 'active': true}"
            ),
            None
        );
    }

    #[test]
    fn test_repair_leaves_quoted_keys_alone() {
        assert_eq!(repair(r#"{"a": 1}"#), r#"{"a": 1}"#);
        assert_eq!(repair("{a: 1}"), r#"{"a": 1}"#);
        assert_eq!(repair("{'a': 1}"), r#"{"a": 1}"#);
    }
}
