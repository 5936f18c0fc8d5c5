//! Delimited list coercion.
//!
//! Cells look like `['a', 'b']`, `[1, 2, 3]` or bare `1, 2, 3`. Quoted
//! extraction keeps element text verbatim (and drops empty quoted tokens);
//! bare splitting trims each part. Any element that fails to convert
//! invalidates the whole list - there are no partial results.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::coerce::ListElement;

static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'([^']*)'|"([^"]*)""#).expect("invalid quote pattern"));

/// Convert a list cell into typed elements.
///
/// Returns `None` when any element fails to convert; the binder leaves the
/// field untouched in that case.
pub fn coerce<T: ListElement>(cell: &str) -> Option<Vec<T>> {
    let elements = split_elements(cell);
    let mut out = Vec::with_capacity(elements.len());
    for element in elements {
        out.push(T::parse_element(&element)?);
    }
    Some(out)
}

/// Extract raw element texts from a list cell.
fn split_elements(cell: &str) -> Vec<String> {
    let mut value = cell.trim();
    value = value.strip_prefix('[').unwrap_or(value);
    value = value.strip_suffix(']').unwrap_or(value);
    if value.is_empty() {
        return Vec::new();
    }

    if value.contains('\'') || value.contains('"') {
        QUOTED
            .captures_iter(value)
            .filter_map(|caps| {
                caps.get(1)
                    .or_else(|| caps.get(2))
                    .map(|m| m.as_str().to_string())
            })
            .filter(|element| !element.is_empty())
            .collect()
    } else {
        value.split(',').map(|part| part.trim().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quoted_strings() {
        let parsed: Vec<String> = coerce("['apple', 'banana', 'cherry']").unwrap();
        assert_eq!(parsed, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_double_quoted_strings() {
        let parsed: Vec<String> = coerce(r#"["dog", "cat", "bird"]"#).unwrap();
        assert_eq!(parsed, vec!["dog", "cat", "bird"]);
    }

    #[test]
    fn test_mixed_quotes() {
        let parsed: Vec<String> = coerce(r#"['apple', "banana", 'cherry']"#).unwrap();
        assert_eq!(parsed, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_empty_quoted_tokens_dropped() {
        let parsed: Vec<String> = coerce("['a', '', 'b']").unwrap();
        assert_eq!(parsed, vec!["a", "b"]);
    }

    #[test]
    fn test_integers() {
        let parsed: Vec<i64> = coerce("[1, 2, 3, 4, 5]").unwrap();
        assert_eq!(parsed, vec![1, 2, 3, 4, 5]);

        let parsed: Vec<i64> = coerce("[9223372036854775800, 9223372036854775801]").unwrap();
        assert_eq!(parsed, vec![9223372036854775800, 9223372036854775801]);
    }

    #[test]
    fn test_floats() {
        let parsed: Vec<f64> = coerce("[1.1, 2.2, 3.3]").unwrap();
        assert_eq!(parsed, vec![1.1, 2.2, 3.3]);
    }

    #[test]
    fn test_bools() {
        let parsed: Vec<bool> = coerce("[true, false, true]").unwrap();
        assert_eq!(parsed, vec![true, false, true]);
    }

    #[test]
    fn test_empty_list() {
        let parsed: Vec<String> = coerce("[]").unwrap();
        assert!(parsed.is_empty());

        let parsed: Vec<i64> = coerce("").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_whitespace_tolerated() {
        let parsed: Vec<i64> = coerce("  [  1  ,  2  ,  3  ]  ").unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
    }

    #[test]
    fn test_bare_lists() {
        let parsed: Vec<i64> = coerce("1, 2, 3, 4").unwrap();
        assert_eq!(parsed, vec![1, 2, 3, 4]);

        let parsed: Vec<String> = coerce("apple,banana,  cherry,  date").unwrap();
        assert_eq!(parsed, vec!["apple", "banana", "cherry", "date"]);
    }

    #[test]
    fn test_single_item() {
        let parsed: Vec<i64> = coerce("[42]").unwrap();
        assert_eq!(parsed, vec![42]);
    }

    #[test]
    fn test_bad_element_invalidates_list() {
        assert_eq!(coerce::<i64>("[1, two, 3]"), None);
        assert_eq!(coerce::<f64>("[1.1, 2.two, 3.3]"), None);
        assert_eq!(coerce::<bool>("[true, not_bool, false]"), None);
    }

    #[test]
    fn test_quoted_elements_kept_verbatim() {
        let parsed: Vec<String> = coerce("['  spaced  ']").unwrap();
        assert_eq!(parsed, vec!["  spaced  "]);
    }
}
