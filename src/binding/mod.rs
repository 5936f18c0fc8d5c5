//! Field bindings and header indexing.
//!
//! A binding string names the source column and, optionally, a coercion
//! strategy: `"price"` or `"price, list"`. The text splits on the first
//! comma; both segments are trimmed. The second segment selects a coercer,
//! and anything outside the known set rides along untouched as a candidate
//! date layout for timestamp fields - an unrecognized hint is never an
//! error by itself.

use std::collections::HashMap;

use csv::StringRecord;

// =============================================================================
// Strategy Hints
// =============================================================================

/// Strategy selector parsed from the second binding segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    /// No hint: primitive coercion with inferred date layouts.
    None,
    /// Bracketed or bare comma-separated list.
    List,
    /// Loose-JSON object/array/scalar.
    Json,
    /// Hexadecimal blob.
    Hex,
    /// Bit-string blob.
    Binary,
    /// Anything else: carried verbatim as a chrono date layout.
    DateLayout(String),
}

impl Hint {
    fn from_segment(segment: &str) -> Self {
        match segment {
            "" => Hint::None,
            "list" => Hint::List,
            "json" => Hint::Json,
            "hex" => Hint::Hex,
            "binary" => Hint::Binary,
            other => Hint::DateLayout(other.to_string()),
        }
    }
}

// =============================================================================
// Field Bindings
// =============================================================================

/// A parsed field binding: source column name plus strategy hint.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    /// Column name, matched case-sensitively and verbatim against headers.
    pub column: String,
    /// Coercion strategy for the bound cell.
    pub hint: Hint,
}

impl FieldBinding {
    /// Parse a binding string.
    ///
    /// Returns `None` when the column name is empty; such fields are never
    /// written. Malformed bindings are not an error.
    pub fn parse(tag: &str) -> Option<Self> {
        let (column, hint) = match tag.split_once(',') {
            Some((column, rest)) => (column.trim(), Hint::from_segment(rest.trim())),
            None => (tag.trim(), Hint::None),
        };
        if column.is_empty() {
            return None;
        }
        Some(Self {
            column: column.to_string(),
            hint,
        })
    }
}

// =============================================================================
// Header Index
// =============================================================================

/// Column name to zero-based position, built once from the header record.
///
/// Later duplicate names overwrite earlier positions. Lookups for absent
/// names make the binder skip the field rather than fail.
#[derive(Debug, Default, Clone)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Index a header record left to right.
    pub fn from_record(header: &StringRecord) -> Self {
        let mut positions = HashMap::with_capacity(header.len());
        for (index, name) in header.iter().enumerate() {
            positions.insert(name.to_string(), index);
        }
        Self { positions }
    }

    /// Position of `column`, if the header contains it.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Number of distinct column names.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the index holds no columns.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_only() {
        let binding = FieldBinding::parse("price").unwrap();
        assert_eq!(binding.column, "price");
        assert_eq!(binding.hint, Hint::None);
    }

    #[test]
    fn test_parse_with_hint() {
        let binding = FieldBinding::parse("tags, list").unwrap();
        assert_eq!(binding.column, "tags");
        assert_eq!(binding.hint, Hint::List);

        assert_eq!(FieldBinding::parse("meta,json").unwrap().hint, Hint::Json);
        assert_eq!(FieldBinding::parse("raw, hex").unwrap().hint, Hint::Hex);
        assert_eq!(
            FieldBinding::parse("bits, binary").unwrap().hint,
            Hint::Binary
        );
    }

    #[test]
    fn test_unknown_hint_is_date_layout() {
        let binding = FieldBinding::parse("born, %d/%m/%Y").unwrap();
        assert_eq!(binding.hint, Hint::DateLayout("%d/%m/%Y".to_string()));
    }

    #[test]
    fn test_empty_hint_segment() {
        let binding = FieldBinding::parse("price,").unwrap();
        assert_eq!(binding.hint, Hint::None);

        let binding = FieldBinding::parse("price,   ").unwrap();
        assert_eq!(binding.hint, Hint::None);
    }

    #[test]
    fn test_empty_column_skipped() {
        assert!(FieldBinding::parse("").is_none());
        assert!(FieldBinding::parse("   ").is_none());
        assert!(FieldBinding::parse(", list").is_none());
    }

    #[test]
    fn test_column_names_kept_verbatim() {
        let binding = FieldBinding::parse("  Mixed Case Name  ").unwrap();
        assert_eq!(binding.column, "Mixed Case Name");
    }

    #[test]
    fn test_header_positions() {
        let header = StringRecord::from(vec!["id", "name", "tags"]);
        let index = HeaderIndex::from_record(&header);
        assert_eq!(index.position("id"), Some(0));
        assert_eq!(index.position("tags"), Some(2));
        assert_eq!(index.position("missing"), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_header_duplicates_last_wins() {
        let header = StringRecord::from(vec!["id", "name", "id"]);
        let index = HeaderIndex::from_record(&header);
        assert_eq!(index.position("id"), Some(2));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_header_lookup_case_sensitive() {
        let header = StringRecord::from(vec!["Name"]);
        let index = HeaderIndex::from_record(&header);
        assert_eq!(index.position("name"), None);
        assert_eq!(index.position("Name"), Some(0));
    }
}
