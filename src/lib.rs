//! # Colbind - column-bound CSV decoding
//!
//! Colbind decodes CSV text into strongly-typed Rust records. Each field of
//! a record declares the column it binds to and, optionally, a coercion
//! strategy; the engine matches columns by name, dispatches every cell to
//! the right coercer, and reports failures with row and column context.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐     ┌──────────────┐     ┌───────────────┐     ┌──────────┐
//! │ CSV rows  │────▶│ Header index │────▶│ Field binding │────▶│ Coercers │
//! │ (csv)     │     │ (name → pos) │     │ (col, hint)   │     │ (6 kinds)│
//! └───────────┘     └──────────────┘     └───────────────┘     └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use colbind::{csv_record, decode_str};
//!
//! csv_record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Person {
//!         pub id: i64 => "id",
//!         pub name: String => "name",
//!         pub tags: Vec<String> => "tags, list",
//!     }
//! }
//!
//! let csv = "id,name,tags\n1,Ann,\"['x','y']\"\n";
//! let people: Vec<Person> = decode_str(csv).unwrap();
//! assert_eq!(people[0].name, "Ann");
//! assert_eq!(people[0].tags, vec!["x", "y"]);
//! ```
//!
//! ## Binding syntax
//!
//! `"<column>"` or `"<column>, <hint>"` with `<hint>` one of `list`, `json`,
//! `hex`, `binary`, or a chrono date layout such as `%d/%m/%Y`. Unhinted
//! timestamp fields infer their layout from a fixed candidate list.
//!
//! ## Modules
//!
//! - [`error`] - error hierarchy
//! - [`binding`] - binding strings and header indexing
//! - [`coerce`] - the six coercion strategies
//! - [`schema`] - schema registration and the [`csv_record!`] macro
//! - [`decode`] - record binder and decode entry points

// Core modules
pub mod binding;
pub mod coerce;
pub mod error;

// Schema registration
pub mod schema;

// Decoding
pub mod decode;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{CoerceError, CoerceResult, DecodeError, DecodeResult, FieldError};

// =============================================================================
// Re-exports - Bindings
// =============================================================================

pub use binding::{FieldBinding, HeaderIndex, Hint};

// =============================================================================
// Re-exports - Coercion
// =============================================================================

pub use coerce::{FromCell, ListElement, Outcome};

// =============================================================================
// Re-exports - Schema
// =============================================================================

pub use schema::{apply_cell, CsvRecord, FieldSpec};

// =============================================================================
// Re-exports - Decoding
// =============================================================================

pub use decode::{
    bind_record, decode_all, decode_content, decode_one, decode_path, decode_str,
    detect_encoding, reader_from_str,
};
