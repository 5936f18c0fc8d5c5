//! Schema registration: how record types expose their column bindings.
//!
//! Rust has no runtime struct reflection, so the binding metadata the
//! decoder drives lives in an explicit per-type schema: [`CsvRecord`]
//! exposes one [`FieldSpec`] per bound field, pairing the raw binding
//! string with a typed apply function. The [`csv_record!`] macro generates
//! both the struct and its schema, so call sites read like a tagged struct
//! declaration.

use crate::binding::Hint;
use crate::coerce::{FromCell, Outcome};

/// One bound field of a record type.
pub struct FieldSpec<R> {
    /// Raw binding text: `"column"` or `"column, hint"`.
    pub tag: &'static str,
    /// Applies one cell to the field this spec describes.
    pub apply: fn(&mut R, &str, &Hint) -> Outcome<()>,
}

/// A record type decodable from CSV rows.
///
/// Usually generated with [`csv_record!`]; hand-written implementations
/// list one [`FieldSpec`] per bound field in declaration order.
pub trait CsvRecord: Default + 'static {
    /// Bound fields in declaration order.
    const FIELDS: &'static [FieldSpec<Self>];
}

/// Dispatch one cell to the strategy its hint selects and write the result.
pub fn apply_cell<T: FromCell>(slot: &mut T, cell: &str, hint: &Hint) -> Outcome<()> {
    let outcome = match hint {
        Hint::None => T::from_primitive(cell, None),
        Hint::DateLayout(layout) => T::from_primitive(cell, Some(layout)),
        Hint::List => T::from_list(cell),
        Hint::Json => T::from_json(cell),
        Hint::Hex => T::from_hex(cell),
        Hint::Binary => T::from_binary(cell),
    };
    match outcome {
        Outcome::Applied(value) => {
            *slot = value;
            Outcome::Applied(())
        }
        Outcome::Skipped => Outcome::Skipped,
        Outcome::Failed(err) => Outcome::Failed(err),
    }
}

/// Declare a record struct together with its column bindings.
///
/// Bound fields take `=> "column"` or `=> "column, hint"` after their type;
/// fields without a binding are left untouched by the decoder. The struct
/// must (derive or) implement `Default`.
///
/// ```
/// use colbind::{csv_record, decode_str};
///
/// csv_record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Track {
///         pub id: i64 => "id",
///         pub title: String => "title",
///         pub tags: Vec<String> => "tags, list",
///         pub comment: String,
///     }
/// }
///
/// let csv = "id,title,tags\n7,Intro,\"['warm','short']\"\n";
/// let tracks: Vec<Track> = decode_str(csv).unwrap();
/// assert_eq!(tracks[0].id, 7);
/// assert_eq!(tracks[0].tags, vec!["warm", "short"]);
/// assert_eq!(tracks[0].comment, "");
/// ```
#[macro_export]
macro_rules! csv_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $fvis:vis $field:ident : $ty:ty $(=> $tag:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $fvis $field: $ty, )*
        }

        impl $crate::schema::CsvRecord for $name {
            const FIELDS: &'static [$crate::schema::FieldSpec<Self>] = &[
                $($(
                    $crate::schema::FieldSpec {
                        tag: $tag,
                        apply: |record: &mut Self, cell: &str, hint: &$crate::binding::Hint| {
                            $crate::schema::apply_cell(&mut record.$field, cell, hint)
                        },
                    },
                )?)*
            ];
        }
    };
}

/// Grant a `Deserialize` type the loose-JSON coercion path.
///
/// The generated implementation decodes `json`-hinted cells through the
/// repair pass and rejects every other strategy (the primitive path reports
/// the type as unsupported, as for any struct-like target).
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Meta {
///     source: String,
/// }
///
/// colbind::json_cell!(Meta);
/// ```
#[macro_export]
macro_rules! json_cell {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::coerce::FromCell for $ty {
            fn from_primitive(
                _cell: &str,
                _layout: Option<&str>,
            ) -> $crate::coerce::Outcome<Self> {
                $crate::coerce::Outcome::Failed($crate::error::CoerceError::Unsupported(
                    ::std::any::type_name::<Self>(),
                ))
            }
        }
    )*};
}
