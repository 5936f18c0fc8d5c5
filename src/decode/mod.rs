//! Record binding and collection decoding.
//!
//! The binder walks a record type's bound fields for one row; the decode
//! entry points drive it over an already-open [`csv::Reader`]. Opening and
//! closing the underlying stream is the caller's responsibility - the
//! convenience helpers here scope a file handle to a single call.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::binding::{FieldBinding, HeaderIndex};
use crate::coerce::Outcome;
use crate::error::{DecodeError, DecodeResult, FieldError};
use crate::schema::CsvRecord;

// =============================================================================
// Record Binder
// =============================================================================

/// Bind one data row into `record`.
///
/// Fields are visited in declaration order. A field is silently skipped when
/// its binding has no usable column name, the column is absent from the
/// header, or the row is too short to hold the column. The first hard
/// coercion failure aborts the record, wrapped with the offending column.
pub fn bind_record<T: CsvRecord>(
    record: &mut T,
    row: &StringRecord,
    header: &HeaderIndex,
) -> Result<(), FieldError> {
    for spec in T::FIELDS {
        let Some(binding) = FieldBinding::parse(spec.tag) else {
            continue;
        };
        let Some(position) = header.position(&binding.column) else {
            continue;
        };
        let Some(cell) = row.get(position) else {
            continue;
        };
        match (spec.apply)(record, cell, &binding.hint) {
            Outcome::Applied(()) | Outcome::Skipped => {}
            Outcome::Failed(source) => {
                return Err(FieldError {
                    column: binding.column,
                    source,
                });
            }
        }
    }
    Ok(())
}

// =============================================================================
// Collection Decoding
// =============================================================================

/// Decode every data row of `reader` into a vector of records.
///
/// Rows are read eagerly before binding starts. The first failing row aborts
/// the whole call (its number is 1-based over data rows) and nothing is
/// returned. The reader should be built flexible so short rows surface as
/// skipped fields rather than read errors; [`reader_from_str`] and
/// [`decode_path`] already are.
pub fn decode_all<T, R>(reader: &mut Reader<R>) -> DecodeResult<Vec<T>>
where
    T: CsvRecord,
    R: Read,
{
    let header = read_header(reader)?;
    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(DecodeError::Read)?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let mut record = T::default();
        bind_record(&mut record, row, &header)
            .map_err(|source| DecodeError::Row { row: index + 1, source })?;
        records.push(record);
    }
    Ok(records)
}

/// Decode exactly one data row of `reader`.
pub fn decode_one<T, R>(reader: &mut Reader<R>) -> DecodeResult<T>
where
    T: CsvRecord,
    R: Read,
{
    let header = read_header(reader)?;
    let row = reader
        .records()
        .next()
        .ok_or(DecodeError::MissingRow)?
        .map_err(DecodeError::Read)?;

    let mut record = T::default();
    bind_record(&mut record, &row, &header)
        .map_err(|source| DecodeError::Row { row: 1, source })?;
    Ok(record)
}

fn read_header<R: Read>(reader: &mut Reader<R>) -> DecodeResult<HeaderIndex> {
    let header = reader.headers().map_err(DecodeError::Header)?;
    if header.len() == 0 {
        return Err(DecodeError::EmptyHeader);
    }
    Ok(HeaderIndex::from_record(header))
}

// =============================================================================
// Reader Construction
// =============================================================================

/// Build a CSV reader over in-memory text.
///
/// The reader is flexible: rows may carry fewer (or more) cells than the
/// header names columns.
pub fn reader_from_str(input: &str) -> Reader<&[u8]> {
    ReaderBuilder::new().flexible(true).from_reader(input.as_bytes())
}

/// Decode every data row of an in-memory CSV document.
pub fn decode_str<T: CsvRecord>(input: &str) -> DecodeResult<Vec<T>> {
    decode_all(&mut reader_from_str(input))
}

/// Read a CSV file and decode every data row.
///
/// The file's bytes are transcoded to UTF-8 first (encoding detected with
/// chardet); the handle is released before decoding begins.
pub fn decode_path<T: CsvRecord, P: AsRef<Path>>(path: P) -> DecodeResult<Vec<T>> {
    let bytes = fs::read(path.as_ref())?;
    let content = decode_content(&bytes, &detect_encoding(&bytes));
    decode_str(&content)
}

// =============================================================================
// Encoding Detection
// =============================================================================

/// Detect the text encoding of raw bytes.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode raw bytes to a string using the named encoding.
///
/// Unknown encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}
