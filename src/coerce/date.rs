//! Calendar timestamp inference.
//!
//! Dates arrive in whatever shape the upstream export produced, so cells
//! are tried against a fixed candidate list. The order is a deliberate
//! tie-break for ambiguous strings: `15/05/2023` resolves day-first because
//! the DD/MM candidate precedes MM/DD, while `1/2/2006` resolves month-first
//! because the zero-padded candidates only accept two-digit fields. Shape
//! regexes enforce the field widths before chrono's lenient parser sees the
//! text.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CoerceError, CoerceResult};

enum Layout {
    Date(&'static str),
    DateTime(&'static str),
    Rfc3339,
}

struct Candidate {
    shape: Regex,
    layout: Layout,
}

impl Candidate {
    fn new(shape: &str, layout: Layout) -> Self {
        Self {
            shape: Regex::new(shape).expect("invalid candidate shape"),
            layout,
        }
    }

    fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        if !self.shape.is_match(value) {
            return None;
        }
        match self.layout {
            Layout::Date(fmt) => NaiveDate::parse_from_str(value, fmt).ok().map(at_midnight),
            Layout::DateTime(fmt) => NaiveDateTime::parse_from_str(value, fmt).ok(),
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|parsed| parsed.naive_local()),
        }
    }
}

static CANDIDATES: Lazy<Vec<Candidate>> = Lazy::new(|| {
    vec![
        // default
        Candidate::new(r"^\d{4}-\d{2}-\d{2}$", Layout::Date("%Y-%m-%d")),
        // "/" format
        Candidate::new(r"^\d{4}/\d{2}/\d{2}$", Layout::Date("%Y/%m/%d")),
        // DD-MM-YYYY
        Candidate::new(r"^\d{2}-\d{2}-\d{4}$", Layout::Date("%d-%m-%Y")),
        // DD/MM/YYYY
        Candidate::new(r"^\d{2}/\d{2}/\d{4}$", Layout::Date("%d/%m/%Y")),
        // M/D/YYYY without leading zeros
        Candidate::new(r"^\d{1,2}/\d{1,2}/\d{4}$", Layout::Date("%m/%d/%Y")),
        // MM-DD-YYYY (US)
        Candidate::new(r"^\d{2}-\d{2}-\d{4}$", Layout::Date("%m-%d-%Y")),
        // MM/DD/YYYY (US)
        Candidate::new(r"^\d{2}/\d{2}/\d{4}$", Layout::Date("%m/%d/%Y")),
        // with time
        Candidate::new(
            r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$",
            Layout::DateTime("%Y-%m-%d %H:%M:%S"),
        ),
        // with time, "/" as separator
        Candidate::new(
            r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}$",
            Layout::DateTime("%Y/%m/%d %H:%M:%S"),
        ),
        // ISO 8601
        Candidate::new(
            r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(Z|[+-]\d{2}:\d{2})$",
            Layout::Rfc3339,
        ),
        // ISO 8601 without timezone
        Candidate::new(
            r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$",
            Layout::DateTime("%Y-%m-%dT%H:%M:%S"),
        ),
        // with time without seconds
        Candidate::new(
            r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$",
            Layout::DateTime("%Y-%m-%d %H:%M"),
        ),
        // with time without seconds, "/" as separator
        Candidate::new(
            r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}$",
            Layout::DateTime("%Y/%m/%d %H:%M"),
        ),
    ]
});

static DASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("invalid candidate shape"));
static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2}$").expect("invalid candidate shape"));

fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Parse a timestamp cell.
///
/// An explicit `layout` (chrono strftime syntax) is tried first and
/// short-circuits on success. Otherwise: mixed `-`/`/` separators are
/// normalized to `-`; long date+time shapes keep only the date portion;
/// finally the fixed candidate list runs in priority order.
pub fn coerce(value: &str, layout: Option<&str>) -> CoerceResult<NaiveDateTime> {
    if let Some(fmt) = layout {
        if let Some(parsed) = parse_with_layout(value, fmt) {
            return Ok(parsed);
        }
    }

    let mut normalized = value.to_string();
    if normalized.contains('-') && normalized.contains('/') {
        normalized = normalized.replace('/', "-");
    }

    // Date+time shapes collapse to their date: the time component is
    // discarded once the prefix parses as a pure date.
    if normalized.len() > 10 && (normalized.contains('T') || normalized.contains(' ')) {
        let spaced = normalized.replace('T', " ");
        if let Some(prefix) = spaced.split_whitespace().next() {
            if let Some(parsed) = parse_date_prefix(prefix) {
                return Ok(parsed);
            }
        }
    }

    for candidate in CANDIDATES.iter() {
        if let Some(parsed) = candidate.parse(&normalized) {
            return Ok(parsed);
        }
    }

    Err(CoerceError::InvalidDate(value.to_string()))
}

fn parse_date_prefix(prefix: &str) -> Option<NaiveDateTime> {
    for (shape, fmt) in [(&*DASH_DATE, "%Y-%m-%d"), (&*SLASH_DATE, "%Y/%m/%d")] {
        if shape.is_match(prefix) {
            if let Ok(date) = NaiveDate::parse_from_str(prefix, fmt) {
                return Some(at_midnight(date));
            }
        }
    }
    None
}

/// Try an explicit layout as datetime, date-only, then offset-aware.
fn parse_with_layout(value: &str, fmt: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, fmt) {
        return Some(parsed);
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
        return Some(at_midnight(parsed));
    }
    if let Ok(parsed) = DateTime::parse_from_str(value, fmt) {
        return Some(parsed.naive_local());
    }
    None
}
