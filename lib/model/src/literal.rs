//! Conversion of loosely-typed RDF literals into semantic values.
//!
//! Harvested metadata rarely uses the datatypes that schema.org suggests. All conversions
//! therefore work on the lexical form and report failures through [`LiteralError`] so that the
//! caller can drop the single field instead of the whole record.

use oxrdf::TermRef;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

const DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const LOCAL_DATE_TIME: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const LOCAL_DATE_TIME_FRACTION: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
const LOCAL_DATE_TIME_MINUTES: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");
const SPACED_DATE_TIME: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const SPACED_DATE_TIME_OFFSET: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);

/// An error raised while converting the lexical form of a literal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("'{0}' is not a valid date or date-time")]
    InvalidDateTime(String),
    #[error("'{0}' is not a valid non-negative integer")]
    InvalidInteger(String),
    #[error("'{0}' is not a valid decimal number")]
    InvalidNumber(String),
    #[error("'{0}' is not a valid boolean")]
    InvalidBoolean(String),
}

impl LiteralError {
    /// A stable, machine-readable code used to aggregate warnings.
    pub fn code(&self) -> &'static str {
        match self {
            LiteralError::InvalidDateTime(_) => "invalid_datetime",
            LiteralError::InvalidInteger(_) => "invalid_integer",
            LiteralError::InvalidNumber(_) => "invalid_number",
            LiteralError::InvalidBoolean(_) => "invalid_boolean",
        }
    }
}

/// Returns the trimmed lexical value of a literal, or [`None`] for other terms and blank values.
pub fn literal_to_string(term: TermRef<'_>) -> Option<String> {
    match term {
        TermRef::Literal(literal) => non_blank(literal.value()),
        _ => None,
    }
}

/// Returns the trimmed lexical value of a literal or the IRI of a named node.
pub fn term_to_string(term: TermRef<'_>) -> Option<String> {
    match term {
        TermRef::Literal(literal) => non_blank(literal.value()),
        TermRef::NamedNode(node) => non_blank(node.as_str()),
        _ => None,
    }
}

/// Parses a date or date-time into a UTC timestamp.
///
/// Values without an explicit offset are interpreted as UTC, dates without a time as midnight.
pub fn parse_datetime(value: &str) -> Result<OffsetDateTime, LiteralError> {
    let value = value.trim();
    if let Ok(datetime) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(datetime.to_offset(UtcOffset::UTC));
    }
    if let Ok(datetime) = OffsetDateTime::parse(value, SPACED_DATE_TIME_OFFSET) {
        return Ok(datetime.to_offset(UtcOffset::UTC));
    }
    for format in [
        LOCAL_DATE_TIME,
        LOCAL_DATE_TIME_FRACTION,
        LOCAL_DATE_TIME_MINUTES,
        SPACED_DATE_TIME,
    ] {
        if let Ok(datetime) = PrimitiveDateTime::parse(value, format) {
            return Ok(datetime.assume_utc());
        }
    }
    // xsd:date may carry a trailing UTC marker.
    let date = value.strip_suffix('Z').unwrap_or(value);
    Date::parse(date, DATE)
        .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc())
        .map_err(|_| LiteralError::InvalidDateTime(value.to_owned()))
}

/// Formats a timestamp as RFC 3339.
pub fn format_datetime(datetime: OffsetDateTime) -> String {
    datetime
        .format(&Rfc3339)
        .unwrap_or_else(|_| datetime.unix_timestamp().to_string())
}

/// Parses a non-negative integer such as a capacity.
///
/// Decimal values with a zero fraction (`"40.0"`) are accepted as some exporters emit them.
pub fn parse_count(value: &str) -> Result<u32, LiteralError> {
    let value = value.trim();
    let integral = match value.split_once('.') {
        Some((integral, fraction)) if fraction.chars().all(|c| c == '0') => integral,
        Some(_) => return Err(LiteralError::InvalidInteger(value.to_owned())),
        None => value,
    };
    integral
        .strip_prefix('+')
        .unwrap_or(integral)
        .parse::<u32>()
        .map_err(|_| LiteralError::InvalidInteger(value.to_owned()))
}

/// Parses a decimal number such as a latitude.
pub fn parse_decimal(value: &str) -> Result<f64, LiteralError> {
    let value = value.trim();
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| LiteralError::InvalidNumber(value.to_owned()))
}

/// Parses an `xsd:boolean`, accepting any casing.
pub fn parse_boolean(value: &str) -> Result<bool, LiteralError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(LiteralError::InvalidBoolean(value.trim().to_owned())),
    }
}

/// Splits a comma-separated keyword literal into its trimmed, non-empty parts.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|part| !part.is_empty())
}

/// Normalizes a free-text key: trimmed, lowercased, with internal whitespace collapsed.
pub fn normalize_key(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}
