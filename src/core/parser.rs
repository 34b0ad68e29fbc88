//! ACT log line splitting and timestamp parsing.
//!
//! ACT writes one pipe-delimited record per line. The first field is the
//! record type; chat lines use `00`:
//!
//! ```text
//! 00|2022-06-04T12:14:33.0000000-07:00|001E|Shooty McShootFace|Yellin' stuff|e6ac4fc48a7cd47d
//! ```
//!
//! Every other record type (combat events are `03`, `21`, ...) is dropped
//! here without an error.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::error::ParseErrorKind;

/// Record type prefix of chat lines.
pub const CHAT_RECORD_TYPE: &str = "00";

/// Minimum number of fields for a chat line.
pub const MIN_FIELDS: usize = 5;

/// The raw, still un-normalized fields of a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub timestamp: &'a str,
    pub code: &'a str,
    pub name: &'a str,
    pub message: &'a str,
}

/// Splits a log line into its chat fields.
///
/// Returns `None` for anything that is not a chat line: a different record
/// type, or fewer than [`MIN_FIELDS`] fields. Fields past the message (the
/// line hash) are ignored.
///
/// ```
/// use actchat::core::parser::split_line;
///
/// let raw = split_line("00|2022-06-04T12:14:33.0000000-07:00|001E|Shooty|Hi|e6ac4f").unwrap();
/// assert_eq!(raw.code, "001E");
/// assert_eq!(raw.message, "Hi");
///
/// assert!(split_line("03|2022-06-04T12:14:33.0000000-07:00|10FF1234|Shooty|").is_none());
/// assert!(split_line("00|2022-06-04T12:14:33.0000000-07:00|001E|Shooty").is_none());
/// ```
pub fn split_line(line: &str) -> Option<RawLine<'_>> {
    let mut fields = line.split('|');
    if fields.next()? != CHAT_RECORD_TYPE {
        return None;
    }
    let timestamp = fields.next()?;
    let code = fields.next()?;
    let name = fields.next()?;
    let message = fields.next()?;
    Some(RawLine {
        timestamp,
        code,
        name,
        message,
    })
}

/// Most fractional digits a timestamp may carry.
pub const MAX_FRACTION_DIGITS: usize = 9;

/// Layouts with an explicit offset: full precision first, then minutes only.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];

/// The same layouts for a trailing `Z`, which `%:z` does not accept.
const UTC_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ACT timestamp.
///
/// The format is an ISO-8601 local date-time with a `T` separator, 0 to 9
/// fractional digits and a mandatory offset (`Z` or `±HH:MM`), e.g.
/// `2022-06-04T12:17:32.0000000-07:00`. Seconds may be omitted. The original
/// offset is kept.
///
/// ```
/// use actchat::core::parser::parse_timestamp;
///
/// assert!(parse_timestamp("2022-06-04T12:17:32.0000000-07:00").is_ok());
/// assert!(parse_timestamp("2022-06-04 12:17:32.0000000-07:00").is_err());
/// assert!(parse_timestamp("2022-06-04T12:17:32.0000000000-07:00").is_err());
/// ```
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, ParseErrorKind> {
    let digits = fraction_digits(raw);
    if digits > MAX_FRACTION_DIGITS {
        return Err(ParseErrorKind::Fraction {
            input: raw.to_string(),
            digits,
        });
    }

    let parsed = match raw.strip_suffix('Z') {
        Some(utc) => parse_with(utc, UTC_FORMATS, |s, fmt| {
            NaiveDateTime::parse_from_str(s, fmt).map(|naive| naive.and_utc().fixed_offset())
        }),
        None => parse_with(raw, OFFSET_FORMATS, DateTime::parse_from_str),
    };
    parsed.map_err(|source| ParseErrorKind::Timestamp {
        input: raw.to_string(),
        source,
    })
}

/// Tries the full layout, then the minute layout. Reports the first error.
fn parse_with<F>(
    raw: &str,
    [full, minutes]: [&str; 2],
    parse: F,
) -> Result<DateTime<FixedOffset>, chrono::ParseError>
where
    F: Fn(&str, &str) -> Result<DateTime<FixedOffset>, chrono::ParseError>,
{
    parse(raw, full).or_else(|err| parse(raw, minutes).map_err(|_| err))
}

/// Counts the digits after the decimal point of the seconds field.
fn fraction_digits(raw: &str) -> usize {
    raw.split_once('.')
        .map(|(_, rest)| rest.bytes().take_while(u8::is_ascii_digit).count())
        .unwrap_or(0)
}
