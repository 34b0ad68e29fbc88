//! Aligned plain text writer.

use std::io::Write;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use tracing::debug;

use crate::record::ChatRecord;

/// Line written after the header when nothing was retained.
pub const NO_MATCHES: &str = "# No lines matched the criteria";

/// Timestamp column format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the header and one aligned line per record.
///
/// # Format
/// - Header: `# Created at <now, RFC 3339>`
/// - Empty input: the header, then [`NO_MATCHES`]
/// - Otherwise: `<yyyy-mm-dd HH:MM:SS> <C|E|?> <short name>: <message>`, with
///   the short name left-justified to the widest short name in `records`
///
/// The output depends only on `records` and `now`.
pub fn write_chats<W: Write>(
    out: &mut W,
    records: &[ChatRecord],
    now: DateTime<FixedOffset>,
) -> std::io::Result<()> {
    writeln!(out, "# Created at {}", now.to_rfc3339_opts(SecondsFormat::AutoSi, false))?;
    if records.is_empty() {
        writeln!(out, "{NO_MATCHES}")?;
        return out.flush();
    }

    let width = name_width(records);
    for record in records {
        let line = format_record(record, width);
        debug!("{line}");
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Renders [`write_chats`] output into a string.
pub fn to_text(records: &[ChatRecord], now: DateTime<FixedOffset>) -> String {
    let mut buffer = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = write_chats(&mut buffer, records, now);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Formats one record without a line terminator.
///
/// The short name is padded with spaces to `width` characters, and cut to
/// `width` if it is longer.
pub fn format_record(record: &ChatRecord, width: usize) -> String {
    format!(
        "{} {} {:<width$.width$}: {}",
        record.timestamp().format(TIMESTAMP_FORMAT),
        record.category().code(),
        record.short_name(),
        record.message(),
    )
}

/// Returns the widest short name, in characters.
pub fn name_width(records: &[ChatRecord]) -> usize {
    records
        .iter()
        .map(|r| r.short_name().chars().count())
        .max()
        .unwrap_or(0)
}
