//! Log reader: turns an ACT log stream into retained chat records.
//!
//! The reader composes the line splitter, both normalizers, the classifier and
//! the filter. It reads the stream forward once, line by line, and yields the
//! retained records in source order.
//!
//! # Example
//!
//! ```rust
//! use actchat::core::filter::FilterOptions;
//! use actchat::core::reader::read_log;
//!
//! # fn main() -> actchat::Result<()> {
//! let log = "\
//! 00|2022-06-04T12:14:33.0000000-07:00|001E|Shooty McShootFace|Yellin' stuff|e6ac4f
//! 03|2022-06-04T12:14:34.0000000-07:00|10FF1234|Shooty McShootFace|...
//! 00|2022-06-04T12:14:35.0000000-07:00|0039||You sense something.|e6ac50
//! ";
//!
//! let records = read_log(&FilterOptions::new(), log.as_bytes())?;
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].line_number(), 1);
//! # Ok(())
//! # }
//! ```

use std::io::BufRead;

use tracing::trace;

use super::code::classify;
use super::filter::FilterOptions;
use super::normalize::{normalize_message, normalize_name, short_name_for};
use super::parser::{RawLine, parse_timestamp, split_line};
use crate::error::{ActChatError, Result};
use crate::record::ChatRecord;

/// Iterator over the retained records of one log stream.
///
/// Yields `Err` once for an I/O failure or a chat line with a malformed
/// timestamp, and then stops.
pub struct LogReader<'a, R: BufRead> {
    reader: R,
    options: &'a FilterOptions,
    buffer: Vec<u8>,
    lines_read: usize,
    chat_lines: usize,
    finished: bool,
}

impl<'a, R: BufRead> LogReader<'a, R> {
    pub fn new(options: &'a FilterOptions, reader: R) -> Self {
        Self {
            reader,
            options,
            buffer: Vec::with_capacity(256),
            lines_read: 0,
            chat_lines: 0,
            finished: false,
        }
    }

    /// Number of lines consumed so far, chat or not.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Number of `00` lines seen so far, retained or not.
    pub fn chat_lines(&self) -> usize {
        self.chat_lines
    }

    /// Reads the next line into the buffer, without its line terminator.
    ///
    /// Returns `Ok(false)` at end of stream.
    fn next_line(&mut self) -> Result<bool> {
        self.buffer.clear();
        let bytes = self.reader.read_until(b'\n', &mut self.buffer)?;
        if bytes == 0 {
            return Ok(false);
        }
        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
        }
        if self.buffer.last() == Some(&b'\r') {
            self.buffer.pop();
        }
        self.lines_read += 1;
        Ok(true)
    }
}

impl<R: BufRead> Iterator for LogReader<'_, R> {
    type Item = Result<ChatRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.next_line() {
                Ok(true) => {}
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }

            let line = String::from_utf8_lossy(&self.buffer);
            let Some(raw) = split_line(&line) else {
                continue;
            };
            self.chat_lines += 1;

            match build_record(self.options, self.lines_read, &raw) {
                Ok(record) if self.options.retains(&record) => return Some(Ok(record)),
                Ok(record) => {
                    trace!(line = record.line_number(), "dropped {}", record.category());
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// Builds a record from the fields of one chat line.
///
/// Every `00` line goes through here whether or not it is retained, so a
/// malformed timestamp anywhere in the log aborts it.
///
/// # Errors
///
/// Returns [`ActChatError::Parse`] if the timestamp is malformed.
pub fn build_record(
    options: &FilterOptions,
    line_number: usize,
    raw: &RawLine<'_>,
) -> Result<ChatRecord> {
    let timestamp = parse_timestamp(raw.timestamp)
        .map_err(|kind| ActChatError::parse(line_number, kind))?;
    let name = normalize_name(raw.name, &options.world_names);
    let message = normalize_message(raw.message, &name, &options.world_names);
    let category = classify(raw.code, &name);
    let short_name = short_name_for(&name, &options.renames);
    Ok(ChatRecord::new(line_number, name, category, message, timestamp).with_short_name(short_name))
}

/// Reads every retained record from a log stream.
///
/// # Errors
///
/// Stops at and returns the first I/O or parse error.
pub fn read_log<R: BufRead>(options: &FilterOptions, reader: R) -> Result<Vec<ChatRecord>> {
    LogReader::new(options, reader).collect()
}
