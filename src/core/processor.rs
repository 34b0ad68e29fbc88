//! Reader plus writer for a single log stream.

use std::io::{BufRead, Write};

use chrono::{DateTime, FixedOffset, Local};
use tracing::info;

use super::filter::FilterOptions;
use super::output::write_chats;
use super::reader::LogReader;
use crate::error::Result;
use crate::record::ChatRecord;

/// Statistics about one processed log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Every line of the input
    pub lines_read: usize,
    /// Lines with the `00` chat record type
    pub chat_lines: usize,
    /// Records written to the output
    pub retained: usize,
}

impl ProcessingStats {
    /// Share of chat lines that were retained, in percent.
    pub fn retention_ratio(&self) -> f64 {
        if self.chat_lines == 0 {
            return 0.0;
        }
        self.retained as f64 / self.chat_lines as f64 * 100.0
    }
}

/// Parses an ACT log, keeps the requested lines and writes them out.
///
/// # Example
///
/// ```rust
/// use actchat::core::filter::FilterOptions;
/// use actchat::core::processor::LogProcessor;
/// use chrono::DateTime;
///
/// # fn main() -> actchat::Result<()> {
/// let log = "00|2022-06-04T12:14:33.0000000-07:00|001E|Shooty McShootFace|Yellin' stuff|e6ac4f\n";
/// let now = DateTime::parse_from_rfc3339("2022-06-05T08:00:00-07:00").unwrap();
///
/// let options = FilterOptions::new();
/// let processor = LogProcessor::new(&options);
/// let mut out = Vec::new();
/// let stats = processor.process_at("Network.log", log.as_bytes(), &mut out, now)?;
///
/// assert_eq!(stats.retained, 1);
/// assert!(String::from_utf8_lossy(&out).ends_with("C Shooty McShootFace: Yellin' stuff\n"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogProcessor<'a> {
    options: &'a FilterOptions,
}

impl<'a> LogProcessor<'a> {
    pub fn new(options: &'a FilterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FilterOptions {
        self.options
    }

    /// Processes `input` into `output`, stamping the header with the current
    /// local time.
    ///
    /// # Errors
    ///
    /// Returns the first read, parse or write error. Nothing is written to
    /// `output` when reading fails.
    pub fn process<R: BufRead, W: Write>(
        &self,
        name: &str,
        input: R,
        output: &mut W,
    ) -> Result<ProcessingStats> {
        self.process_at(name, input, output, Local::now().fixed_offset())
    }

    /// Like [`process`](Self::process) with an explicit header timestamp.
    pub fn process_at<R: BufRead, W: Write>(
        &self,
        name: &str,
        input: R,
        output: &mut W,
        now: DateTime<FixedOffset>,
    ) -> Result<ProcessingStats> {
        let mut reader = LogReader::new(self.options, input);
        let records = reader.by_ref().collect::<Result<Vec<ChatRecord>>>()?;

        let stats = ProcessingStats {
            lines_read: reader.lines_read(),
            chat_lines: reader.chat_lines(),
            retained: records.len(),
        };
        if records.is_empty() {
            info!("{name} is empty");
        }

        write_chats(output, &records, now)?;
        Ok(stats)
    }
}
