//! File handler: resolves path arguments and processes each log file.
//!
//! Every argument is one of:
//!
//! - a regular file, processed directly
//! - a directory, whose `*.log` files are processed in name order
//! - a glob pattern on the last path component (`logs/Network_2022*.log`),
//!   matched against the parent directory (requires the `glob` feature)
//!
//! Each log is written next to its input as `<stem>.<group>.txt`, where
//! `<group>` is the short name of the selected group. An existing output is
//! never overwritten unless [`FilterOptions::force_replace`] is set.
//!
//! Problems with one file never stop the batch: missing inputs and existing
//! outputs are skipped with a warning, parse and I/O errors are logged and the
//! next file is processed.
//!
//! # Example
//!
//! ```rust,no_run
//! use actchat::core::filter::FilterOptions;
//! use actchat::files::FileHandler;
//! use std::path::PathBuf;
//!
//! let options = FilterOptions::new();
//! let mut handler = FileHandler::new(&options);
//! let stats = handler.process_paths(&[PathBuf::from("Network_26502_20220604.log")]);
//! println!("{} processed, {} skipped", stats.processed, stats.skipped);
//! ```

use std::fs;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::core::filter::FilterOptions;
use crate::core::processor::{LogProcessor, ProcessingStats};
use crate::error::{ActChatError, Result};

/// Extension of the logs picked up from a directory argument.
pub const LOG_EXTENSION: &str = "log";

/// Extension of the written output.
pub const OUTPUT_EXTENSION: &str = "txt";

/// Returns where the output for `input` is written.
///
/// ```
/// use actchat::files::output_path_for;
/// use std::path::Path;
///
/// let out = output_path_for(Path::new("/logs/Network_26502.log"), "fc");
/// assert_eq!(out, Path::new("/logs/Network_26502.fc.txt"));
/// ```
pub fn output_path_for(input: &Path, group_short_name: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}.{group_short_name}.{OUTPUT_EXTENSION}"))
}

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The log was read and its output written.
    Processed {
        input: PathBuf,
        output: PathBuf,
        stats: ProcessingStats,
    },
    /// The input does not exist.
    SkippedMissing(PathBuf),
    /// The input exists but is not a regular file.
    SkippedNotAFile(PathBuf),
    /// The output exists and replacing was not requested.
    SkippedOutputExists { input: PathBuf, output: PathBuf },
    /// Reading or writing failed.
    Failed { input: PathBuf, error: ActChatError },
}

impl FileOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, FileOutcome::Processed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            FileOutcome::SkippedMissing(_)
                | FileOutcome::SkippedNotAFile(_)
                | FileOutcome::SkippedOutputExists { .. }
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Totals over a batch of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerStats {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Records written over all processed files
    pub retained: usize,
}

impl HandlerStats {
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Processed { stats, .. } => {
                self.processed += 1;
                self.retained += stats.retained;
            }
            FileOutcome::Failed { .. } => self.failed += 1,
            _ => self.skipped += 1,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }
}

/// Processes log files one at a time with shared options.
///
/// In dry run mode results go to the sink (stdout by default) instead of
/// output files. The existence check on the output still applies.
pub struct FileHandler<'a, W: Write = io::Stdout> {
    options: &'a FilterOptions,
    sink: W,
}

impl<'a> FileHandler<'a, io::Stdout> {
    pub fn new(options: &'a FilterOptions) -> Self {
        Self::with_sink(options, io::stdout())
    }
}

impl<'a, W: Write> FileHandler<'a, W> {
    /// Creates a handler whose dry run output goes to `sink`.
    pub fn with_sink(options: &'a FilterOptions, sink: W) -> Self {
        Self { options, sink }
    }

    pub fn options(&self) -> &FilterOptions {
        self.options
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Expands and processes every path argument, in order.
    pub fn process_paths(&mut self, paths: &[PathBuf]) -> HandlerStats {
        let mut stats = HandlerStats::default();
        for outcome in self.process_all(paths) {
            stats.record(&outcome);
        }
        stats
    }

    /// Like [`process_paths`](Self::process_paths), returning every outcome.
    pub fn process_all(&mut self, paths: &[PathBuf]) -> Vec<FileOutcome> {
        let files: Vec<PathBuf> = paths.iter().flat_map(|path| expand_path(path)).collect();
        if files.is_empty() {
            warn!("No files to process");
        }
        files.iter().map(|file| self.process_file(file)).collect()
    }

    /// Processes a single log file.
    pub fn process_file(&mut self, input: &Path) -> FileOutcome {
        if !input.exists() {
            warn!("Input file {} does not exist", input.display());
            return FileOutcome::SkippedMissing(input.to_path_buf());
        }
        if !input.is_file() {
            warn!("Input name {} is not a file", input.display());
            return FileOutcome::SkippedNotAFile(input.to_path_buf());
        }

        let output = output_path_for(input, &self.options.group.short_name());
        if output.exists() && !self.options.force_replace {
            warn!("Target file exists, skipping: '{}'", output.display());
            return FileOutcome::SkippedOutputExists {
                input: input.to_path_buf(),
                output,
            };
        }

        info!("Processing {}", input.display());
        match self.run(input, &output) {
            Ok(stats) => FileOutcome::Processed {
                input: input.to_path_buf(),
                output,
                stats,
            },
            Err(e) => {
                let e = e.with_path(input);
                error!("{e}");
                FileOutcome::Failed {
                    input: input.to_path_buf(),
                    error: e,
                }
            }
        }
    }

    /// Reads the whole log before touching the output, so a corrupt log
    /// leaves no partial file behind.
    fn run(&mut self, input: &Path, output: &Path) -> Result<ProcessingStats> {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let reader = BufReader::new(fs::File::open(input)?);

        let mut buffer = Vec::new();
        let stats = LogProcessor::new(self.options).process(&name, reader, &mut buffer)?;

        if self.options.dry_run {
            self.sink.write_all(&buffer)?;
            self.sink.flush()?;
        } else {
            fs::write(output, &buffer)?;
        }
        Ok(stats)
    }
}

/// Turns one path argument into the files it names.
///
/// A path that does not exist and contains no glob characters is returned
/// as is, so the caller reports it as missing.
pub fn expand_path(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    if path.is_dir() {
        info!("Processing all log files in {}", path.display());
        return list_logs(path);
    }
    if !is_glob(path) {
        return vec![path.to_path_buf()];
    }
    let matches = expand_glob(path);
    if matches.is_empty() {
        warn!("No files match {}", path.display());
    }
    matches
}

/// Lists the `*.log` files of a directory, sorted by name.
fn list_logs(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .filter(|p| p.extension().is_some_and(|ext| ext == LOG_EXTENSION))
            .collect(),
        Err(e) => {
            error!("Cannot read directory {}: {e}", dir.display());
            Vec::new()
        }
    };
    files.sort();
    files
}

fn is_glob(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().contains(['*', '?', '[']))
}

#[cfg(feature = "glob")]
fn expand_glob(path: &Path) -> Vec<PathBuf> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let Some(pattern) = path.file_name().map(|n| n.to_string_lossy()) else {
        return Vec::new();
    };
    let Some(regex) = glob::to_regex(&pattern) else {
        warn!("Invalid pattern {}", path.display());
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = match fs::read_dir(parent) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| regex.is_match(&entry.file_name().to_string_lossy()))
            .map(|entry| entry.path())
            .filter(|p| p.is_file())
            .collect(),
        Err(e) => {
            warn!("Cannot read directory {}: {e}", parent.display());
            Vec::new()
        }
    };
    files.sort();
    files
}

#[cfg(not(feature = "glob"))]
fn expand_glob(path: &Path) -> Vec<PathBuf> {
    warn!(
        "Pattern {} ignored, glob support is not enabled",
        path.display()
    );
    Vec::new()
}

/// Shell-style file name patterns.
#[cfg(feature = "glob")]
pub mod glob {
    use regex::Regex;

    /// Translates a file name pattern to an anchored regex.
    ///
    /// Supports `*`, `?` and `[...]` classes (`[!...]` negates). An
    /// unterminated `[` matches itself.
    ///
    /// ```
    /// use actchat::files::glob::to_regex;
    ///
    /// let re = to_regex("Network_2022*.log").unwrap();
    /// assert!(re.is_match("Network_20220604.log"));
    /// assert!(!re.is_match("Network_20220604.log.bak"));
    /// ```
    pub fn to_regex(pattern: &str) -> Option<Regex> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut re = String::from("^");
        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                '*' => re.push_str(".*"),
                '?' => re.push('.'),
                '[' => match class_at(&chars[i + 1..]) {
                    Some((negate, members, len)) => {
                        re.push('[');
                        if negate {
                            re.push('^');
                        }
                        for &c in members {
                            if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
                                re.push('\\');
                            }
                            re.push(c);
                        }
                        re.push(']');
                        i += len + 1;
                    }
                    None => re.push_str(r"\["),
                },
                c => re.push_str(&regex::escape(&c.to_string())),
            }
            i += 1;
        }
        re.push('$');
        Regex::new(&re).ok()
    }

    /// Splits the class that follows a `[` into its negation flag, members
    /// and length up to the closing `]`. `None` when the class is unterminated
    /// or has no members (`[]`, `[!]`), which then match literally.
    fn class_at(rest: &[char]) -> Option<(bool, &[char], usize)> {
        let len = rest.iter().position(|&c| c == ']')?;
        let (negate, members) = match &rest[..len] {
            ['!', members @ ..] => (true, members),
            members => (false, members),
        };
        (!members.is_empty()).then_some((negate, members, len))
    }

}
