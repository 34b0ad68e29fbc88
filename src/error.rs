//! Unified error types for actchat.
//!
//! This module provides a single [`ActChatError`] enum that covers all error
//! cases in the library.
//!
//! # Error Categories
//!
//! - **Per-file fatal**: [`ActChatError::Parse`] and [`ActChatError::Io`] abort
//!   the file being processed. The file handler logs them and moves on.
//! - **Configuration fatal**: [`ActChatError::UnknownDataCenter`],
//!   [`ActChatError::UnknownServer`], [`ActChatError::UnknownGroup`] and the
//!   TOML errors are raised before any file is touched.
//!
//! Lines that are simply not chat records are never errors; the reader drops
//! them silently.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for actchat operations.
///
/// # Example
///
/// ```rust
/// use actchat::error::Result;
/// use actchat::ChatRecord;
///
/// fn my_function() -> Result<Vec<ChatRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ActChatError>;

/// The error type for all actchat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ActChatError {
    /// An I/O error occurred while reading a log or writing its output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An eligible chat line could not be parsed.
    ///
    /// This signals a corrupted log rather than a non-chat record, so the
    /// whole file is abandoned.
    #[error("Failed to parse line {line}{}: {source}", path.as_ref().map(|p| format!(" of {}", p.display())).unwrap_or_default())]
    Parse {
        /// 1-based line number in the source log
        line: usize,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The configuration is inconsistent.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Description of what's wrong
        message: String,
    },

    /// The requested data center is not part of the universe.
    #[error("Unknown data center '{name}'. Expected one of: {known}")]
    UnknownDataCenter {
        /// The name that was requested
        name: String,
        /// Comma-separated list of known data centers
        known: String,
    },

    /// The home server is not part of the selected data center.
    #[error("Unknown server '{server}' for data center {data_center}")]
    UnknownServer {
        /// The server that was requested
        server: String,
        /// The data center it was looked up in
        data_center: String,
    },

    /// The requested group is not configured.
    #[error("Unknown group '{name}'. Expected one of: {known}")]
    UnknownGroup {
        /// The short name that was requested
        name: String,
        /// Comma-separated list of configured short names
        known: String,
    },

    /// A TOML configuration file could not be decoded.
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// The configuration could not be encoded as TOML.
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// The timestamp field does not match the ACT format.
    #[error("invalid timestamp '{input}': {source}")]
    Timestamp {
        /// The raw timestamp field
        input: String,
        /// The underlying chrono error
        #[source]
        source: chrono::ParseError,
    },

    /// The seconds carry more fractional digits than a nanosecond can hold.
    #[error("invalid timestamp '{input}': {digits} fractional digits, at most 9 allowed")]
    Fraction {
        /// The raw timestamp field
        input: String,
        /// Number of fractional digits found
        digits: usize,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ActChatError {
    /// Wraps a parse error kind for the given line.
    pub fn parse(line: usize, source: ParseErrorKind) -> Self {
        ActChatError::Parse {
            line,
            source,
            path: None,
        }
    }

    /// Creates a timestamp parse error for the given line.
    pub fn invalid_timestamp(
        line: usize,
        input: impl Into<String>,
        source: chrono::ParseError,
    ) -> Self {
        ActChatError::Parse {
            line,
            source: ParseErrorKind::Timestamp {
                input: input.into(),
                source,
            },
            path: None,
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ActChatError::Config {
            message: message.into(),
        }
    }

    /// Creates an unknown data center error.
    pub fn unknown_data_center<S: AsRef<str>>(name: impl Into<String>, known: &[S]) -> Self {
        ActChatError::UnknownDataCenter {
            name: name.into(),
            known: join(known),
        }
    }

    /// Creates an unknown group error.
    pub fn unknown_group<S: AsRef<str>>(name: impl Into<String>, known: &[S]) -> Self {
        ActChatError::UnknownGroup {
            name: name.into(),
            known: join(known),
        }
    }

    /// Attaches the source file path to a parse error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            ActChatError::Parse { line, source, .. } => ActChatError::Parse {
                line,
                source,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ActChatError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ActChatError::Parse { .. })
    }

    /// Returns `true` if this error comes from configuration rather than a log file.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ActChatError::Config { .. }
                | ActChatError::UnknownDataCenter { .. }
                | ActChatError::UnknownServer { .. }
                | ActChatError::UnknownGroup { .. }
                | ActChatError::TomlDe(_)
                | ActChatError::TomlSer(_)
        )
    }
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}
