//! # actchat
//!
//! A Rust library for extracting Final Fantasy XIV chat from Advanced Combat
//! Tracker (ACT) network logs into readable transcripts.
//!
//! ## Overview
//!
//! ACT writes every network event the game client sees into a pipe-delimited
//! log. Chat and emotes are a small fraction of those lines, and the names in
//! them carry game glyphs and home world suffixes. actchat:
//!
//! - keeps only chat (and optionally emote) lines, optionally only from the
//!   members of a configured group
//! - strips world suffixes and private use glyphs from names and messages
//! - applies a rename table for display names
//! - writes an aligned, timestamped text transcript next to each log
//!
//! ## Quick Start
//!
//! ```rust
//! use actchat::prelude::*;
//! use chrono::DateTime;
//!
//! fn main() -> Result<()> {
//!     let universe = Universe::builtin()?;
//!     let config = ParseConfiguration::default();
//!     config.validate(&universe)?;
//!     let options = config.as_options(&universe, Group::Everyone)?;
//!
//!     let log = "00|2022-06-04T12:14:33.0000000-07:00|001E|Shooty McShootFaceGoblin|Yellin' stuff|e6ac4f\n";
//!     let records = read_log(&options, log.as_bytes())?;
//!     assert_eq!(records[0].name(), "Shooty McShootFace");
//!
//!     let now = DateTime::parse_from_rfc3339("2022-06-05T08:00:00-07:00").unwrap();
//!     let text = to_text(&records, now);
//!     assert!(text.ends_with("2022-06-04 12:14:33 C Shooty McShootFace: Yellin' stuff\n"));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`record`] - [`ChatRecord`] and [`Category`]
//! - [`core`] - The per-line pipeline
//!   - [`core::parser`] - line splitting and timestamps
//!   - [`core::normalize`] - name and message cleanup
//!   - [`core::code`] - chat codes and [`classify`](core::code::classify)
//!   - [`core::filter`] - [`Group`](core::filter::Group), [`FilterOptions`](core::filter::FilterOptions)
//!   - [`core::reader`] - [`LogReader`](core::reader::LogReader), [`read_log`](core::reader::read_log)
//!   - [`core::output`] - [`write_chats`](core::output::write_chats), [`to_text`](core::output::to_text)
//!   - [`core::processor`] - [`LogProcessor`](core::processor::LogProcessor)
//! - [`config`] - data centers and `.actchat.toml`
//! - [`files`] - [`FileHandler`](files::FileHandler) for paths, directories and patterns
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - Unified error types ([`ActChatError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod files;
pub mod record;

// Re-export the main types at the crate root for convenience
pub use error::{ActChatError, Result};
pub use record::{Category, ChatRecord};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use actchat::prelude::*;
/// ```
pub mod prelude {
    // Record types
    pub use crate::record::{Category, ChatRecord};

    // Error types
    pub use crate::error::{ActChatError, Result};

    // Configuration
    pub use crate::config::{DataCenter, ParseConfiguration, Universe};

    // Filtering
    pub use crate::core::filter::{FilterOptions, Group, apply_filters};

    // Reading and writing
    pub use crate::core::output::{to_text, write_chats};
    pub use crate::core::processor::{LogProcessor, ProcessingStats};
    pub use crate::core::reader::{LogReader, read_log};

    // Files
    pub use crate::files::{FileHandler, FileOutcome, HandlerStats};
}
