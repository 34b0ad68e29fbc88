//! Core processing logic for actchat.
//!
//! This module contains the per-line pipeline and its writer:
//! - [`parser`] - Splitting ACT lines and parsing timestamps
//! - [`normalize`] - Removing world suffixes and private use glyphs
//! - [`code`] - Chat type codes and the category classifier
//! - [`filter`] - Speaker groups and the retention filter
//! - [`reader`] - Log stream to retained records
//! - [`output`] - Aligned text writer
//! - [`processor`] - Reader and writer for one stream, with statistics
//!
//! # Quick Start
//!
//! ```rust
//! use actchat::core::{FilterOptions, Group, read_log, to_text};
//! use chrono::DateTime;
//!
//! # fn main() -> actchat::Result<()> {
//! let log = "00|2022-06-04T12:14:33.0000000-07:00|000A|Shooty McShootFaceGoblin|Hi|e6ac4f\n";
//! let options = FilterOptions::new()
//!     .with_worlds(["Goblin"])
//!     .with_group(Group::named("Me", None, ["Shooty McShootFace"]));
//!
//! let records = read_log(&options, log.as_bytes())?;
//! let now = DateTime::parse_from_rfc3339("2022-06-05T08:00:00-07:00").unwrap();
//! assert!(to_text(&records, now).ends_with("C Shooty McShootFace: Hi\n"));
//! # Ok(())
//! # }
//! ```

pub mod code;
pub mod filter;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod processor;
pub mod reader;

// Re-export main types for convenience
pub use code::{ChatCode, classify};
pub use filter::{FilterOptions, Group, apply_filters};
pub use output::{to_text, write_chats};
pub use processor::{LogProcessor, ProcessingStats};
pub use reader::{LogReader, read_log};
