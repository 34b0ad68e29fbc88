//! Output writers.
//!
//! This module provides the aligned text format written for every processed
//! log:
//! - [`write_chats`] / [`to_text`] - header plus one aligned line per record
//!
//! # Example
//!
//! ```rust
//! use actchat::core::output::to_text;
//! use actchat::{Category, ChatRecord};
//! use chrono::DateTime;
//!
//! let now = DateTime::parse_from_rfc3339("2022-06-05T08:00:00-07:00").unwrap();
//! let ts = DateTime::parse_from_rfc3339("2022-06-04T12:14:33-07:00").unwrap();
//! let records = vec![
//!     ChatRecord::new(1, "Shooty McShootFace", Category::Chat, "Yellin' stuff", ts)
//!         .with_short_name("Shooty"),
//!     ChatRecord::new(4, "Wilburforce Glamtree", Category::Emote, "waves.", ts),
//! ];
//!
//! let text = to_text(&records, now);
//! assert!(text.contains("2022-06-04 12:14:33 C Shooty              : Yellin' stuff\n"));
//! assert!(text.contains("2022-06-04 12:14:33 E Wilburforce Glamtree: waves.\n"));
//! ```

mod text_writer;

pub use text_writer::{
    NO_MATCHES, TIMESTAMP_FORMAT, format_record, name_width, to_text, write_chats,
};
