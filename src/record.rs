//! The retained chat line type.
//!
//! This module provides [`ChatRecord`], the normalized representation of one
//! chat or emote line from an ACT log, and [`Category`], the coarse kind of
//! the line.
//!
//! # Examples
//!
//! ```
//! use actchat::{Category, ChatRecord};
//! use chrono::DateTime;
//!
//! let ts = DateTime::parse_from_rfc3339("2022-06-04T12:14:33-07:00").unwrap();
//! let record = ChatRecord::new(1, "Shooty McShootFace", Category::Chat, "Yellin' stuff", ts)
//!     .with_short_name("Shooty");
//!
//! assert_eq!(record.short_name(), "Shooty");
//! assert_eq!(record.category().code(), "C");
//! ```

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// The coarse kind of a log line.
///
/// Only [`Chat`](Category::Chat) and [`Emote`](Category::Emote) lines can be
/// retained; everything else (system messages, NPC dialogue, unknown codes)
/// is [`Other`](Category::Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Player chat on any channel
    Chat,
    /// Standard or custom emote
    Emote,
    /// Anything else
    Other,
}

impl Category {
    /// Returns the one-letter code used in the output column.
    ///
    /// ```
    /// use actchat::Category;
    ///
    /// assert_eq!(Category::Chat.code(), "C");
    /// assert_eq!(Category::Emote.code(), "E");
    /// assert_eq!(Category::Other.code(), "?");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            Category::Chat => "C",
            Category::Emote => "E",
            Category::Other => "?",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Chat => write!(f, "Chat"),
            Category::Emote => write!(f, "Emote"),
            Category::Other => write!(f, "Other"),
        }
    }
}

/// One chat line extracted from an ACT log.
///
/// Records are created by the log reader and never mutated afterwards.
///
/// | Field | Description |
/// |-------|-------------|
/// | `line_number` | 1-based line in the source log, counted over all lines |
/// | `name` | Speaker with world suffix and private-use glyphs removed |
/// | `short_name` | `name` after the rename table, else `name` |
/// | `category` | Chat, emote, or other |
/// | `message` | Message body with embedded worlds and name echo removed |
/// | `timestamp` | Log timestamp, keeping its original offset |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub(crate) line_number: usize,
    pub(crate) name: String,
    pub(crate) short_name: String,
    pub(crate) category: Category,
    pub(crate) message: String,
    pub(crate) timestamp: DateTime<FixedOffset>,
}

impl ChatRecord {
    /// Creates a record whose short name equals its name.
    pub fn new(
        line_number: usize,
        name: impl Into<String>,
        category: Category,
        message: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        let name = name.into();
        Self {
            line_number,
            short_name: name.clone(),
            name,
            category,
            message: message.into(),
            timestamp,
        }
    }

    /// Builder-style method to set the display name.
    ///
    /// An empty short name is ignored so a named record always has something
    /// to display.
    #[must_use]
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        let short_name = short_name.into();
        if !short_name.is_empty() {
            self.short_name = short_name;
        }
        self
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }
}
