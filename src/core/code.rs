//! FFXIV chat type codes and the category classifier.
//!
//! Field 2 of an ACT `00` line is a four hex digit code naming the chat
//! channel. Only player channels are listed here; system messages, NPC
//! dialogue, teleport notices and the like all fall through to
//! [`ChatCode::Other`].

use crate::record::Category;

/// Known chat channel codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatCode {
    Say,
    Yell,
    Shout,
    /// A tell to another player
    TellTo,
    /// A tell from another player
    TellFrom,
    FreeCompany,
    Party,
    Alliance,
    /// Cross-world linkshell 1-8
    CrossWorldLinkshell(u8),
    /// Linkshell 1-8
    Linkshell(u8),
    Emote,
    EmoteCustom,
    Other,
}

/// Code table, in the order the channels appear in the game's chat settings.
const CODES: &[(&str, ChatCode)] = &[
    ("000A", ChatCode::Say),
    ("001E", ChatCode::Yell),
    ("000B", ChatCode::Shout),
    ("000C", ChatCode::TellTo),
    ("000D", ChatCode::TellFrom),
    ("0018", ChatCode::FreeCompany),
    ("000E", ChatCode::Party),
    ("000F", ChatCode::Alliance),
    ("0025", ChatCode::CrossWorldLinkshell(1)),
    ("0065", ChatCode::CrossWorldLinkshell(2)),
    ("0066", ChatCode::CrossWorldLinkshell(3)),
    ("0067", ChatCode::CrossWorldLinkshell(4)),
    ("0068", ChatCode::CrossWorldLinkshell(5)),
    ("0069", ChatCode::CrossWorldLinkshell(6)),
    ("006A", ChatCode::CrossWorldLinkshell(7)),
    ("006B", ChatCode::CrossWorldLinkshell(8)),
    ("0010", ChatCode::Linkshell(1)),
    ("0011", ChatCode::Linkshell(2)),
    ("0012", ChatCode::Linkshell(3)),
    ("0013", ChatCode::Linkshell(4)),
    ("0014", ChatCode::Linkshell(5)),
    ("0015", ChatCode::Linkshell(6)),
    ("0016", ChatCode::Linkshell(7)),
    ("0017", ChatCode::Linkshell(8)),
    ("001D", ChatCode::Emote),
    ("001C", ChatCode::EmoteCustom),
];

impl ChatCode {
    /// Looks up a raw code. Unknown codes map to [`ChatCode::Other`].
    ///
    /// Matching is exact: ACT always writes upper-case hex.
    pub fn from_code(code: &str) -> Self {
        CODES
            .iter()
            .find(|(raw, _)| *raw == code)
            .map(|(_, chat_code)| *chat_code)
            .unwrap_or(ChatCode::Other)
    }

    /// Returns the raw code for this channel, `"????"` for [`ChatCode::Other`].
    pub fn code(&self) -> &'static str {
        CODES
            .iter()
            .find(|(_, chat_code)| chat_code == self)
            .map(|(raw, _)| *raw)
            .unwrap_or("????")
    }

    /// Returns the category this channel belongs to.
    pub fn category(&self) -> Category {
        match self {
            ChatCode::Emote | ChatCode::EmoteCustom => Category::Emote,
            ChatCode::Other => Category::Other,
            _ => Category::Chat,
        }
    }
}

/// Classifies a line from its raw code and normalized speaker name.
///
/// A line without a speaker is a system or NPC message and is never chat,
/// whatever its code says.
///
/// ```
/// use actchat::core::code::classify;
/// use actchat::Category;
///
/// assert_eq!(classify("000A", "Shooty McShootFace"), Category::Chat);
/// assert_eq!(classify("001D", "Shooty McShootFace"), Category::Emote);
/// assert_eq!(classify("000A", ""), Category::Other);
/// assert_eq!(classify("0039", "Shooty McShootFace"), Category::Other);
/// ```
pub fn classify(code: &str, name: &str) -> Category {
    if name.is_empty() {
        return Category::Other;
    }
    ChatCode::from_code(code).category()
}
