//! Name and message cleanup.
//!
//! FFXIV decorates names in the log in two ways that look bad anywhere else:
//!
//! - Glyphs from the Unicode private use area (party position markers, the
//!   cross-world icon, ...). These are removed everywhere.
//! - The home world of a cross-world player, glued onto the end of the name
//!   with no separator: `Shooty McShootFaceGoblin`. The same happens to names
//!   mentioned inside a message.
//!
//! Both cleanups are heuristics over the known world names of the active data
//! center. A real name or word that happens to end in a world name with no
//! space before it is stripped as well.

use std::collections::HashMap;

/// The lower private use block. FFXIV does not use the supplementary blocks.
const PRIVATE_USE: std::ops::RangeInclusive<char> = '\u{E000}'..='\u{F8FF}';

/// Removes every character from the private use area.
///
/// ```
/// use actchat::core::normalize::strip_private_use;
///
/// assert_eq!(strip_private_use("\u{E090}Shooty"), "Shooty");
/// ```
pub fn strip_private_use(text: &str) -> String {
    text.chars().filter(|ch| !PRIVATE_USE.contains(ch)).collect()
}

/// Cleans up a raw speaker name.
///
/// Private use glyphs are removed first. Then each known world is checked
/// once, in order, and stripped if the name ends with it. The result is
/// trimmed. An empty result means the line came from the system or an NPC.
///
/// ```
/// use actchat::core::normalize::normalize_name;
///
/// let worlds = ["Goblin".to_string()];
/// assert_eq!(normalize_name("ShootyGoblin", &worlds), "Shooty");
/// assert_eq!(normalize_name("Shooty Goblin", &worlds), "Shooty");
/// ```
pub fn normalize_name(raw: &str, worlds: &[String]) -> String {
    let mut result = strip_private_use(raw);
    if !result.is_empty() {
        for world in worlds {
            if !world.is_empty() && result.ends_with(world.as_str()) {
                result.truncate(result.len() - world.len());
            }
        }
    }
    result.trim().to_string()
}

/// Cleans up a raw message body.
///
/// After removing private use glyphs, any world name found abutted to the
/// previous character (not at the start, not after a space) is treated as a
/// name suffix and removed. Only the first occurrence of each world is
/// examined per pass; passes repeat until nothing changes. Finally the
/// speaker's own name is stripped from the front and the result trimmed.
///
/// ```
/// use actchat::core::normalize::normalize_message;
///
/// let worlds = ["Goblin".to_string(), "Zalera".to_string()];
/// assert_eq!(
///     normalize_message("Say somethingZalera Goblin", "Shooty", &worlds),
///     "Say something Goblin"
/// );
/// ```
pub fn normalize_message(raw: &str, full_name: &str, worlds: &[String]) -> String {
    let mut result = strip_private_use(raw);
    let mut changed = true;
    while changed {
        changed = false;
        for world in worlds {
            if world.is_empty() {
                continue;
            }
            if let Some(index) = result.find(world.as_str()) {
                if index > 0 && !result[..index].ends_with(' ') {
                    result.replace_range(index..index + world.len(), "");
                    changed = true;
                }
            }
        }
    }
    result
        .strip_prefix(full_name)
        .unwrap_or(&result)
        .trim()
        .to_string()
}

/// Returns the display name for a normalized name.
///
/// Falls back to `name` when there is no rename, or the rename is empty.
pub fn short_name_for(name: &str, renames: &HashMap<String, String>) -> String {
    match renames.get(name) {
        Some(short) if !short.is_empty() => short.clone(),
        _ => name.to_string(),
    }
}
