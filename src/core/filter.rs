//! Filter chat records by category and speaker group.
//!
//! This module provides [`Group`], the participant predicate, [`FilterOptions`]
//! for everything the pipeline needs to decide what a line becomes, and
//! [`apply_filters`] for filtering record collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Emotes | [`with_emotes`](FilterOptions::with_emotes) | Keep emotes as well as chat |
//! | Group | [`with_group`](FilterOptions::with_group) | Keep only lines from group members |
//!
//! Both filters are combined with AND logic. [`Category::Other`] lines are
//! never retained.
//!
//! # Examples
//!
//! ```
//! use actchat::core::filter::{FilterOptions, Group, apply_filters};
//! use actchat::{Category, ChatRecord};
//! use chrono::DateTime;
//!
//! let ts = DateTime::parse_from_rfc3339("2022-06-04T12:14:33-07:00").unwrap();
//! let records = vec![
//!     ChatRecord::new(1, "Shooty McShootFace", Category::Chat, "Hello", ts),
//!     ChatRecord::new(2, "Wilburforce Glamtree", Category::Chat, "Hi there", ts),
//!     ChatRecord::new(3, "Shooty McShootFace", Category::Emote, "waves.", ts),
//! ];
//!
//! let group = Group::named("Duo", None, ["Shooty McShootFace"]);
//! let options = FilterOptions::new().with_emotes(false).with_group(group);
//! let filtered = apply_filters(records, &options);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].message(), "Hello");
//! ```

use std::collections::{BTreeSet, HashMap};

use crate::record::{Category, ChatRecord};

/// Label of the built-in group that matches every speaker.
pub const EVERYONE_LABEL: &str = "Everyone";

/// Short name of the built-in group that matches every speaker.
pub const EVERYONE_SHORT_NAME: &str = "everyone";

/// A labelled speaker predicate.
///
/// The label and short name only identify the group for selection and output
/// naming. Matching is by exact normalized full name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Group {
    /// Matches every speaker.
    #[default]
    Everyone,
    /// Matches only the listed participants.
    Named {
        label: String,
        short_name: Option<String>,
        participants: BTreeSet<String>,
    },
}

impl Group {
    /// Creates a group with an explicit participant list.
    ///
    /// An empty `short_name` is treated as absent.
    pub fn named<I, S>(label: impl Into<String>, short_name: Option<String>, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Group::Named {
            label: label.into(),
            short_name: short_name.filter(|s| !s.is_empty()),
            participants: participants.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if lines spoken by `name` belong to this group.
    ///
    /// ```
    /// use actchat::core::filter::Group;
    ///
    /// let fc = Group::named("Free Company", None, ["Shooty McShootFace"]);
    /// assert!(fc.matches("Shooty McShootFace"));
    /// assert!(!fc.matches("shooty mcshootface"));
    /// assert!(Group::Everyone.matches("anyone at all"));
    /// ```
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Group::Everyone => true,
            Group::Named { participants, .. } => participants.contains(name),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Group::Everyone => EVERYONE_LABEL,
            Group::Named { label, .. } => label,
        }
    }

    /// Returns the explicit short name, or one derived from the label.
    ///
    /// ```
    /// use actchat::core::filter::Group;
    ///
    /// let group = Group::named("Tuesday Raid #2!", None, Vec::<String>::new());
    /// assert_eq!(group.short_name(), "tuesday-raid-2");
    /// assert_eq!(Group::Everyone.short_name(), "everyone");
    /// ```
    pub fn short_name(&self) -> String {
        match self {
            Group::Everyone => EVERYONE_SHORT_NAME.to_string(),
            Group::Named {
                short_name: Some(short),
                ..
            } => short.clone(),
            Group::Named { label, .. } => slug(label),
        }
    }

    /// Returns the participants, `None` for [`Group::Everyone`].
    pub fn participants(&self) -> Option<&BTreeSet<String>> {
        match self {
            Group::Everyone => None,
            Group::Named { participants, .. } => Some(participants),
        }
    }
}

/// Derives a short name from a label.
///
/// Keeps letters, digits and spaces, turns spaces into `-` and lowercases.
pub fn slug(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .map(|c| if c == ' ' { '-' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Everything the reader and file handler need to process a log.
///
/// Built once from configuration and shared read-only across every file of a
/// run.
///
/// # Examples
///
/// ```
/// use actchat::core::filter::FilterOptions;
///
/// let options = FilterOptions::new()
///     .with_emotes(false)
///     .with_worlds(["Goblin", "Zalera"])
///     .with_rename("Shooty McShootFace", "Shooty")
///     .with_force_replace(true);
///
/// assert!(!options.include_emotes);
/// assert_eq!(options.world_names.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Keep [`Category::Emote`] lines as well as chat.
    pub include_emotes: bool,

    /// Only keep lines from members of this group.
    pub group: Group,

    /// Full name to display name overrides.
    pub renames: HashMap<String, String>,

    /// World names of the active data center in configured order, used by
    /// the normalizers.
    pub world_names: Vec<String>,

    /// Overwrite existing output files.
    pub force_replace: bool,

    /// Write results to the dry-run sink instead of output files.
    pub dry_run: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            include_emotes: false,
            group: Group::Everyone,
            renames: HashMap::new(),
            world_names: Vec::new(),
            force_replace: false,
            dry_run: false,
        }
    }
}

impl FilterOptions {
    /// Creates options that keep chat from everyone, without emotes.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_emotes(mut self, include_emotes: bool) -> Self {
        self.include_emotes = include_emotes;
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: Group) -> Self {
        self.group = group;
        self
    }

    /// Replaces the rename table.
    #[must_use]
    pub fn with_renames(mut self, renames: HashMap<String, String>) -> Self {
        self.renames = renames;
        self
    }

    /// Adds a single rename.
    #[must_use]
    pub fn with_rename(mut self, name: impl Into<String>, short_name: impl Into<String>) -> Self {
        self.renames.insert(name.into(), short_name.into());
        self
    }

    /// Replaces the known world names. Order is kept, duplicates dropped.
    #[must_use]
    pub fn with_worlds<I, S>(mut self, worlds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.world_names.clear();
        for world in worlds {
            let world = world.into();
            if !self.world_names.contains(&world) {
                self.world_names.push(world);
            }
        }
        self
    }

    #[must_use]
    pub fn with_force_replace(mut self, force_replace: bool) -> Self {
        self.force_replace = force_replace;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the categories that can be retained.
    pub fn categories(&self) -> &'static [Category] {
        if self.include_emotes {
            &[Category::Chat, Category::Emote]
        } else {
            &[Category::Chat]
        }
    }

    /// Returns `true` if the record passes both the category and group filter.
    pub fn retains(&self, record: &ChatRecord) -> bool {
        self.categories().contains(&record.category) && self.group.matches(&record.name)
    }
}

/// Filters a collection of records based on the provided options.
///
/// Returns a new vector with only the retained records, in their original
/// order.
pub fn apply_filters(records: Vec<ChatRecord>, options: &FilterOptions) -> Vec<ChatRecord> {
    records
        .into_iter()
        .filter(|record| options.retains(record))
        .collect()
}
