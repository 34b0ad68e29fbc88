//! Configuration: the data center universe and the user's parse settings.
//!
//! Both are plain TOML files, looked up first in the current directory and
//! then in the home directory:
//!
//! - [`Universe`] - the data centers and their worlds. A default is compiled
//!   in; `.actchat.datacenters.toml` replaces it.
//! - [`ParseConfiguration`] - defaults for the command line switches, the
//!   rename table and the speaker groups, from `.actchat.toml`.
//!
//! # Example
//!
//! ```rust
//! use actchat::config::{ParseConfiguration, Universe};
//!
//! # fn main() -> actchat::Result<()> {
//! let universe = Universe::builtin()?;
//! let config = ParseConfiguration::from_toml(r#"
//!     datacenter = "Crystal"
//!     server = "Goblin"
//!
//!     [renames]
//!     "Shooty McShootFace" = "Shooty"
//!
//!     [[group]]
//!     label = "Free Company"
//!     shortName = "fc"
//!     participants = ["Shooty McShootFace", "Wilburforce Glamtree"]
//! "#)?;
//! config.validate(&universe)?;
//!
//! let group = config.group("fc")?;
//! let options = config.as_options(&universe, group)?;
//! assert!(options.world_names.iter().any(|w| w == "Zalera"));
//! assert_eq!(options.renames["Shooty McShootFace"], "Shooty");
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::filter::{FilterOptions, Group};
use crate::error::{ActChatError, Result};

/// Parse configuration file name.
pub const CONFIG_FILE_NAME: &str = ".actchat.toml";

/// Data center override file names, in lookup order.
pub const UNIVERSE_FILE_NAMES: &[&str] = &[".actchat.datacenters.toml", "actchat.datacenters.toml"];

/// Data center used when none is configured.
pub const DEFAULT_DATA_CENTER: &str = "Crystal";

/// Home server used when none is configured.
pub const DEFAULT_SERVER: &str = "Zalera";

const BUILTIN_UNIVERSE: &str = include_str!("../resources/datacenters.toml");

/// Returns the first existing `name` in the current directory, then the home
/// directory.
pub fn find_config_file(name: &str) -> Option<PathBuf> {
    let local = PathBuf::from(name);
    if local.is_file() {
        return Some(local);
    }
    dirs::home_dir()
        .map(|home| home.join(name))
        .filter(|path| path.is_file())
}

// ============================================================================
// Universe
// ============================================================================

/// Game region a data center is hosted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    NorthAmerica,
    Europe,
    Japan,
    Oceania,
}

/// A data center and the worlds hosted on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCenter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    /// Worlds in file order. The normalizers check them in this order.
    pub servers: Vec<String>,
}

impl DataCenter {
    /// Returns `true` if `server` is hosted here. Case-insensitive.
    pub fn has_server(&self, server: &str) -> bool {
        self.servers.iter().any(|s| s.eq_ignore_ascii_case(server))
    }

    /// The world names the normalizers strip from names and messages.
    pub fn world_names(&self) -> &[String] {
        &self.servers
    }

    fn dedup_servers(&mut self) {
        let mut seen = BTreeSet::new();
        self.servers.retain(|server| seen.insert(server.clone()));
    }
}

/// Every known data center.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    #[serde(rename = "datacenter", default)]
    pub data_centers: Vec<DataCenter>,
}

impl Universe {
    /// The data centers compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_UNIVERSE)
    }

    /// Parses a universe definition.
    ///
    /// # Errors
    ///
    /// Returns a TOML error for malformed input and a configuration error when
    /// no data center is defined.
    pub fn from_toml(input: &str) -> Result<Self> {
        let mut universe: Universe = toml::from_str(input)?;
        if universe.data_centers.is_empty() {
            return Err(ActChatError::config("no data centers defined"));
        }
        universe.data_centers.iter_mut().for_each(DataCenter::dedup_servers);
        Ok(universe)
    }

    /// Reads a universe definition from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let input = fs::read_to_string(path)?;
        Self::from_toml(&input)
    }

    /// Loads the user's override file if one exists, else the builtin set.
    pub fn discover() -> Result<Self> {
        match UNIVERSE_FILE_NAMES.iter().find_map(|name| find_config_file(name)) {
            Some(path) => {
                debug!("Loading data centers from {}", path.display());
                Self::load(&path)
            }
            None => Self::builtin(),
        }
    }

    /// Finds a data center by name. Case-insensitive.
    pub fn get(&self, name: &str) -> Option<&DataCenter> {
        self.data_centers
            .iter()
            .find(|dc| dc.name.eq_ignore_ascii_case(name))
    }

    /// Like [`get`](Self::get), but unknown names are an error.
    pub fn data_center(&self, name: &str) -> Result<&DataCenter> {
        self.get(name)
            .ok_or_else(|| ActChatError::unknown_data_center(name, &self.names()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.data_centers.iter().map(|dc| dc.name.as_str()).collect()
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

// ============================================================================
// Parse configuration
// ============================================================================

/// A `[[group]]` entry of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupEntry {
    /// Label shown to the user
    pub label: String,

    /// Name used on the command line and in output file names
    #[serde(default, alias = "shortname", skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    /// Full names of the members
    #[serde(default)]
    pub participants: Vec<String>,
}

impl GroupEntry {
    pub fn to_group(&self) -> Group {
        Group::named(
            self.label.clone(),
            self.short_name.clone(),
            self.participants.iter().cloned(),
        )
    }
}

/// User settings from `.actchat.toml`.
///
/// Every field is optional in the file.
///
/// | Key | Default |
/// |-----|---------|
/// | `dryRun` | `false` |
/// | `replaceIfExists` | `false` |
/// | `includeEmotes` | `true` |
/// | `performRename` | `true` |
/// | `datacenter` | `"Crystal"` |
/// | `server` | `"Zalera"` |
/// | `[renames]` | empty |
/// | `[[group]]` | none |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseConfiguration {
    pub dry_run: bool,
    pub replace_if_exists: bool,
    pub include_emotes: bool,
    pub perform_rename: bool,
    #[serde(rename = "datacenter")]
    pub data_center: String,
    pub server: String,
    pub renames: BTreeMap<String, String>,
    #[serde(rename = "group", skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupEntry>,
}

impl Default for ParseConfiguration {
    fn default() -> Self {
        Self {
            dry_run: false,
            replace_if_exists: false,
            include_emotes: true,
            perform_rename: true,
            data_center: DEFAULT_DATA_CENTER.to_string(),
            server: DEFAULT_SERVER.to_string(),
            renames: BTreeMap::new(),
            groups: Vec::new(),
        }
    }
}

impl ParseConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let input = fs::read_to_string(path)?;
        Self::from_toml(&input)
    }

    /// Loads `.actchat.toml` from the current or home directory, falling back
    /// to the defaults when neither exists.
    pub fn discover() -> Result<Self> {
        match find_config_file(CONFIG_FILE_NAME) {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::load(&path)
            }
            None => {
                debug!("No {CONFIG_FILE_NAME} found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Checks the configuration against the universe.
    ///
    /// # Errors
    ///
    /// - [`ActChatError::UnknownDataCenter`] if the data center does not exist
    /// - [`ActChatError::UnknownServer`] if the server is not part of it
    /// - [`ActChatError::Config`] for a group without a label, or two groups
    ///   sharing a short name
    pub fn validate(&self, universe: &Universe) -> Result<()> {
        let data_center = universe.data_center(&self.data_center)?;
        if !data_center.has_server(&self.server) {
            return Err(ActChatError::UnknownServer {
                server: self.server.clone(),
                data_center: data_center.name.clone(),
            });
        }

        let mut seen = BTreeSet::from([Group::Everyone.short_name()]);
        for entry in &self.groups {
            if entry.label.trim().is_empty() {
                return Err(ActChatError::config("a group label is missing"));
            }
            let short_name = entry.to_group().short_name();
            if !seen.insert(short_name.clone()) {
                return Err(ActChatError::config(format!(
                    "duplicate group short name '{short_name}'"
                )));
            }
        }
        Ok(())
    }

    /// Every configured group plus [`Group::Everyone`], keyed by short name.
    pub fn groups(&self) -> BTreeMap<String, Group> {
        let mut groups: BTreeMap<String, Group> = self
            .groups
            .iter()
            .map(|entry| {
                let group = entry.to_group();
                (group.short_name(), group)
            })
            .collect();
        groups.insert(Group::Everyone.short_name(), Group::Everyone);
        groups
    }

    /// Looks up a group by short name.
    pub fn group(&self, short_name: &str) -> Result<Group> {
        let mut groups = self.groups();
        groups.remove(short_name).ok_or_else(|| {
            let known: Vec<&str> = groups.keys().map(String::as_str).collect();
            ActChatError::unknown_group(short_name, &known)
        })
    }

    /// Builds the filter options for a run over `group`.
    ///
    /// Renames are dropped when `performRename` is off.
    pub fn as_options(&self, universe: &Universe, group: Group) -> Result<FilterOptions> {
        let data_center = universe.data_center(&self.data_center)?;
        let renames: HashMap<String, String> = if self.perform_rename {
            self.renames
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        } else {
            HashMap::new()
        };

        Ok(FilterOptions::new()
            .with_emotes(self.include_emotes)
            .with_group(group)
            .with_renames(renames)
            .with_worlds(data_center.world_names().iter().cloned())
            .with_force_replace(self.replace_if_exists)
            .with_dry_run(self.dry_run))
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
