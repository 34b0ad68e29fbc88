//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`LogLevel`] - Diagnostic verbosity for `--log-level`
//!
//! Switches that also exist in `.actchat.toml` come in pairs (`-e`/`-E`,
//! `-r`/`-S`, `-d`/`-P`). The last one given wins, and when neither is given
//! the configuration file decides. See [`Args::apply_to`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ParseConfiguration;
use crate::core::filter::EVERYONE_SHORT_NAME;

/// Extract Final Fantasy XIV chat and emote lines from ACT network logs.
///
/// Each log is written next to its input as <name>.<group>.txt.
#[derive(Parser, Debug, Clone)]
#[command(name = "actchat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    actchat Network_26502_20220604.log
    actchat -g fc -E ~/ACT/FFXIVLogs
    actchat --replace 'logs/Network_2022*.log'
    actchat -d --datacenter Aether --server Siren Network_26502_20220604.log
    actchat --list-groups")]
pub struct Args {
    /// Log files, directories or file name patterns
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Only keep lines from this group (short name)
    #[arg(short, long, value_name = "GROUP", default_value = EVERYONE_SHORT_NAME)]
    pub group: String,

    /// Include emotes
    #[arg(short = 'e', long, overrides_with = "no_emotes")]
    pub emotes: bool,

    /// Exclude emotes
    #[arg(short = 'E', long, overrides_with = "emotes")]
    pub no_emotes: bool,

    /// Replace existing output files
    #[arg(short = 'r', long, overrides_with = "no_replace")]
    pub replace: bool,

    /// Skip logs whose output file exists
    #[arg(short = 'S', long, overrides_with = "replace")]
    pub no_replace: bool,

    /// Print results to stdout instead of writing files
    #[arg(short = 'd', long, overrides_with = "process")]
    pub dry_run: bool,

    /// Write output files (undoes a configured dry run)
    #[arg(short = 'P', long, overrides_with = "dry_run")]
    pub process: bool,

    /// Data center whose world names are stripped
    #[arg(long, value_name = "NAME")]
    pub datacenter: Option<String>,

    /// Home server, must belong to the data center
    #[arg(long, value_name = "NAME")]
    pub server: Option<String>,

    /// Configuration file instead of .actchat.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML
    #[arg(short = 'c', long)]
    pub show_config: bool,

    /// Print the known data centers as TOML
    #[arg(short = 'u', long)]
    pub show_universe: bool,

    /// Print the configured groups
    #[arg(long)]
    pub list_groups: bool,

    /// Diagnostic level, overrides RUST_LOG
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Log each processed file
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// `Some(true)` for `-e`, `Some(false)` for `-E`, `None` if neither.
    pub fn emotes(&self) -> Option<bool> {
        flag_pair(self.emotes, self.no_emotes)
    }

    pub fn replace(&self) -> Option<bool> {
        flag_pair(self.replace, self.no_replace)
    }

    pub fn dry_run(&self) -> Option<bool> {
        flag_pair(self.dry_run, self.process)
    }

    /// Returns `true` if only informational output was requested.
    pub fn is_info_only(&self) -> bool {
        self.files.is_empty() && (self.show_config || self.show_universe || self.list_groups)
    }

    /// Overrides configuration values with the switches that were given.
    pub fn apply_to(&self, config: &mut ParseConfiguration) {
        if let Some(emotes) = self.emotes() {
            config.include_emotes = emotes;
        }
        if let Some(replace) = self.replace() {
            config.replace_if_exists = replace;
        }
        if let Some(dry_run) = self.dry_run() {
            config.dry_run = dry_run;
        }
        if let Some(ref data_center) = self.datacenter {
            config.data_center.clone_from(data_center);
        }
        if let Some(ref server) = self.server {
            config.server.clone_from(server);
        }
    }
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Diagnostic verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Returns the level as an `EnvFilter` directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("actchat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["a.log"]);
        assert_eq!(args.files, [PathBuf::from("a.log")]);
        assert_eq!(args.group, "everyone");
        assert_eq!(args.emotes(), None);
        assert_eq!(args.replace(), None);
        assert_eq!(args.dry_run(), None);
        assert!(args.log_level.is_none());
        assert!(!args.is_info_only());
    }

    #[test]
    fn test_flag_pairs_last_wins() {
        assert_eq!(parse(&["-e", "-E"]).emotes(), Some(false));
        assert_eq!(parse(&["-E", "-e"]).emotes(), Some(true));
        assert_eq!(parse(&["-S", "--replace"]).replace(), Some(true));
        assert_eq!(parse(&["-r", "--no-replace"]).replace(), Some(false));
        assert_eq!(parse(&["-d"]).dry_run(), Some(true));
        assert_eq!(parse(&["-d", "-P"]).dry_run(), Some(false));
    }

    #[test]
    fn test_apply_to_overrides_only_given_values() {
        let mut config = ParseConfiguration {
            include_emotes: false,
            replace_if_exists: true,
            ..ParseConfiguration::default()
        };
        parse(&["-e", "--datacenter", "Aether", "--server", "Siren"]).apply_to(&mut config);
        assert!(config.include_emotes);
        assert!(config.replace_if_exists);
        assert!(!config.dry_run);
        assert_eq!(config.data_center, "Aether");
        assert_eq!(config.server, "Siren");
    }

    #[test]
    fn test_group_and_files() {
        let args = parse(&["-g", "fc", "one.log", "logs/"]);
        assert_eq!(args.group, "fc");
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn test_log_level() {
        let args = parse(&["--log-level", "debug"]);
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(LogLevel::Debug.to_string(), "debug");
        assert!(Args::try_parse_from(["actchat", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_info_only() {
        assert!(parse(&["--list-groups"]).is_info_only());
        assert!(parse(&["-c"]).is_info_only());
        assert!(!parse(&["-c", "a.log"]).is_info_only());
        assert!(!parse(&[]).is_info_only());
    }
}
