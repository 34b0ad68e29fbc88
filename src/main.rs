//! # actchat CLI
//!
//! Command-line interface for the actchat library.
//!
//! Progress and the summary go to stderr, so a dry run leaves only the
//! extracted chat on stdout.

use std::io::{self, IsTerminal};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use actchat::ActChatError;
use actchat::cli::Args;
use actchat::config::{ParseConfiguration, Universe};
use actchat::files::FileHandler;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(args: &Args) {
    let filter = match args.log_level {
        Some(level) => EnvFilter::new(level.as_str()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "info" } else { "warn" })),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Returns `Ok(false)` when at least one file failed.
fn run(args: &Args) -> Result<bool, ActChatError> {
    let total_start = Instant::now();

    let universe = Universe::discover()?;
    if args.show_universe {
        print!("{}", universe.to_toml()?);
    }

    let mut config = match args.config {
        Some(ref path) => ParseConfiguration::load(path)?,
        None => ParseConfiguration::discover()?,
    };
    args.apply_to(&mut config);
    config.validate(&universe)?;

    if args.show_config {
        print!("{}", config.to_toml()?);
    }
    if args.list_groups {
        for (short_name, group) in config.groups() {
            println!("{:<16} {}", short_name, group.label());
        }
    }
    if args.is_info_only() {
        return Ok(true);
    }

    let group = config.group(&args.group)?;
    let options = config.as_options(&universe, group)?;

    // Print header
    eprintln!("📦 actchat v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("🌐 World:   {} ({})", config.server, config.data_center);
    eprintln!(
        "👥 Group:   {} ({})",
        options.group.label(),
        options.group.short_name()
    );
    eprintln!(
        "💬 Emotes:  {}",
        if options.include_emotes { "included" } else { "excluded" }
    );
    if options.force_replace {
        eprintln!("♻️  Replace: existing output files");
    }
    if options.dry_run {
        eprintln!("🧪 Mode:    Dry run (stdout)");
    }
    eprintln!();

    let mut handler = FileHandler::new(&options);
    let stats = handler.process_paths(&args.files);
    let total_time = total_start.elapsed();

    if stats.has_failures() {
        eprintln!("⚠️  Finished with {} failed file(s)", stats.failed);
    } else {
        eprintln!("✅ Done!");
    }

    // Summary
    eprintln!();
    eprintln!("📊 Summary:");
    eprintln!("   Processed: {} files", stats.processed);
    eprintln!("   Skipped:   {} files", stats.skipped);
    if stats.failed > 0 {
        eprintln!("   Failed:    {} files", stats.failed);
    }
    eprintln!("   Lines:     {} written", stats.retained);

    eprintln!();
    eprintln!("⚡ Total time: {:.2}s", total_time.as_secs_f64());

    Ok(!stats.has_failures())
}
