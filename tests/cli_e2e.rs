//! End-to-end CLI tests for actchat.
//!
//! These tests verify the complete CLI workflow by running the actual binary
//! with various arguments and checking the files it writes.
//!
//! # Test Categories
//!
//! - **Basic functionality**: file, directory and pattern arguments
//! - **Flags**: emotes, groups, replace, dry run, data center overrides
//! - **Configuration**: `.actchat.toml` discovery and `--config`
//! - **Error handling**: exit codes and messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const NETWORK_LOG: &str = "\
01|2022-06-04T12:14:30.0000000-07:00|3F6|The Goblet|e6ac4fc48a7cd470
00|2022-06-04T12:14:33.0000000-07:00|001E|Shooty McShootFace|Yellin' stuff|e6ac4fc48a7cd47d
21|2022-06-04T12:14:34.0000000-07:00|10FF1234|Shooty McShootFace|07|Attack|40001234|Striking Dummy|e6ac4fc48a7cd47e
00|2022-06-04T12:14:35.0000000-07:00|001D|Wilburforce GlamtreeGoblin|Wilburforce Glamtree waves to Shooty.|e6ac4fc48a7cd47f
00|2022-06-04T12:14:36.0000000-07:00|000A|\u{E090}Wilburforce GlamtreeGoblin|Ask TinyZalera about it.|e6ac4fc48a7cd480
00|2022-06-04T12:14:37.0000000-07:00|0039||You sense the presence of a powerful mark...|e6ac4fc48a7cd481
";

const CONFIG: &str = r#"
[renames]
"Shooty McShootFace" = "Shooty"

[[group]]
label = "Free Company"
participants = ["Wilburforce Glamtree"]

[[group]]
label = "Static"
shortName = "raid"
participants = ["Shooty McShootFace"]
"#;

/// Creates a temporary directory with a couple of ACT logs.
///
/// The directory doubles as the working and home directory of the binary so
/// no real configuration is picked up.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    fs::write(dir.path().join("Network_26502_20220604.log"), NETWORK_LOG).unwrap();
    fs::write(
        dir.path().join("Network_26502_20220605.log"),
        NETWORK_LOG.replace("Yellin' stuff", "More yellin'"),
    )
    .unwrap();
    fs::write(dir.path().join("readme.txt"), "not a log").unwrap();

    dir
}

fn actchat_cmd(dir: &TempDir) -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_actchat"));
    let mut cmd = Command::from_std(cmd);
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn write_config(dir: &TempDir) {
    fs::write(dir.path().join(".actchat.toml"), CONFIG).unwrap();
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_single_file() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .arg("Network_26502_20220604.log")
            .assert()
            .success()
            .stderr(predicate::str::contains("Done"))
            .stderr(predicate::str::contains("Processed: 1 files"));

        let output = output_path(&fixtures, "Network_26502_20220604.everyone.txt");
        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].starts_with("# Created at "));
        assert_eq!(
            &lines[1..],
            [
                "2022-06-04 12:14:33 C Shooty McShootFace  : Yellin' stuff",
                "2022-06-04 12:14:35 E Wilburforce Glamtree: waves to Shooty.",
                "2022-06-04 12:14:36 C Wilburforce Glamtree: Ask Tiny about it.",
            ]
        );
    }

    #[test]
    fn test_absolute_path() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("Network_26502_20220604.log");

        actchat_cmd(&fixtures)
            .arg(input.to_str().unwrap())
            .assert()
            .success();

        assert!(output_path(&fixtures, "Network_26502_20220604.everyone.txt").exists());
    }

    #[test]
    fn test_directory() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .arg(".")
            .assert()
            .success()
            .stderr(predicate::str::contains("Processed: 2 files"));

        assert!(output_path(&fixtures, "Network_26502_20220604.everyone.txt").exists());
        assert!(output_path(&fixtures, "Network_26502_20220605.everyone.txt").exists());
        assert!(!output_path(&fixtures, "readme.everyone.txt").exists());
    }

    #[test]
    fn test_pattern() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .arg("Network_*_20220605.log")
            .assert()
            .success();

        assert!(!output_path(&fixtures, "Network_26502_20220604.everyone.txt").exists());
        let content =
            fs::read_to_string(output_path(&fixtures, "Network_26502_20220605.everyone.txt"))
                .unwrap();
        assert!(content.contains("More yellin'"));
    }

    #[test]
    fn test_empty_result() {
        let fixtures = setup_fixtures();
        fs::write(fixtures.path().join("quiet.log"), "01|2022-06-04T12:14:30.0000000-07:00|3F6|x|y\n").unwrap();

        actchat_cmd(&fixtures)
            .arg("quiet.log")
            .assert()
            .success();

        let content = fs::read_to_string(output_path(&fixtures, "quiet.everyone.txt")).unwrap();
        assert!(content.starts_with("# Created at "));
        assert!(content.ends_with("\n# No lines matched the criteria\n"));
        assert_eq!(content.lines().count(), 2);
    }
}

// ============================================================================
// Flag Tests
// ============================================================================

mod flags {
    use super::*;

    #[test]
    fn test_no_emotes() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .args(["-E", "Network_26502_20220604.log"])
            .assert()
            .success();

        let content =
            fs::read_to_string(output_path(&fixtures, "Network_26502_20220604.everyone.txt"))
                .unwrap();
        assert!(!content.contains(" E "));
        assert!(content.contains("Yellin' stuff"));
    }

    #[test]
    fn test_group_flag() {
        let fixtures = setup_fixtures();
        write_config(&fixtures);

        actchat_cmd(&fixtures)
            .args(["-g", "free-company", "Network_26502_20220604.log"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Free Company"));

        let content = fs::read_to_string(output_path(
            &fixtures,
            "Network_26502_20220604.free-company.txt",
        ))
        .unwrap();
        assert!(!content.contains("Yellin' stuff"));
        assert!(content.contains("Wilburforce Glamtree: Ask Tiny about it."));
    }

    #[test]
    fn test_renames_applied() {
        let fixtures = setup_fixtures();
        write_config(&fixtures);

        actchat_cmd(&fixtures)
            .args(["--group", "raid", "Network_26502_20220604.log"])
            .assert()
            .success();

        let content =
            fs::read_to_string(output_path(&fixtures, "Network_26502_20220604.raid.txt")).unwrap();
        assert!(content.contains("2022-06-04 12:14:33 C Shooty: Yellin' stuff"));
    }

    #[test]
    fn test_existing_output_skipped() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "Network_26502_20220604.everyone.txt");
        fs::write(&output, "keep").unwrap();

        actchat_cmd(&fixtures)
            .arg("Network_26502_20220604.log")
            .assert()
            .success()
            .stderr(predicate::str::contains("Target file exists, skipping"))
            .stderr(predicate::str::contains("Skipped:   1 files"));

        assert_eq!(fs::read_to_string(&output).unwrap(), "keep");
    }

    #[test]
    fn test_replace_flag() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "Network_26502_20220604.everyone.txt");
        fs::write(&output, "old").unwrap();

        actchat_cmd(&fixtures)
            .args(["--replace", "Network_26502_20220604.log"])
            .assert()
            .success();

        assert!(fs::read_to_string(&output).unwrap().contains("Yellin' stuff"));
    }

    #[test]
    fn test_dry_run() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .args(["-d", "Network_26502_20220604.log"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("# Created at "))
            .stdout(predicate::str::contains("C Shooty McShootFace  : Yellin' stuff"))
            .stderr(predicate::str::contains("Dry run"));

        assert!(!output_path(&fixtures, "Network_26502_20220604.everyone.txt").exists());
    }

    #[test]
    fn test_other_data_center_keeps_crystal_worlds() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .args(["-d", "--datacenter", "Aether", "--server", "Siren", "Network_26502_20220604.log"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Wilburforce GlamtreeGoblin"));
    }

    #[test]
    fn test_verbose_logs_processing() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .args(["-v", "Network_26502_20220604.log"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Processing"));
    }

    #[test]
    fn test_help() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("EXAMPLES"))
            .stdout(predicate::str::contains("--group"));
    }

    #[test]
    fn test_version() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_list_groups() {
        let fixtures = setup_fixtures();
        write_config(&fixtures);

        actchat_cmd(&fixtures)
            .arg("--list-groups")
            .assert()
            .success()
            .stdout(predicate::str::contains("everyone"))
            .stdout(predicate::str::contains("free-company"))
            .stdout(predicate::str::contains("raid"));
    }

    #[test]
    fn test_show_config_defaults() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .arg("--show-config")
            .assert()
            .success()
            .stdout(predicate::str::contains("datacenter = \"Crystal\""))
            .stdout(predicate::str::contains("server = \"Zalera\""));
    }

    #[test]
    fn test_show_config_with_overrides() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .args(["-c", "-E", "-r"])
            .assert()
            .success()
            .stdout(predicate::str::contains("includeEmotes = false"))
            .stdout(predicate::str::contains("replaceIfExists = true"));
    }

    #[test]
    fn test_show_universe() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .arg("--show-universe")
            .assert()
            .success()
            .stdout(predicate::str::contains("[[datacenter]]"))
            .stdout(predicate::str::contains("Zalera"));
    }

    #[test]
    fn test_explicit_config_file() {
        let fixtures = setup_fixtures();
        let path = fixtures.path().join("custom.toml");
        fs::write(&path, "includeEmotes = false\n").unwrap();

        actchat_cmd(&fixtures)
            .args(["--config", "custom.toml", "--show-config"])
            .assert()
            .success()
            .stdout(predicate::str::contains("includeEmotes = false"));
    }

    #[test]
    fn test_universe_override() {
        let fixtures = setup_fixtures();
        fs::write(
            fixtures.path().join(".actchat.datacenters.toml"),
            "[[datacenter]]\nname = \"Crystal\"\nservers = [\"Zalera\"]\n",
        )
        .unwrap();

        actchat_cmd(&fixtures)
            .args(["-d", "Network_26502_20220604.log"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Wilburforce GlamtreeGoblin"));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_unknown_group() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .args(["-g", "nobody", "Network_26502_20220604.log"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown group 'nobody'"))
            .stderr(predicate::str::contains("everyone"));
    }

    #[test]
    fn test_unknown_server() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .args(["--server", "Bobcat", "Network_26502_20220604.log"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Bobcat"));
    }

    #[test]
    fn test_unknown_data_center() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .args(["--datacenter", "Nowhere", "Network_26502_20220604.log"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown data center"));
    }

    #[test]
    fn test_broken_config() {
        let fixtures = setup_fixtures();
        fs::write(fixtures.path().join(".actchat.toml"), "dryRun = maybe\n").unwrap();

        actchat_cmd(&fixtures)
            .arg("Network_26502_20220604.log")
            .assert()
            .failure()
            .stderr(predicate::str::contains("TOML error"));
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .args(["missing.log", "Network_26502_20220604.log"])
            .assert()
            .success()
            .stderr(predicate::str::contains("does not exist"));

        assert!(output_path(&fixtures, "Network_26502_20220604.everyone.txt").exists());
    }

    #[test]
    fn test_corrupt_log_fails() {
        let fixtures = setup_fixtures();
        fs::write(fixtures.path().join("bad.log"), "00|not-a-time|000A|A|b|c\n").unwrap();

        actchat_cmd(&fixtures)
            .args(["bad.log", "Network_26502_20220604.log"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to parse line 1"))
            .stderr(predicate::str::contains("Failed:    1 files"));

        assert!(!output_path(&fixtures, "bad.everyone.txt").exists());
        assert!(output_path(&fixtures, "Network_26502_20220604.everyone.txt").exists());
    }

    #[test]
    fn test_no_files() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .assert()
            .success()
            .stderr(predicate::str::contains("No files to process"));
    }

    #[test]
    fn test_invalid_log_level() {
        let fixtures = setup_fixtures();

        actchat_cmd(&fixtures)
            .args(["--log-level", "loud"])
            .assert()
            .failure();
    }
}
