//! Integration tests for CLI argument handling
//!
//! Runs the `mobfot` binary; nothing here reaches the real API.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mobfot"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute mobfot")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mobfot"), "Help should mention mobfot");
    assert!(stdout.contains("search"), "Help should list the search command");
    assert!(stdout.contains("--proxy"), "Help should mention --proxy");
}

#[test]
fn test_missing_subcommand_fails() {
    let output = run_cli(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_invalid_log_level_prints_error_and_exits() {
    let output = run_cli(&["--log-level", "loud", "player", "1"]);
    assert!(!output.status.success(), "Expected invalid log level to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid log level") || stderr.contains("invalid value"),
        "Should print error about the log level: {}",
        stderr
    );
}

#[test]
fn test_non_numeric_id_fails_before_any_request() {
    // The base URL points at a closed port: reaching the network would
    // produce a transport error instead of the argument error
    let output = run_cli(&[
        "--base-url",
        "http://127.0.0.1:9/api",
        "--no-cache",
        "--no-archive",
        "player",
        "saka",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid argument"), "stderr: {}", stderr);
    assert!(stderr.contains("saka"), "stderr: {}", stderr);
}

#[test]
fn test_unreachable_api_reports_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base_url = format!("http://127.0.0.1:{}/api", port);
    let output = run_cli(&[
        "--base-url",
        &base_url,
        "--no-cache",
        "--no-archive",
        "search",
        "arsenal",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Transport error"), "stderr: {}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use mobfot::cli::{Cli, Command};
    use mobfot::CacheMode;

    #[test]
    fn test_match_refresh_flag() {
        let cli = Cli::parse_from(["mobfot", "match", "3901203", "--refresh"]);
        assert_eq!(
            cli.command,
            Command::Match {
                id: "3901203".to_string(),
                refresh: true
            }
        );
    }

    #[test]
    fn test_tv_listing_country_flag() {
        let cli = Cli::parse_from(["mobfot", "tv-listing", "4193490", "--country", "US"]);
        assert_eq!(
            cli.command,
            Command::TvListing {
                match_id: "4193490".to_string(),
                country: Some("US".to_string())
            }
        );
    }

    #[test]
    fn test_matches_with_timezone() {
        let cli = Cli::parse_from([
            "mobfot",
            "matches",
            "2024-08-17",
            "--timezone",
            "Europe/London",
        ]);
        assert_eq!(
            cli.command,
            Command::Matches {
                date: "2024-08-17".to_string(),
                timezone: Some("Europe/London".to_string())
            }
        );
    }

    #[test]
    fn test_no_cache_disables_caching() {
        let cli = Cli::parse_from(["mobfot", "--no-cache", "player", "1"]);
        assert_eq!(cli.client_config().cache, CacheMode::Disabled);
    }
}
