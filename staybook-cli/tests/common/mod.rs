//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - A rooms file fixture
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// The date every command treats as today unless a test overrides it.
pub const TODAY: &str = "2025-06-01";

/// Environment variables that would leak the caller's setup into a test.
const STAYBOOK_ENV: &[&str] = &[
    "STAYBOOK_DATA_DIR",
    "STAYBOOK_BUSY_TIMEOUT",
    "STAYBOOK_DISABLE_AUTOINIT",
    "STAYBOOK_USER",
    "STAYBOOK_TODAY",
    "STAYBOOK_LOG_MODE",
    "STAYBOOK_CATALOG",
    "STAYBOOK_AUTO_CONFIRM_ON_PAYMENT",
    "STAYBOOK_ADMINS",
    "STAYBOOK_FULL_REFUND_DAYS",
    "STAYBOOK_PARTIAL_REFUND_DAYS",
    "STAYBOOK_PARTIAL_REFUND_PERCENT",
    "STAYBOOK_PAGE_SIZE",
    "STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "STAYBOOK_OUTPUT_FORMAT",
];

/// Rooms used across the CLI tests.
pub const ROOMS_YAML: &str = r#"rooms:
  - id: "101"
    name: Garden double
    nightly_price: 100000
    capacity: 2
    options:
      - id: breakfast
        name: Breakfast
        price: 10000
  - id: "201"
    name: Family suite
    nightly_price: 180000
    capacity: 4
  - id: "301"
    name: Attic
    nightly_price: 50000
    capacity: 1
    bookable: false
"#;

/// Test environment with isolated data and working directories.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the staybook data directory
    pub data_dir: PathBuf,
    /// Working directory commands run in
    pub work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; staybook creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("staybook-data");
        let work_dir = temp_path.join("work");
        std::fs::create_dir_all(&work_dir).expect("Failed to create work dir");

        Self {
            temp_dir,
            temp_path,
            data_dir,
            work_dir,
        }
    }

    /// Create an environment whose data directory holds the test rooms file.
    pub fn with_rooms() -> Self {
        let env = Self::new();
        env.write_data_file("rooms.yaml", ROOMS_YAML);
        env
    }

    /// Write a file into the data directory, creating it if needed.
    pub fn write_data_file(&self, name: &str, contents: &str) -> PathBuf {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        let path = self.data_dir.join(name);
        std::fs::write(&path, contents).expect("Failed to write data file");
        path
    }

    /// Get a bare command builder with a scrubbed environment.
    ///
    /// No staybook flags are set, so tests keep full control over
    /// --data-dir and --today.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("staybook").expect("Failed to find staybook binary");
        for key in STAYBOOK_ENV {
            cmd.env_remove(key);
        }
        cmd.env("HOME", &self.temp_path).current_dir(&self.work_dir);
        cmd
    }

    /// Get a command builder with the data directory and today pre-configured.
    pub fn command(&self) -> Command {
        self.command_on(TODAY)
    }

    /// Get a command builder that treats `date` as today.
    pub fn command_on(&self, date: &str) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--today")
            .arg(date);
        cmd
    }

    /// Get a command acting as `user`.
    pub fn as_user(&self, user: &str) -> Command {
        self.as_user_on(user, TODAY)
    }

    /// Get a command acting as `user` on `date`.
    pub fn as_user_on(&self, user: &str, date: &str) -> Command {
        let mut cmd = self.command_on(date);
        cmd.arg("--user").arg(user);
        cmd
    }

    /// Write a configuration making `admins` hotel staff.
    pub fn with_admins(&self, admins: &[&str]) {
        let list = admins
            .iter()
            .map(|a| format!("  - {a}\n"))
            .collect::<String>();
        self.write_data_file("config.yaml", &format!("admins:\n{list}"));
    }

    /// Book a stay and return the reservation id.
    ///
    /// # Panics
    /// Panics if the book command fails or doesn't print an id.
    pub fn book(&self, user: &str, args: &[&str]) -> i64 {
        let output = self
            .as_user(user)
            .arg("book")
            .args(args)
            .output()
            .expect("Failed to run book command");

        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        parse_id(&String::from_utf8(output.stdout).expect("Invalid UTF-8 in output"))
    }

    /// Run a command as `user` and assert it succeeds.
    pub fn run_ok(&self, user: &str, args: &[&str]) -> String {
        let output = self
            .as_user(user)
            .args(args)
            .output()
            .expect("Failed to run command");

        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Show a reservation as JSON.
    pub fn show_json(&self, user: &str, id: i64) -> serde_json::Value {
        let stdout = self.run_ok(user, &["show", &id.to_string(), "--json"]);
        serde_json::from_str(&stdout).expect("show --json did not print JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a reservation id from command output.
#[allow(dead_code)]
pub fn parse_id(output: &str) -> i64 {
    output
        .trim()
        .parse()
        .expect("Output is not a valid reservation id")
}
