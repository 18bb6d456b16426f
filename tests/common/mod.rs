//! # Test utilities for corfu-profiler
//!
//! `TestLogs` writes profiler logs into a temporary directory and builds
//! `corfu-profiler` commands isolated from the user's config file and
//! `CORFU_PROFILER_*` environment variables. Run commands inside
//! `snapshot_settings().bind(...)` when snapshotting their output.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use insta::Settings;
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

/// A small run: one transaction on thread 1, sequencer calls and a
/// non-transactional read on thread 2, and one malformed line.
pub const SAMPLE_LOG: &str = "\
1524272351029000000 1 | TXBegin [dur] 1000
1524272351029100000 1 | access(tx) [method] containsKey [id] 7c4f2940 [dur] 20000
1524272351030000000 2 | Seq [dur] 15000
1524272351030500000 1 | mutate(tx) [method] put [id] 7c4f2940 [dur] 30000
1524272351031000000 1 | TXEnd [dur] 2000
1524272351032000000 2 | access(nonTx) [method] containsKey [ids] 7c4f2940 9a1b [dur] 10000
this line is not a profiler record
";

pub struct TestLogs {
    temp_dir: TempDir,
}

impl TestLogs {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `contents` to `name` under the temp directory, creating parents.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create log directory");
        }
        std::fs::write(&path, contents).expect("Failed to write log");
        path
    }

    /// A `corfu-profiler` command running in the temp directory with no
    /// user config.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin("corfu-profiler"));
        cmd.current_dir(self.root());
        for (key, _) in std::env::vars_os() {
            if key.to_string_lossy().starts_with("CORFU_PROFILER_") {
                cmd.env_remove(&key);
            }
        }
        cmd.env(
            "CORFU_PROFILER_CONFIG_PATH",
            self.root().join("no-such-config.toml"),
        );
        cmd.env_remove("RUST_LOG");
        cmd.env("NO_COLOR", "1");
        // Fixed help wrapping
        cmd.env("COLUMNS", "100");
        cmd
    }
}

/// Snapshot settings that hide the per-test temp directory.
pub fn snapshot_settings() -> Settings {
    let mut settings = Settings::clone_current();
    settings.add_filter(r"/\S*no-such-config\.toml", "[CONFIG]");
    settings.add_filter(r"\x1b\[[0-9;]*m", "");
    settings
}

impl Default for TestLogs {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
