use insta_cmd::assert_cmd_snapshot;

use crate::common::{TestLogs, snapshot_settings, stderr, stdout};

#[test]
fn test_help() {
    let logs = TestLogs::new();
    snapshot_settings().bind(|| {
        assert_cmd_snapshot!(logs.command().arg("--help"), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        Charts and summaries for CorfuDB profiler logs

        Usage: corfu-profiler [OPTIONS] <COMMAND>

        Commands:
          plot     Draw PNG charts from a profiler log
          summary  Print per-event counts and latencies
          trace    Convert a profiler log to Chrome Trace Event Format JSON
          config   Inspect configuration

        Options:
          -v, --verbose        Show debug logging (files read, lines skipped, charts written)
              --config <FILE>  Config file to use instead of the user config
          -h, --help           Print help
          -V, --version        Print version

        ----- stderr -----
        ");
    });
}

#[test]
fn test_no_arguments_shows_help() {
    let logs = TestLogs::new();
    let output = logs.command().output().unwrap();

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Usage: corfu-profiler"), "{err}");
    for command in ["plot", "summary", "trace", "config"] {
        assert!(err.contains(command), "{command}");
    }
}

#[test]
fn test_plot_help_lists_charts() {
    let logs = TestLogs::new();
    let output = logs.command().args(["plot", "--help"]).output().unwrap();
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("active-threads"), "{out}");
    assert!(out.contains("all-methods-by-id"), "{out}");
    assert!(out.contains("--table-id"), "{out}");
}
