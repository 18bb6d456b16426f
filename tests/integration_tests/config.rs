//! Integration tests for `corfu-profiler config show`.

use insta_cmd::assert_cmd_snapshot;

use crate::common::{TestLogs, snapshot_settings, stderr, stdout};

#[test]
fn test_config_show_defaults() {
    let logs = TestLogs::new();
    snapshot_settings().bind(|| {
        assert_cmd_snapshot!(logs.command().args(["config", "show"]), @r#"
        success: true
        exit_code: 0
        ----- stdout -----
        # Config file: [CONFIG] (not found, using defaults)

        output-dir = "results"
        access-ops = ["containsKey"]
        mutate-ops = ["put"]
        other-threshold = 0.015
        width = 1024
        height = 768

        ----- stderr -----
        "#);
    });
}

#[test]
fn test_config_show_layers_file_and_env() {
    let logs = TestLogs::new();
    let config = logs.write(
        "profiler.toml",
        "output-dir = \"charts\"\ntable-id = \"7c4f2940\"\nwidth = 800\n",
    );

    let output = logs
        .command()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .env("CORFU_PROFILER_WIDTH", "640")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("# Config file: "), "{out}");
    assert!(out.contains("output-dir = \"charts\""), "{out}");
    assert!(out.contains("table-id = \"7c4f2940\""), "{out}");
    assert!(out.contains("width = 640"), "{out}");
    assert!(out.contains("height = 768"), "{out}");
}

#[test]
fn test_config_show_env_method_lists() {
    let logs = TestLogs::new();
    let output = logs
        .command()
        .args(["config", "show"])
        .env("CORFU_PROFILER_ACCESS_OPS", "containsKey,get")
        .env("CORFU_PROFILER_MUTATE_OPS", "remove")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("access-ops = [\"containsKey\", \"get\"]"), "{out}");
    assert!(out.contains("mutate-ops = [\"remove\"]"), "{out}");
}

#[test]
fn test_invalid_config_fails() {
    let logs = TestLogs::new();
    let config = logs.write("profiler.toml", "other-threshold = 2.0\n");

    let output = logs
        .command()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid configuration"));
}
