//! Integration tests for `corfu-profiler plot`.
//!
//! Drawing text needs a system font, so tests that write PNGs are ignored by
//! default. Run them with `cargo test -- --ignored`.

use crate::common::{SAMPLE_LOG, TestLogs, stderr, stdout};

#[test]
fn test_plot_table_chart_without_table_id() {
    let logs = TestLogs::new();
    let log = logs.write("run.log", SAMPLE_LOG);

    let output = logs
        .command()
        .arg("plot")
        .arg(&log)
        .args(["--chart", "all-methods-by-id"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("all-methods-by-id needs a table ID"), "{err}");
    assert!(err.contains("--table-id"), "{err}");
    assert!(!logs.root().join("results/count_all_methods_by_id.png").exists());
}

#[test]
fn test_plot_empty_chart() {
    let logs = TestLogs::new();
    let log = logs.write("run.log", "1000000 1 | Checkpoint\n");

    let output = logs
        .command()
        .arg("plot")
        .arg(&log)
        .args(["--chart", "seq-calls"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Nothing to plot for seq-calls"));
}

#[test]
fn test_plot_reports_each_failed_chart() {
    let logs = TestLogs::new();
    let log = logs.write("run.log", "1000000 1 | Checkpoint\n");

    let output = logs
        .command()
        .arg("plot")
        .arg(&log)
        .args(["--chart", "ops-per-tx", "--chart", "table-id-ops-per-tx"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Nothing to plot for ops-per-tx"), "{err}");
    assert!(err.contains("table-id-ops-per-tx needs a table ID"), "{err}");
    assert!(err.contains("2 of 2 charts failed"), "{err}");
}

#[test]
fn test_plot_no_records() {
    let logs = TestLogs::new();
    let log = logs.write("run.log", "\n\n");

    let output = logs.command().arg("plot").arg(&log).output().unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No profiler records found"));
    assert!(!logs.root().join("results").exists());
}

#[test]
fn test_plot_rejects_unknown_chart() {
    let logs = TestLogs::new();
    let output = logs
        .command()
        .args(["plot", "run.log", "--chart", "pie"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid value 'pie'"));
}

#[test]
#[ignore = "requires system fonts"]
fn test_plot_all_charts() {
    let logs = TestLogs::new();
    let log = logs.write("run.log", SAMPLE_LOG);

    let output = logs
        .command()
        .arg("plot")
        .arg(&log)
        .args(["-o", "charts", "--table-id", "7c4f2940"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    for name in [
        "count_active_threads.png",
        "count_seq_calls.png",
        "count_ops_per_tx.png",
        "count_table_ops.png",
        "count_table_ops_per_tx.png",
        "count_id_table_ops_per_tx.png",
        "count_all_ops.png",
        "count_all_methods.png",
        "count_all_methods_tx.png",
        "count_all_methods_by_id.png",
        "count_all_ops_time_boxplot.png",
        "count_all_ops_time_bar.png",
        "count_all_ops_time_by_tx.png",
        "count_reads.png",
    ] {
        assert!(logs.root().join("charts").join(name).exists(), "{name}");
        assert!(stdout(&output).contains(name), "{name}");
    }
}

#[test]
#[ignore = "requires system fonts"]
fn test_plot_default_skips_table_charts() {
    let logs = TestLogs::new();
    let log = logs.write("run.log", SAMPLE_LOG);

    let output = logs.command().arg("plot").arg(&log).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let err = stderr(&output);
    assert!(err.contains("Skipping table-id-ops-per-tx"), "{err}");
    assert!(err.contains("Skipping all-methods-by-id"), "{err}");
    assert!(logs.root().join("results/count_all_ops.png").exists());
    assert!(!logs.root().join("results/count_all_methods_by_id.png").exists());
}
