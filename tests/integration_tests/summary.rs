//! Integration tests for `corfu-profiler summary`.

use insta_cmd::assert_cmd_snapshot;

use crate::common::{SAMPLE_LOG, TestLogs, snapshot_settings, stderr, stdout};

#[test]
fn test_summary_tables() {
    let logs = TestLogs::new();
    logs.write("run.log", SAMPLE_LOG);

    snapshot_settings().bind(|| {
        assert_cmd_snapshot!(logs.command().args(["summary", "run.log"]), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        6 records from 1 source, 1 skipped

        Event          Count  Share
        Seq                1  16.7%
        TXBegin            1  16.7%
        TXEnd              1  16.7%
        access(nonTx)      1  16.7%
        access(tx)         1  16.7%
        mutate(tx)         1  16.7%

        Method       Calls  In tx
        containsKey      2      1
        put              1      1

        Latency (ms)   Count   Mean  Median    Max
        mutate(tx)         1  0.030   0.030  0.030
        access(tx)         1  0.020   0.020  0.020
        Seq                1  0.015   0.015  0.015
        access(nonTx)      1  0.010   0.010  0.010
        TXEnd              1  0.002   0.002  0.002
        TXBegin            1  0.001   0.001  0.001

        Transactions: 1 completed, 2.00 ops on average, 2 at most

        ----- stderr -----
        🟡 Skipped 1 malformed line
        ");
    });
}

#[test]
fn test_summary_uses_configured_input() {
    let logs = TestLogs::new();
    let log = logs.write("logs/run.log", SAMPLE_LOG);
    let config = logs.write(
        "profiler.toml",
        &format!("input = {:?}\n", log.to_string_lossy()),
    );

    let output = logs
        .command()
        .arg("--config")
        .arg(&config)
        .arg("summary")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("6 records"));
}

#[test]
fn test_summary_without_input() {
    let logs = TestLogs::new();
    let output = logs.command().arg("summary").output().unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("no input given"));
}
