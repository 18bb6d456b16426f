//! Integration tests for `corfu-profiler trace`.

use std::io::Write;
use std::process::Stdio;

use crate::common::{SAMPLE_LOG, TestLogs, stderr, stdout};

fn trace_events(json: &str) -> Vec<serde_json::Value> {
    let parsed: serde_json::Value = serde_json::from_str(json).expect("Should output valid JSON");
    assert_eq!(parsed["displayTimeUnit"], "ms");
    parsed["traceEvents"]
        .as_array()
        .expect("Should have traceEvents array")
        .clone()
}

#[test]
fn test_trace_from_file() {
    let logs = TestLogs::new();
    let log = logs.write("run.log", SAMPLE_LOG);

    let output = logs.command().arg("trace").arg(&log).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let events = trace_events(&stdout(&output));
    assert_eq!(events.len(), 6, "malformed line should be dropped");

    assert_eq!(events[0]["name"], "TXBegin");
    assert_eq!(events[0]["ph"], "X");
    assert_eq!(events[0]["ts"], 1_524_272_351_029_000u64);
    assert_eq!(events[0]["dur"], 1);

    assert_eq!(events[1]["cat"], "tx");
    assert_eq!(events[1]["args"]["method"], "containsKey");
    assert_eq!(events[1]["args"]["tables"][0], "7c4f2940");

    assert_eq!(events[2]["name"], "Seq");
    assert_eq!(events[2]["tid"], 2);
    assert!(events[2]["cat"].is_null());

    assert!(stderr(&output).contains("Skipped 1 malformed line"));
}

#[test]
fn test_trace_from_stdin() {
    let logs = TestLogs::new();
    let mut child = logs
        .command()
        .args(["trace", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"2000 4 | Checkpoint\n1000 4 | Seq [dur] 5000\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let events = trace_events(&stdout(&output));
    assert_eq!(events.len(), 2);
    // Sorted by timestamp
    assert_eq!(events[0]["name"], "Seq");
    assert_eq!(events[1]["name"], "Checkpoint");
    assert_eq!(events[1]["ph"], "I");
    assert_eq!(events[1]["s"], "t");
    assert!(events[1]["dur"].is_null());
}

#[test]
fn test_trace_directory_merges_files() {
    let logs = TestLogs::new();
    logs.write("data/client-b.log", "3000000 2 | Seq [dur] 1000\n");
    logs.write("data/nested/client-a.log", "1000000 1 | Seq [dur] 1000\n");

    let output = logs.command().args(["trace", "data"]).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let events = trace_events(&stdout(&output));
    let threads: Vec<u64> = events.iter().map(|e| e["tid"].as_u64().unwrap()).collect();
    assert_eq!(threads, vec![1, 2]);
}

#[test]
fn test_trace_missing_file() {
    let logs = TestLogs::new();
    let output = logs
        .command()
        .args(["trace", "/nonexistent/path/to/file.log"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Cannot access"));
}

#[test]
fn test_trace_without_records() {
    let logs = TestLogs::new();
    let log = logs.write("junk.log", "not a record\nneither is this\n");

    let output = logs.command().arg("trace").arg(&log).output().unwrap();

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("No profiler records found"), "{err}");
    assert!(err.contains("2 malformed lines"), "{err}");
}
