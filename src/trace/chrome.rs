//! Chrome Trace Format output for profiler records.
//!
//! Converts records to Chrome Trace Event Format JSON, which can be
//! visualized in chrome://tracing or <https://ui.perfetto.dev> to see what
//! each generator thread was doing over time.
//!
//! # Event Types
//!
//! - **Complete events** (`ph: "X"`): records carrying `[dur]`
//! - **Instant events** (`ph: "I"`): records without a duration, such as
//!   `TXBegin` markers
//!
//! # Format Reference
//!
//! - [Trace Event Format](https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU/)
//! - [Perfetto UI](https://ui.perfetto.dev)

use serde::Serialize;

use super::Record;

/// A Chrome Trace Event in the Trace Event Format.
///
/// Complete events ("X") have `dur` and no `s`; instant events ("I") have
/// `s` (scope) and no `dur`.
#[derive(Debug, Serialize)]
struct TraceEvent<'a> {
    /// Event name (displayed in the UI)
    name: &'a str,
    /// Phase: "X" for complete events, "I" for instant events
    ph: &'static str,
    /// Timestamp in microseconds
    ts: u64,
    /// Duration in microseconds (for "X" phase events only)
    #[serde(skip_serializing_if = "Option::is_none")]
    dur: Option<u64>,
    /// Scope for instant events; "t" pins the marker to its thread
    #[serde(skip_serializing_if = "Option::is_none")]
    s: Option<&'static str>,
    /// Process ID (the generator is one process)
    pid: u32,
    tid: u64,
    /// "tx" for transactional records, for filtering in the UI
    #[serde(skip_serializing_if = "Option::is_none")]
    cat: Option<&'static str>,
    args: TraceEventArgs<'a>,
}

/// Custom arguments attached to trace events.
#[derive(Debug, Serialize)]
struct TraceEventArgs<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'a str>,
    #[serde(skip_serializing_if = "no_tables")]
    tables: &'a [String],
    /// Duration in milliseconds (human-readable, only for complete events)
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<f64>,
}

fn no_tables(tables: &&[String]) -> bool {
    tables.is_empty()
}

/// The top-level Chrome Trace Format structure.
#[derive(Debug, Serialize)]
struct ChromeTrace<'a> {
    #[serde(rename = "traceEvents")]
    trace_events: Vec<TraceEvent<'a>>,
    #[serde(rename = "displayTimeUnit")]
    display_time_unit: &'static str,
    #[serde(rename = "meta_generator")]
    meta_generator: &'static str,
}

fn to_event(record: &Record) -> TraceEvent<'_> {
    let cat = record.transactional.then_some("tx");
    let args = TraceEventArgs {
        method: record.method.as_deref(),
        tables: &record.table_ids,
        duration_ms: record.duration_ns.map(|_| record.duration_ms()),
    };

    match record.duration_ns {
        Some(dur_ns) => TraceEvent {
            name: &record.event,
            ph: "X",
            ts: record.timestamp_ns / 1000,
            dur: Some(dur_ns / 1000),
            s: None,
            pid: 1,
            tid: record.thread_id,
            cat,
            args,
        },
        None => TraceEvent {
            name: &record.event,
            ph: "I",
            ts: record.timestamp_ns / 1000,
            dur: None,
            s: Some("t"),
            pid: 1,
            tid: record.thread_id,
            cat,
            args,
        },
    }
}

/// Convert records to pretty-printed Chrome Trace Format JSON.
pub fn to_chrome_trace(records: &[Record]) -> serde_json::Result<String> {
    let chrome_trace = ChromeTrace {
        trace_events: records.iter().map(to_event).collect(),
        display_time_unit: "ms",
        meta_generator: "corfu-profiler trace",
    };
    serde_json::to_string_pretty(&chrome_trace)
}
