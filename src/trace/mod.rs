//! Profiler log parsing, loading and Chrome Trace Format export.
//!
//! The CorfuDB workload generator's profiler writes one line per traced call
//! with a nanosecond timestamp, the calling thread, the event name and
//! optional `[dur]`, `[method]`, `[id]`/`[ids]` fields.
//!
//! # Usage
//!
//! ```bash
//! # Chrome Trace Format for chrome://tracing or https://ui.perfetto.dev
//! corfu-profiler trace client-1524272351029.log > trace.json
//!
//! # Per-thread time spent, via Perfetto's trace_processor
//! trace_processor trace.json -Q 'SELECT tid, SUM(dur)/1e6 as ms FROM slice JOIN thread_track ON slice.track_id = thread_track.id JOIN thread USING (utid) GROUP BY tid'
//! ```

pub mod chrome;
pub mod load;
pub mod parse;

// Re-export main types for convenience
pub use chrome::to_chrome_trace;
pub use load::{STDIN, Trace, load, load_dir, load_file};
pub use parse::{ParseError, ParseReport, Record, parse_line, parse_lines};
