use std::path::Path;

use anyhow::Context;

use corfu_profiler::config::ProfilerConfig;
use corfu_profiler::styling::println;
use corfu_profiler::trace::to_chrome_trace;

/// Print the records as Chrome Trace Event Format JSON.
pub fn handle_trace(input: Option<&Path>, config: &ProfilerConfig) -> anyhow::Result<()> {
    let trace = super::load_trace(input, config)?;
    let json = to_chrome_trace(&trace.records).context("Failed to serialize trace")?;
    println!("{json}");
    Ok(())
}
