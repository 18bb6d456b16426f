pub mod config;
pub mod plot;
pub mod summary;
pub mod trace;

use std::path::{Path, PathBuf};

use corfu_profiler::ProfilerError;
use corfu_profiler::config::ProfilerConfig;
use corfu_profiler::styling::{eprintln, format_warning};
use corfu_profiler::trace::{Trace, load};

pub use config::handle_config_show;
pub use plot::{PlotOverrides, handle_plot};
pub use summary::handle_summary;
pub use trace::handle_trace;

/// Pick the input from the command line, falling back to the config.
fn resolve_input(arg: Option<&Path>, config: &ProfilerConfig) -> Result<PathBuf, ProfilerError> {
    arg.map(Path::to_path_buf)
        .or_else(|| config.input_path())
        .ok_or_else(|| ProfilerError::InvalidConfig {
            message: "no input given; pass a file, directory or `-`, or set `input`".into(),
        })
}

/// Load the trace, warning on stderr about lines that did not parse.
fn load_trace(arg: Option<&Path>, config: &ProfilerConfig) -> anyhow::Result<Trace> {
    let input = resolve_input(arg, config)?;
    let trace = load(&input)?;
    if trace.skipped > 0 {
        eprintln!(
            "{}",
            format_warning(&format!(
                "Skipped {} malformed line{}",
                trace.skipped,
                if trace.skipped == 1 { "" } else { "s" }
            ))
        );
    }
    Ok(trace)
}
