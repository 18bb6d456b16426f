use std::path::Path;

use anyhow::Context;

use corfu_profiler::config::{ProfilerConfig, config_path};
use corfu_profiler::styling::print;

/// Print the effective configuration, prefixed by a comment naming its file.
pub fn handle_config_show(explicit: Option<&Path>, config: &ProfilerConfig) -> anyhow::Result<()> {
    let source = match explicit.map(Path::to_path_buf).or_else(config_path) {
        Some(path) if path.exists() => format!("# Config file: {}", path.display()),
        Some(path) => format!("# Config file: {} (not found, using defaults)", path.display()),
        None => "# No config file location (using defaults)".to_string(),
    };
    let toml = config.to_toml().context("Failed to serialize config")?;
    print!("{source}\n\n{toml}");
    Ok(())
}
