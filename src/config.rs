use config::{Case, Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};

use crate::analysis::DEFAULT_OTHER_THRESHOLD;

/// Settings for locating logs and drawing charts.
///
/// # Examples
///
/// ```toml
/// input = "~/corfu/generator/profiler/data"
/// output-dir = "results"
///
/// # Table whose calls the per-table charts break down
/// table-id = "7c4f2940-7893-3334-a6cb-7a87bf045c0d"
///
/// # Methods counted as reads and writes in the per-transaction charts
/// access-ops = ["containsKey", "get"]
/// mutate-ops = ["put"]
///
/// # Pie slices under this share of the total fold into "Other"
/// other-threshold = 0.015
///
/// width = 1024
/// height = 768
/// ```
///
/// Config file location:
/// - Linux: `$XDG_CONFIG_HOME/corfu-profiler/config.toml` or `~/.config/corfu-profiler/config.toml`
/// - macOS: `$XDG_CONFIG_HOME/corfu-profiler/config.toml` or `~/.config/corfu-profiler/config.toml`
/// - Windows: `%APPDATA%\corfu-profiler\config.toml`
///
/// Environment variables: `CORFU_PROFILER_OUTPUT_DIR`, `CORFU_PROFILER_TABLE_ID`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProfilerConfig {
    /// Log file or directory of log files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    pub output_dir: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,

    pub access_ops: Vec<String>,

    pub mutate_ops: Vec<String>,

    pub other_threshold: f64,

    pub width: u32,

    pub height: u32,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            input: None,
            output_dir: "results".to_string(),
            table_id: None,
            access_ops: vec!["containsKey".to_string()],
            mutate_ops: vec!["put".to_string()],
            other_threshold: DEFAULT_OTHER_THRESHOLD,
            width: 1024,
            height: 768,
        }
    }
}

impl ProfilerConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. Default values
    /// 2. `explicit` if given, otherwise the platform config file if it exists
    /// 3. Environment variables (`CORFU_PROFILER_*`)
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(explicit, environment())
    }

    fn load_with_env(explicit: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("output-dir", defaults.output_dir)?
            .set_default("access-ops", defaults.access_ops)?
            .set_default("mutate-ops", defaults.mutate_ops)?
            .set_default("other-threshold", defaults.other_threshold)?
            .set_default("width", i64::from(defaults.width))?
            .set_default("height", i64::from(defaults.height))?;

        match explicit {
            // An explicitly named file must exist
            Some(path) => builder = builder.add_source(File::from(path).required(true)),
            None => {
                if let Some(config_path) = config_path()
                    && config_path.exists()
                {
                    log::debug!("Loading config from {}", config_path.display());
                    builder = builder.add_source(File::from(config_path));
                }
            }
        }

        let config: Self = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.other_threshold) {
            return Err(ConfigError::Message(format!(
                "other-threshold must be in [0, 1), got {}",
                self.other_threshold
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Message(
                "width and height must be non-zero".into(),
            ));
        }
        if self.output_dir.is_empty() {
            return Err(ConfigError::Message("output-dir cannot be empty".into()));
        }
        Ok(())
    }

    /// The output directory with `~` and environment variables expanded.
    pub fn output_path(&self) -> PathBuf {
        expand_path(&self.output_dir)
    }

    /// The configured input with `~` and environment variables expanded.
    pub fn input_path(&self) -> Option<PathBuf> {
        self.input.as_deref().map(expand_path)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

/// `CORFU_PROFILER_*` variables, with comma-separated method lists
/// (`CORFU_PROFILER_ACCESS_OPS=containsKey,get`).
fn environment() -> Environment {
    Environment::with_prefix("CORFU_PROFILER")
        .prefix_separator("_")
        .convert_case(Case::Kebab)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("access-ops")
        .with_list_parse_key("mutate-ops")
}

/// Expand `~` and `$VAR` in a user-supplied path, keeping it as-is if a
/// variable is undefined.
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            log::debug!("Not expanding {raw}: {e}");
            PathBuf::from(raw)
        }
    }
}

/// Location of the user config file.
///
/// `CORFU_PROFILER_CONFIG_PATH` overrides the platform default.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CORFU_PROFILER_CONFIG_PATH") {
        return Some(PathBuf::from(path));
    }

    // choose_base_strategy uses:
    // - XDG on Linux (respects XDG_CONFIG_HOME, falls back to ~/.config)
    // - XDG on macOS (~/.config instead of ~/Library/Application Support)
    // - Windows conventions on Windows (%APPDATA%)
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("corfu-profiler").join("config.toml"))
}
