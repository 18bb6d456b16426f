use std::path::{Path, PathBuf};

use anyhow::Context;
use strum::IntoEnumIterator;

use corfu_profiler::ProfilerError;
use corfu_profiler::config::ProfilerConfig;
use corfu_profiler::render::{ChartKind, ChartOptions, render_charts};
use corfu_profiler::styling::{SUCCESS_EMOJI, eprintln, format_warning, println};

/// Command-line values that take precedence over the config.
#[derive(Debug, Default)]
pub struct PlotOverrides {
    pub output_dir: Option<PathBuf>,
    pub table_id: Option<String>,
    pub access_ops: Vec<String>,
    pub mutate_ops: Vec<String>,
}

impl PlotOverrides {
    fn apply(self, mut options: ChartOptions) -> ChartOptions {
        if let Some(dir) = self.output_dir {
            options.output_dir = dir;
        }
        if self.table_id.is_some() {
            options.table_id = self.table_id;
        }
        if !self.access_ops.is_empty() {
            options.access_ops = self.access_ops;
        }
        if !self.mutate_ops.is_empty() {
            options.mutate_ops = self.mutate_ops;
        }
        options
    }
}

/// Charts to draw: the requested ones, or every chart the options allow.
///
/// Per-table charts are dropped from the default set when no table ID is
/// configured. Explicitly requested ones are kept so they fail visibly.
fn select_charts(requested: Vec<ChartKind>, options: &ChartOptions) -> Vec<ChartKind> {
    if !requested.is_empty() {
        let mut kinds = requested;
        let mut seen = Vec::with_capacity(kinds.len());
        kinds.retain(|kind| {
            let first = !seen.contains(kind);
            seen.push(*kind);
            first
        });
        return kinds;
    }

    ChartKind::iter()
        .filter(|kind| {
            let skip = kind.needs_table_id() && options.table_id.is_none();
            if skip {
                eprintln!(
                    "{}",
                    format_warning(&format!("Skipping {kind}: no table-id configured"))
                );
            }
            !skip
        })
        .collect()
}

pub fn handle_plot(
    input: Option<&Path>,
    charts: Vec<ChartKind>,
    overrides: PlotOverrides,
    config: &ProfilerConfig,
) -> anyhow::Result<()> {
    let trace = super::load_trace(input, config)?;
    let options = overrides.apply(ChartOptions::from_config(config));
    let kinds = select_charts(charts, &options);

    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            options.output_dir.display()
        )
    })?;

    log::info!(
        "Drawing {} charts from {} records into {}",
        kinds.len(),
        trace.records.len(),
        options.output_dir.display()
    );

    let outcomes = render_charts(&kinds, &trace.records, &options);
    let total = outcomes.len();
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(paths) => {
                for path in paths {
                    println!("{SUCCESS_EMOJI} {}", path.display());
                }
            }
            Err(e) => errors.push(e),
        }
    }

    // A lone failure is reported as itself
    if total == 1
        && let Some(e) = errors.pop()
    {
        return Err(e.into());
    }
    if errors.is_empty() {
        return Ok(());
    }
    for e in &errors {
        eprintln!("{e}");
    }
    Err(ProfilerError::ChartsFailed {
        failed: errors.len(),
        total,
    }
    .into())
}
