//! Profiler error types and formatting
//!
//! **`ProfilerError`** is a typed enum for domain errors that can be
//! pattern-matched and tested. Use `.into()` to convert to `anyhow::Error`
//! while preserving the type for `downcast_ref`. Display produces styled
//! output for users.

use std::path::PathBuf;

use color_print::cwrite;

use crate::styling::{ERROR_EMOJI, HINT_EMOJI};

/// Domain errors for loading logs and rendering charts.
#[derive(Debug, Clone)]
pub enum ProfilerError {
    /// Reading an input file or creating an output file failed
    Io {
        path: PathBuf,
        error: String,
    },
    /// The input held no parseable profiler lines
    NoRecords {
        source: PathBuf,
        skipped: usize,
    },
    /// The aggregate behind a chart came out empty
    EmptyChart {
        chart: String,
    },
    /// A per-table chart was requested without a table ID
    MissingTableId {
        chart: String,
    },
    /// plotters failed while drawing
    Render {
        path: PathBuf,
        message: String,
    },
    /// Some of several requested charts failed
    ChartsFailed {
        failed: usize,
        total: usize,
    },
    InvalidConfig {
        message: String,
    },
}

impl std::error::Error for ProfilerError {}

impl std::fmt::Display for ProfilerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfilerError::Io { path, error } => {
                let path = path.display();
                cwrite!(f, "{ERROR_EMOJI} <red>Cannot access <bold>{path}</>: {error}</>")
            }

            ProfilerError::NoRecords { source, skipped } => {
                let source = source.display();
                cwrite!(
                    f,
                    "{ERROR_EMOJI} <red>No profiler records found in <bold>{source}</></> ({skipped} malformed lines)\n\n{HINT_EMOJI} <dim>Lines should look like </>1524272351029000000 17 | Seq [dur] 15000"
                )
            }

            ProfilerError::EmptyChart { chart } => {
                cwrite!(
                    f,
                    "{ERROR_EMOJI} <red>Nothing to plot for <bold>{chart}</></>"
                )
            }

            ProfilerError::MissingTableId { chart } => {
                cwrite!(
                    f,
                    "{ERROR_EMOJI} <red><bold>{chart}</> needs a table ID</>\n\n{HINT_EMOJI} <dim>Pass </>--table-id<dim> or set </>table-id<dim> in the config file</>"
                )
            }

            ProfilerError::Render { path, message } => {
                let path = path.display();
                cwrite!(
                    f,
                    "{ERROR_EMOJI} <red>Failed to draw <bold>{path}</>: {message}</>"
                )
            }

            ProfilerError::ChartsFailed { failed, total } => {
                cwrite!(f, "{ERROR_EMOJI} <red>{failed} of {total} charts failed</>")
            }

            ProfilerError::InvalidConfig { message } => {
                cwrite!(f, "{ERROR_EMOJI} <red>Invalid configuration: {message}</>")
            }
        }
    }
}
