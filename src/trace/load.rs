//! Load profiler logs from a file, a directory tree or stdin.

use std::io::Read;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use indexmap::IndexSet;

use super::parse::{Record, parse_lines};
use crate::error::ProfilerError;

/// Input path meaning "read stdin".
pub const STDIN: &str = "-";

/// Every record from one or more log files, ordered by start time.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    /// Records sorted by timestamp; equal timestamps keep input order
    pub records: Vec<Record>,
    /// Distinct event names in first-seen input order
    pub events: IndexSet<String>,
    /// Lines that failed to parse across all sources
    pub skipped: usize,
    /// Files the records came from
    pub sources: Vec<PathBuf>,
}

impl Trace {
    /// Build a trace from in-memory text.
    pub fn from_text(text: &str, source: impl Into<PathBuf>) -> Self {
        let mut trace = Self::default();
        trace.extend(text, source.into());
        trace.finish();
        trace
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn extend(&mut self, text: &str, source: PathBuf) {
        let report = parse_lines(text);
        log::debug!(
            "{}: {} records, {} skipped",
            source.display(),
            report.records.len(),
            report.skipped
        );
        for record in &report.records {
            if !self.events.contains(&record.event) {
                self.events.insert(record.event.clone());
            }
        }
        self.records.extend(report.records);
        self.skipped += report.skipped;
        self.sources.push(source);
    }

    fn finish(&mut self) {
        self.records.sort_by_key(|r| r.timestamp_ns);
    }

    fn require_records(self, source: &Path) -> Result<Self, ProfilerError> {
        if self.is_empty() {
            return Err(ProfilerError::NoRecords {
                source: source.to_path_buf(),
                skipped: self.skipped,
            });
        }
        Ok(self)
    }
}

fn read_text(path: &Path) -> Result<String, ProfilerError> {
    let bytes = std::fs::read(path).map_err(|e| ProfilerError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Load a single log file.
pub fn load_file(path: &Path) -> Result<Trace, ProfilerError> {
    let text = read_text(path)?;
    Trace::from_text(&text, path).require_records(path)
}

/// Load every regular file under `dir`, recursively, in path order.
///
/// Hidden and git-ignored files are included: harness output directories
/// are read as-is.
pub fn load_dir(dir: &Path) -> Result<Trace, ProfilerError> {
    let mut files = Vec::new();
    for entry in WalkBuilder::new(dir).standard_filters(false).build() {
        let entry = entry.map_err(|e| ProfilerError::Io {
            path: dir.to_path_buf(),
            error: e.to_string(),
        })?;
        if entry.file_type().is_some_and(|t| t.is_file()) {
            files.push(entry.into_path());
        }
    }
    files.sort();

    let mut trace = Trace::default();
    for path in files {
        log::info!("Reading {}", path.display());
        let text = read_text(&path)?;
        trace.extend(&text, path);
    }
    trace.finish();
    trace.require_records(dir)
}

/// Load stdin as a single log.
pub fn load_stdin() -> Result<Trace, ProfilerError> {
    let mut text = String::new();
    std::io::stdin()
        .lock()
        .read_to_string(&mut text)
        .map_err(|e| ProfilerError::Io {
            path: PathBuf::from(STDIN),
            error: e.to_string(),
        })?;
    let source = Path::new(STDIN);
    Trace::from_text(&text, source).require_records(source)
}

/// Load `path` as a directory tree, a file, or stdin when it is `-`.
pub fn load(path: &Path) -> Result<Trace, ProfilerError> {
    if path.as_os_str() == STDIN {
        load_stdin()
    } else if path.is_dir() {
        load_dir(path)
    } else {
        load_file(path)
    }
}
