//! Call counts by event or method, prepared for pie charts.

use std::collections::BTreeMap;

use crate::trace::Record;

pub const OTHER_LABEL: &str = "Other";

/// Shares below this fraction of the total fold into the "Other" slice.
pub const DEFAULT_OTHER_THRESHOLD: f64 = 0.015;

/// Which `[method]` lines to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodFilter<'a> {
    All,
    /// Only lines mentioning `(tx)`
    Transactional,
    /// Only lines touching this table
    Table(&'a str),
}

impl MethodFilter<'_> {
    fn matches(&self, record: &Record) -> bool {
        match self {
            MethodFilter::All => true,
            MethodFilter::Transactional => record.transactional,
            MethodFilter::Table(id) => record.has_table(id),
        }
    }
}

/// Number of records per event name.
pub fn event_share(records: &[Record]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.event.clone()).or_default() += 1;
    }
    counts
}

/// Number of calls per method, over lines carrying `[method]`.
pub fn method_share(records: &[Record], filter: MethodFilter<'_>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records.iter().filter(|r| filter.matches(r)) {
        if let Some(method) = &record.method {
            *counts.entry(method.clone()).or_default() += 1;
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    pub label: String,
    pub count: usize,
}

/// Pie slices in ascending order, with small entries folded into "Other".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// Ascending by (count, label); the "Other" slice is always last
    pub slices: Vec<Slice>,
    pub total: usize,
}

impl Share {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count folded into the trailing "Other" slice.
    pub fn other(&self) -> usize {
        self.slices.last().map_or(0, |s| s.count)
    }
}

/// Sort counts ascending by (count, name) and fold every entry whose share
/// of the total is below `threshold` into a trailing "Other" slice.
pub fn fold_small_shares(counts: &BTreeMap<String, usize>, threshold: f64) -> Share {
    let total: usize = counts.values().sum();
    let mut sorted: Vec<(&String, usize)> = counts.iter().map(|(k, &v)| (k, v)).collect();
    sorted.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    let mut slices = Vec::new();
    let mut other = 0;
    for (label, count) in sorted {
        if (count as f64) / (total as f64) < threshold {
            other += count;
        } else {
            slices.push(Slice {
                label: label.clone(),
                count,
            });
        }
    }
    slices.push(Slice {
        label: OTHER_LABEL.to_string(),
        count: other,
    });

    Share { slices, total }
}
