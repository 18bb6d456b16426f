//! Per-transaction aggregations.
//!
//! A transaction runs from `TXBegin` to `TXEnd` on one thread. A second
//! `TXBegin` on the same thread restarts the count, and a `TXEnd` with no
//! transaction open on its thread is ignored.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::trace::Record;

pub const TX_BEGIN: &str = "TXBegin";
pub const TX_END: &str = "TXEnd";

/// Number of operations each completed transaction performed.
///
/// A thread's counter stays live after `TXEnd`, so operations logged between
/// two transactions on that thread count toward the next one.
pub fn ops_per_tx(records: &[Record]) -> Vec<usize> {
    let mut open: HashMap<u64, usize> = HashMap::new();
    let mut counts = Vec::new();
    for record in records {
        if record.is_event(TX_BEGIN) {
            open.insert(record.thread_id, 0);
        } else if record.is_event(TX_END) {
            if let Some(count) = open.get_mut(&record.thread_id) {
                counts.push(*count);
                *count = 0;
            }
        } else if let Some(count) = open.get_mut(&record.thread_id) {
            *count += 1;
        }
    }
    counts
}

/// One bar of a normalized histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    /// Share of all samples falling in this bin
    pub fraction: f64,
}

/// Split `samples` into `bins` equal-width bins whose heights sum to 1.
///
/// When every sample is equal, the range is widened by half a unit on each
/// side so the single bar has a width.
pub fn normalized_histogram(samples: &[usize], bins: usize) -> Vec<HistogramBin> {
    let (Some(&min), Some(&max)) = (samples.iter().min(), samples.iter().max()) else {
        return Vec::new();
    };
    let bins = bins.max(1);
    let (lo, hi) = if min == max {
        (min as f64 - 0.5, max as f64 + 0.5)
    } else {
        (min as f64, max as f64)
    };
    let width = (hi - lo) / bins as f64;
    let weight = 1.0 / samples.len() as f64;

    let mut fractions = vec![0.0; bins];
    for &sample in samples {
        // The last bin is closed on the right
        let index = (((sample as f64 - lo) / width) as usize).min(bins - 1);
        fractions[index] += weight;
    }

    fractions
        .into_iter()
        .enumerate()
        .map(|(i, fraction)| HistogramBin {
            start: lo + width * i as f64,
            end: lo + width * (i + 1) as f64,
            fraction,
        })
        .collect()
}

/// Access and mutate operation counts, one entry per completed transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxOpCounts {
    pub access: Vec<usize>,
    pub mutate: Vec<usize>,
}

/// How many transactions performed a given number of operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpsFrequency {
    pub ops: usize,
    pub access_txs: usize,
    pub mutate_txs: usize,
}

impl TxOpCounts {
    pub fn is_empty(&self) -> bool {
        self.access.is_empty()
    }

    /// Number of transactions per operation count, over the union of the
    /// counts seen for either class.
    pub fn frequencies(&self) -> Vec<OpsFrequency> {
        let mut by_ops: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
        for &n in &self.access {
            by_ops.entry(n).or_default().0 += 1;
        }
        for &n in &self.mutate {
            by_ops.entry(n).or_default().1 += 1;
        }
        by_ops
            .into_iter()
            .map(|(ops, (access_txs, mutate_txs))| OpsFrequency {
                ops,
                access_txs,
                mutate_txs,
            })
            .collect()
    }
}

/// Count access- and mutate-method calls per transaction.
///
/// With `table_id` set, only calls that touched that table count. A call
/// counts once per class even if its method appears in both lists.
pub fn table_ops_per_tx(
    records: &[Record],
    access_ops: &[String],
    mutate_ops: &[String],
    table_id: Option<&str>,
) -> TxOpCounts {
    let mut open: HashMap<u64, (usize, usize)> = HashMap::new();
    let mut result = TxOpCounts::default();
    for record in records {
        if record.is_event(TX_BEGIN) {
            open.insert(record.thread_id, (0, 0));
        } else if record.is_event(TX_END) {
            if let Some(counts) = open.get_mut(&record.thread_id) {
                result.access.push(counts.0);
                result.mutate.push(counts.1);
                *counts = (0, 0);
            }
        } else if table_id.is_none_or(|id| record.has_table(id))
            && let Some(counts) = open.get_mut(&record.thread_id)
        {
            if record.mentions_method(access_ops) {
                counts.0 += 1;
            }
            if record.mentions_method(mutate_ops) {
                counts.1 += 1;
            }
        }
    }
    result
}

/// Average duration (ms) of each event across all transactional records.
///
/// Records from `TXBegin` through `TXEnd` inclusive count, in first-seen
/// event order.
pub fn tx_op_time(records: &[Record]) -> IndexMap<String, f64> {
    let mut in_tx: HashMap<u64, bool> = HashMap::new();
    let mut totals: IndexMap<String, (f64, usize)> = IndexMap::new();
    for record in records {
        if record.is_event(TX_BEGIN) {
            in_tx.insert(record.thread_id, true);
        }
        if in_tx.get(&record.thread_id).copied().unwrap_or(false) {
            let entry = totals.entry(record.event.clone()).or_default();
            entry.0 += record.duration_ms();
            entry.1 += 1;
        }
        if record.is_event(TX_END) {
            in_tx.insert(record.thread_id, false);
        }
    }
    totals
        .into_iter()
        .map(|(event, (total, n))| (event, total / n as f64))
        .collect()
}
