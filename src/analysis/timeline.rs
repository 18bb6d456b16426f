//! Per-millisecond activity series.
//!
//! Each series buckets records by the whole millisecond they started in and
//! reports elapsed time relative to the series' own first bucket.

use std::collections::{BTreeMap, HashSet};

use crate::trace::Record;

pub const SEQ_EVENT: &str = "Seq";
pub const TX_READ_EVENT: &str = "access(tx)";
pub const NON_TX_READ_EVENT: &str = "access(nonTx)";

/// One point of a per-millisecond series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePoint {
    /// Milliseconds since the series' first bucket
    pub elapsed_ms: u64,
    pub count: usize,
}

fn to_series(buckets: BTreeMap<u64, usize>) -> Vec<TimePoint> {
    let Some(&first) = buckets.keys().next() else {
        return Vec::new();
    };
    buckets
        .into_iter()
        .map(|(bucket, count)| TimePoint {
            elapsed_ms: bucket - first,
            count,
        })
        .collect()
}

/// Count matching records per millisecond.
fn count_per_ms<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    mut matches: impl FnMut(&Record) -> bool,
) -> Vec<TimePoint> {
    let mut buckets: BTreeMap<u64, usize> = BTreeMap::new();
    for record in records {
        if matches(record) {
            *buckets.entry(record.bucket_ms()).or_default() += 1;
        }
    }
    to_series(buckets)
}

/// Number of distinct threads that logged anything in each millisecond.
pub fn active_threads(records: &[Record]) -> Vec<TimePoint> {
    let mut threads: BTreeMap<u64, HashSet<u64>> = BTreeMap::new();
    for record in records {
        threads
            .entry(record.bucket_ms())
            .or_default()
            .insert(record.thread_id);
    }
    to_series(
        threads
            .into_iter()
            .map(|(bucket, ids)| (bucket, ids.len()))
            .collect(),
    )
}

/// Number of `event` records per millisecond (e.g. sequencer calls).
pub fn event_rate(records: &[Record], event: &str) -> Vec<TimePoint> {
    count_per_ms(records, |r| r.is_event(event))
}

/// Transactional and non-transactional reads per millisecond.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadRates {
    pub tx: Vec<TimePoint>,
    pub non_tx: Vec<TimePoint>,
}

impl ReadRates {
    pub fn is_empty(&self) -> bool {
        self.tx.is_empty() && self.non_tx.is_empty()
    }
}

pub fn read_rates(records: &[Record]) -> ReadRates {
    ReadRates {
        tx: event_rate(records, TX_READ_EVENT),
        non_tx: event_rate(records, NON_TX_READ_EVENT),
    }
}
