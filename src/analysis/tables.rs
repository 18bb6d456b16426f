//! Per-table operation breakdown.

use std::collections::BTreeMap;

use crate::trace::Record;

/// Operation counts per table: table ID → event → count.
pub type TableOps = BTreeMap<String, BTreeMap<String, usize>>;

/// Count events per table for every record that names one or more tables.
pub fn table_ops(records: &[Record]) -> TableOps {
    let mut counts = TableOps::new();
    for record in records {
        for table in &record.table_ids {
            *counts
                .entry(table.clone())
                .or_default()
                .entry(record.event.clone())
                .or_default() += 1;
        }
    }
    counts
}

/// All event names appearing in `ops`, sorted.
pub fn table_events(ops: &TableOps) -> Vec<String> {
    let mut events: Vec<String> = ops.values().flat_map(|e| e.keys().cloned()).collect();
    events.sort();
    events.dedup();
    events
}
