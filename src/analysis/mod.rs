//! Aggregations over parsed profiler records.
//!
//! Every function here is a single pass over `&[Record]` (sorted by
//! timestamp) returning plain data. Rendering lives in [`crate::render`].

pub mod latency;
pub mod shares;
pub mod tables;
pub mod timeline;
pub mod transactions;

pub use latency::{LatencyStats, average_latency, op_latency};
pub use shares::{
    DEFAULT_OTHER_THRESHOLD, MethodFilter, Share, Slice, event_share, fold_small_shares,
    method_share,
};
pub use tables::{TableOps, table_events, table_ops};
pub use timeline::{ReadRates, TimePoint, active_threads, event_rate, read_rates};
pub use transactions::{
    HistogramBin, OpsFrequency, TxOpCounts, normalized_histogram, ops_per_tx, table_ops_per_tx,
    tx_op_time,
};
