//! Chart rendering.
//!
//! Each [`ChartKind`] runs one aggregation from [`crate::analysis`] and draws
//! the result into one or more PNG files under the output directory. Charts
//! share nothing but the read-only records, so several render in parallel.

mod charts;
mod palette;
mod pie;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use strum::{Display, EnumIter};

use crate::analysis::{self, MethodFilter, Share};
use crate::config::ProfilerConfig;
use crate::error::ProfilerError;
use crate::trace::Record;

use charts::{Labels, ScatterSeries};
pub use pie::PieSlice;

type DrawResult = Result<(), Box<dyn std::error::Error>>;

/// Histogram bin count for the ops-per-transaction chart.
const HISTOGRAM_BINS: usize = 10;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, clap::ValueEnum,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ChartKind {
    /// Distinct threads logging per millisecond
    ActiveThreads,
    /// Sequencer calls per millisecond
    SeqCalls,
    /// Histogram of operations per transaction
    OpsPerTx,
    /// Operations per table, stacked by event
    TableOps,
    /// Access vs mutate calls per transaction
    TableOpsPerTx,
    /// Access vs mutate calls per transaction on one table
    TableIdOpsPerTx,
    /// Share of each event
    AllOps,
    /// Share of each method
    AllMethods,
    /// Share of each method inside transactions
    AllMethodsTx,
    /// Share of each method on one table
    AllMethodsById,
    /// Latency distribution and average per event
    OpLatency,
    /// Average time per event inside transactions
    TxOpTime,
    /// Transactional and non-transactional reads per millisecond
    Reads,
}

impl ChartKind {
    /// Files this chart writes, relative to the output directory.
    pub fn file_names(self) -> &'static [&'static str] {
        match self {
            ChartKind::ActiveThreads => &["count_active_threads.png"],
            ChartKind::SeqCalls => &["count_seq_calls.png"],
            ChartKind::OpsPerTx => &["count_ops_per_tx.png"],
            ChartKind::TableOps => &["count_table_ops.png"],
            ChartKind::TableOpsPerTx => &["count_table_ops_per_tx.png"],
            ChartKind::TableIdOpsPerTx => &["count_id_table_ops_per_tx.png"],
            ChartKind::AllOps => &["count_all_ops.png"],
            ChartKind::AllMethods => &["count_all_methods.png"],
            ChartKind::AllMethodsTx => &["count_all_methods_tx.png"],
            ChartKind::AllMethodsById => &["count_all_methods_by_id.png"],
            ChartKind::OpLatency => &[
                "count_all_ops_time_boxplot.png",
                "count_all_ops_time_bar.png",
            ],
            ChartKind::TxOpTime => &["count_all_ops_time_by_tx.png"],
            ChartKind::Reads => &["count_reads.png"],
        }
    }

    /// Charts that break calls down for a single table.
    pub fn needs_table_id(self) -> bool {
        matches!(self, ChartKind::TableIdOpsPerTx | ChartKind::AllMethodsById)
    }
}

/// Everything a chart needs besides the records.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub output_dir: PathBuf,
    pub size: (u32, u32),
    pub table_id: Option<String>,
    pub access_ops: Vec<String>,
    pub mutate_ops: Vec<String>,
    pub other_threshold: f64,
}

impl ChartOptions {
    pub fn from_config(config: &ProfilerConfig) -> Self {
        Self {
            output_dir: config.output_path(),
            size: (config.width, config.height),
            table_id: config.table_id.clone(),
            access_ops: config.access_ops.clone(),
            mutate_ops: config.mutate_ops.clone(),
            other_threshold: config.other_threshold,
        }
    }

    fn table_id(&self, kind: ChartKind) -> Result<&str, ProfilerError> {
        self.table_id
            .as_deref()
            .ok_or_else(|| ProfilerError::MissingTableId {
                chart: kind.to_string(),
            })
    }
}

/// Result of rendering one chart.
#[derive(Debug)]
pub struct ChartOutcome {
    pub kind: ChartKind,
    pub result: Result<Vec<PathBuf>, ProfilerError>,
}

fn empty(kind: ChartKind) -> ProfilerError {
    ProfilerError::EmptyChart {
        chart: kind.to_string(),
    }
}

fn share_slices(share: &Share) -> Vec<PieSlice> {
    share
        .slices
        .iter()
        .map(|s| PieSlice {
            label: format!("{} ({})", s.label, s.count),
            value: s.count as f64,
        })
        .collect()
}

/// Draw one file, turning plotters failures into [`ProfilerError::Render`].
fn draw(path: PathBuf, f: impl FnOnce(&Path) -> DrawResult) -> Result<PathBuf, ProfilerError> {
    f(&path).map_err(|e| ProfilerError::Render {
        path: path.clone(),
        message: e.to_string(),
    })?;
    log::debug!("Wrote {}", path.display());
    Ok(path)
}

/// Render one chart into `options.output_dir`.
///
/// The output directory must already exist.
pub fn render_chart(
    kind: ChartKind,
    records: &[Record],
    options: &ChartOptions,
) -> Result<Vec<PathBuf>, ProfilerError> {
    let size = options.size;
    let files = kind.file_names();
    let out = |i: usize| options.output_dir.join(files[i]);

    match kind {
        ChartKind::ActiveThreads => {
            let points = analysis::active_threads(records);
            if points.is_empty() {
                return Err(empty(kind));
            }
            let labels = Labels {
                title: "Number of Active Threads vs. Time Elapsed",
                x: "Time Elapsed (ms)",
                y: "Number of Active Threads",
            };
            let series = [ScatterSeries {
                name: "threads",
                points: &points,
                color: palette::ACCESS_BLUE,
            }];
            Ok(vec![draw(out(0), |p| charts::scatter(p, size, labels, &series))?])
        }

        ChartKind::SeqCalls => {
            let points = analysis::event_rate(records, analysis::timeline::SEQ_EVENT);
            if points.is_empty() {
                return Err(empty(kind));
            }
            let labels = Labels {
                title: "Number of Seq Calls vs. Time Elapsed",
                x: "Time Elapsed (ms)",
                y: "Number of Seq Calls",
            };
            let series = [ScatterSeries {
                name: "Seq",
                points: &points,
                color: palette::ACCESS_BLUE,
            }];
            Ok(vec![draw(out(0), |p| charts::scatter(p, size, labels, &series))?])
        }

        ChartKind::OpsPerTx => {
            let bins =
                analysis::normalized_histogram(&analysis::ops_per_tx(records), HISTOGRAM_BINS);
            if bins.is_empty() {
                return Err(empty(kind));
            }
            let labels = Labels {
                title: "Num Ops per Transaction",
                x: "Num Ops",
                y: "Frequency",
            };
            Ok(vec![draw(out(0), |p| charts::histogram(p, size, labels, &bins))?])
        }

        ChartKind::TableOps => {
            let ops = analysis::table_ops(records);
            if ops.is_empty() {
                return Err(empty(kind));
            }
            let events = analysis::table_events(&ops);
            let labels = Labels {
                title: "Operations per Table",
                x: "Num Ops",
                y: "Table",
            };
            Ok(vec![draw(out(0), |p| {
                charts::stacked_table_bars(p, size, labels, &ops, &events)
            })?])
        }

        ChartKind::TableOpsPerTx | ChartKind::TableIdOpsPerTx => {
            let table = match kind {
                ChartKind::TableIdOpsPerTx => Some(options.table_id(kind)?),
                _ => None,
            };
            let counts = analysis::table_ops_per_tx(
                records,
                &options.access_ops,
                &options.mutate_ops,
                table,
            );
            if counts.is_empty() {
                return Err(empty(kind));
            }
            let frequencies = counts.frequencies();
            let labels = Labels {
                title: "Num Ops per Transaction",
                x: "Num Ops",
                y: "Num Txs",
            };
            Ok(vec![draw(out(0), |p| {
                charts::grouped_bars(p, size, labels, &frequencies)
            })?])
        }

        ChartKind::AllOps
        | ChartKind::AllMethods
        | ChartKind::AllMethodsTx
        | ChartKind::AllMethodsById => {
            let counts = match kind {
                ChartKind::AllOps => analysis::event_share(records),
                ChartKind::AllMethods => analysis::method_share(records, MethodFilter::All),
                ChartKind::AllMethodsTx => {
                    analysis::method_share(records, MethodFilter::Transactional)
                }
                _ => analysis::method_share(records, MethodFilter::Table(options.table_id(kind)?)),
            };
            let share = analysis::fold_small_shares(&counts, options.other_threshold);
            if share.is_empty() {
                return Err(empty(kind));
            }
            let slices = share_slices(&share);
            let footer = format!("Total Count: {} ops", share.total);
            let title = match kind {
                ChartKind::AllOps => "Calls per Operation",
                ChartKind::AllMethodsTx => "Calls per Method in Transactions",
                ChartKind::AllMethodsById => "Calls per Method on Table",
                _ => "Calls per Method",
            };
            Ok(vec![draw(out(0), |p| {
                pie::pie(p, size, title, &slices, Some(&footer))
            })?])
        }

        ChartKind::OpLatency => {
            let stats = analysis::op_latency(records);
            if stats.is_empty() {
                return Err(empty(kind));
            }
            let averages = analysis::average_latency(&stats);
            let box_labels = Labels {
                title: "Time per Operation",
                x: "Time (ms)",
                y: "",
            };
            let bar_labels = Labels {
                title: "Average Time per Operation",
                x: "Time (ms)",
                y: "",
            };
            Ok(vec![
                draw(out(0), |p| charts::box_plot(p, size, box_labels, &stats))?,
                draw(out(1), |p| {
                    charts::horizontal_bars(p, size, bar_labels, &averages)
                })?,
            ])
        }

        ChartKind::TxOpTime => {
            let times = analysis::tx_op_time(records);
            if times.values().all(|&ms| ms <= 0.0) {
                return Err(empty(kind));
            }
            let slices: Vec<PieSlice> = times
                .into_iter()
                .map(|(event, ms)| PieSlice {
                    label: format!("{event} ({ms:.3} ms)"),
                    value: ms,
                })
                .collect();
            Ok(vec![draw(out(0), |p| {
                pie::pie(p, size, "Average Time per Transactional Operation", &slices, None)
            })?])
        }

        ChartKind::Reads => {
            let rates = analysis::read_rates(records);
            if rates.is_empty() {
                return Err(empty(kind));
            }
            let labels = Labels {
                title: "Tx and Non-Tx Reads vs. Time",
                x: "Time Elapsed (ms)",
                y: "Number of Reads",
            };
            let series = [
                ScatterSeries {
                    name: "tx reads",
                    points: &rates.tx,
                    color: palette::TX_GREEN,
                },
                ScatterSeries {
                    name: "non-tx reads",
                    points: &rates.non_tx,
                    color: palette::ACCESS_BLUE,
                },
            ];
            Ok(vec![draw(out(0), |p| charts::scatter(p, size, labels, &series))?])
        }
    }
}

/// Render several charts in parallel, returning outcomes in request order.
pub fn render_charts(
    kinds: &[ChartKind],
    records: &[Record],
    options: &ChartOptions,
) -> Vec<ChartOutcome> {
    kinds
        .par_iter()
        .map(|&kind| ChartOutcome {
            kind,
            result: render_chart(kind, records, options),
        })
        .collect()
}
