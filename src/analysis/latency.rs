//! Call latency distribution per event.

use std::collections::BTreeMap;

use crate::trace::Record;

/// Box-plot statistics for one event's durations, in milliseconds.
///
/// Whiskers reach the most extreme samples within 1.5 IQR of the box.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencyStats {
    pub event: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
}

/// Linear-interpolated percentile of sorted samples.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

impl LatencyStats {
    /// Summarize `samples`. Returns `None` when there are none.
    pub fn from_samples(event: &str, mut samples: Vec<f64>) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        samples.sort_by(f64::total_cmp);

        let q1 = percentile(&samples, 0.25);
        let q3 = percentile(&samples, 0.75);
        let reach = 1.5 * (q3 - q1);
        let min = samples[0];
        let max = samples[samples.len() - 1];
        let whisker_low = samples
            .iter()
            .copied()
            .find(|&v| v >= q1 - reach)
            .unwrap_or(min);
        let whisker_high = samples
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + reach)
            .unwrap_or(max);

        Some(Self {
            event: event.to_string(),
            count: samples.len(),
            min,
            q1,
            median: percentile(&samples, 0.5),
            q3,
            max,
            mean: samples.iter().sum::<f64>() / samples.len() as f64,
            whisker_low,
            whisker_high,
        })
    }
}

/// Latency statistics for every event, slowest mean first.
///
/// Records without `[dur]` contribute zero-length samples.
pub fn op_latency(records: &[Record]) -> Vec<LatencyStats> {
    let mut samples: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        samples
            .entry(record.event.as_str())
            .or_default()
            .push(record.duration_ms());
    }

    let mut stats: Vec<LatencyStats> = samples
        .into_iter()
        .filter_map(|(event, values)| LatencyStats::from_samples(event, values))
        .collect();
    stats.sort_by(|a, b| b.mean.total_cmp(&a.mean).then_with(|| a.event.cmp(&b.event)));
    stats
}

/// Mean latency per event, fastest first.
pub fn average_latency(stats: &[LatencyStats]) -> Vec<(String, f64)> {
    let mut averages: Vec<(String, f64)> =
        stats.iter().map(|s| (s.event.clone(), s.mean)).collect();
    averages.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    averages
}
