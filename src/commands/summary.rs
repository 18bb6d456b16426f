use std::collections::BTreeMap;
use std::path::Path;

use corfu_profiler::analysis::{self, MethodFilter};
use corfu_profiler::config::ProfilerConfig;
use corfu_profiler::styling::{format_table, print};
use corfu_profiler::trace::Trace;

pub fn handle_summary(input: Option<&Path>, config: &ProfilerConfig) -> anyhow::Result<()> {
    let trace = super::load_trace(input, config)?;
    print!("{}", format_summary(&trace));
    Ok(())
}

/// Entries ordered by count, largest first, then by name.
fn by_count(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Event counts, method counts, latencies and transaction sizes as text
/// tables.
pub fn format_summary(trace: &Trace) -> String {
    let records = &trace.records;
    let mut out = format!(
        "{} from {}, {} skipped\n",
        plural(records.len(), "record"),
        plural(trace.sources.len(), "source"),
        trace.skipped
    );

    let events = analysis::event_share(records);
    let total = records.len().max(1) as f64;
    let rows: Vec<Vec<String>> = by_count(&events)
        .into_iter()
        .map(|(event, count)| {
            vec![
                event.to_string(),
                count.to_string(),
                format!("{:.1}%", count as f64 / total * 100.0),
            ]
        })
        .collect();
    out.push('\n');
    out.push_str(&format_table(&["Event", "Count", "Share"], &rows));

    let methods = analysis::method_share(records, MethodFilter::All);
    if !methods.is_empty() {
        let in_tx = analysis::method_share(records, MethodFilter::Transactional);
        let rows: Vec<Vec<String>> = by_count(&methods)
            .into_iter()
            .map(|(method, count)| {
                vec![
                    method.to_string(),
                    count.to_string(),
                    in_tx.get(method).copied().unwrap_or(0).to_string(),
                ]
            })
            .collect();
        out.push('\n');
        out.push_str(&format_table(&["Method", "Calls", "In tx"], &rows));
    }

    let rows: Vec<Vec<String>> = analysis::op_latency(records)
        .into_iter()
        .map(|s| {
            vec![
                s.event,
                s.count.to_string(),
                format!("{:.3}", s.mean),
                format!("{:.3}", s.median),
                format!("{:.3}", s.max),
            ]
        })
        .collect();
    out.push('\n');
    out.push_str(&format_table(
        &["Latency (ms)", "Count", "Mean", "Median", "Max"],
        &rows,
    ));

    let sizes = analysis::ops_per_tx(records);
    out.push('\n');
    match sizes.iter().max() {
        Some(max) => {
            let mean = sizes.iter().sum::<usize>() as f64 / sizes.len() as f64;
            out.push_str(&format!(
                "Transactions: {} completed, {mean:.2} ops on average, {max} at most\n",
                sizes.len()
            ));
        }
        None => out.push_str("Transactions: none completed\n"),
    }
    out
}
