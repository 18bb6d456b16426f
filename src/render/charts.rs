//! Cartesian charts drawn with plotters' bitmap backend.

use std::collections::HashSet;
use std::path::Path;

use plotters::prelude::*;

use super::DrawResult;
use super::palette::{ACCESS_BLUE, LIME_GREEN, MUTATE_RED, ORANGE, categorical};
use crate::analysis::{HistogramBin, LatencyStats, OpsFrequency, TableOps, TimePoint};

const CAPTION_FONT: (&str, f64) = ("sans-serif", 24.0);
const LABEL_FONT: (&str, f64) = ("sans-serif", 14.0);

/// Title and axis descriptions shared by every cartesian chart.
#[derive(Debug, Clone, Copy)]
pub struct Labels<'a> {
    pub title: &'a str,
    pub x: &'a str,
    pub y: &'a str,
}

/// One named scatter series.
pub struct ScatterSeries<'a> {
    pub name: &'a str,
    pub points: &'a [TimePoint],
    pub color: RGBColor,
}

fn padded_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

/// Integer tick labels on a float axis, blank between integers.
fn category_label(value: f64, names: &[String]) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    names.get(rounded as usize).cloned().unwrap_or_default()
}

/// Short table labels: the first group of each UUID, or the full IDs when
/// two tables share that group.
fn table_labels<'a>(ids: impl Iterator<Item = &'a str> + Clone) -> Vec<String> {
    let short = |id: &'a str| id.split('-').next().unwrap_or(id);
    let mut seen = HashSet::new();
    if ids.clone().all(|id| seen.insert(short(id))) {
        ids.map(|id| short(id).to_string()).collect()
    } else {
        ids.map(str::to_string).collect()
    }
}

pub fn scatter(
    path: &Path,
    size: (u32, u32),
    labels: Labels<'_>,
    series: &[ScatterSeries<'_>],
) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let points = || series.iter().flat_map(|s| s.points.iter());
    let x_max = padded_max(points().map(|p| p.elapsed_ms as f64));
    let y_max = padded_max(points().map(|p| p.count as f64));

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(labels.title, CAPTION_FONT)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(-x_max * 0.02..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;

    for s in series {
        let color = s.color;
        chart
            .draw_series(
                s.points
                    .iter()
                    .map(|p| Circle::new((p.elapsed_ms as f64, p.count as f64), 3, color.filled())),
            )?
            .label(s.name)
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

pub fn histogram(
    path: &Path,
    size: (u32, u32),
    labels: Labels<'_>,
    bins: &[HistogramBin],
) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = bins.first().map_or(0.0, |b| b.start);
    let x_max = bins.last().map_or(1.0, |b| b.end);
    let y_max = padded_max(bins.iter().map(|b| b.fraction));

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(labels.title, CAPTION_FONT)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(labels.x)
        .y_desc(labels.y)
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.start, 0.0), (b.end, b.fraction)], LIME_GREEN.filled())
    }))?;
    chart.draw_series(
        bins.iter()
            .filter(|b| b.fraction > 0.0)
            .map(|b| Rectangle::new([(b.start, 0.0), (b.end, b.fraction)], BLACK.stroke_width(1))),
    )?;

    root.present()?;
    Ok(())
}

/// Side-by-side access/mutate bars per operation count.
pub fn grouped_bars(
    path: &Path,
    size: (u32, u32),
    labels: Labels<'_>,
    frequencies: &[OpsFrequency],
) -> DrawResult {
    const WIDTH: f64 = 0.27;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = frequencies.iter().map(|f| f.ops).max().unwrap_or(0) as f64 + 1.0;
    let y_max = padded_max(
        frequencies
            .iter()
            .flat_map(|f| [f.access_txs as f64, f.mutate_txs as f64]),
    );

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(labels.title, CAPTION_FONT)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(labels.x)
        .y_desc(labels.y)
        .x_label_formatter(&|x| format!("{x:.0}"))
        .draw()?;

    chart
        .draw_series(frequencies.iter().map(|f| {
            let x = f.ops as f64;
            Rectangle::new([(x, 0.0), (x + WIDTH, f.access_txs as f64)], ACCESS_BLUE.filled())
        }))?
        .label("accessOps")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], ACCESS_BLUE.filled()));

    chart
        .draw_series(frequencies.iter().map(|f| {
            let x = f.ops as f64 + WIDTH;
            Rectangle::new([(x, 0.0), (x + WIDTH, f.mutate_txs as f64)], MUTATE_RED.filled())
        }))?
        .label("mutateOps")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], MUTATE_RED.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

/// One horizontal bar per table, stacked by event.
pub fn stacked_table_bars(
    path: &Path,
    size: (u32, u32),
    labels: Labels<'_>,
    ops: &TableOps,
    events: &[String],
) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let tables = table_labels(ops.keys().map(String::as_str));
    let x_max = padded_max(ops.values().map(|counts| counts.values().sum::<usize>() as f64));
    let y_max = tables.len() as f64 - 0.5;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(labels.title, CAPTION_FONT)
        .x_label_area_size(45)
        .y_label_area_size(100)
        .build_cartesian_2d(0.0..x_max, -0.5..y_max)?;

    let y_formatter = |y: &f64| category_label(*y, &tables);
    chart
        .configure_mesh()
        .x_desc(labels.x)
        .y_desc(labels.y)
        .y_labels(tables.len() * 2 + 1)
        .y_label_formatter(&y_formatter)
        .draw()?;

    let mut lefts = vec![0.0; ops.len()];
    for (color_index, event) in events.iter().enumerate() {
        let color = categorical(color_index);
        let bars: Vec<_> = ops
            .values()
            .enumerate()
            .filter_map(|(row, counts)| {
                let width = *counts.get(event)? as f64;
                let left = lefts[row];
                lefts[row] += width;
                let y = row as f64;
                Some(Rectangle::new(
                    [(left, y - 0.4), (left + width, y + 0.4)],
                    color.filled(),
                ))
            })
            .collect();
        chart
            .draw_series(bars)?
            .label(event.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::LowerRight)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Horizontal bars read top to bottom, each annotated with its value.
pub fn horizontal_bars(
    path: &Path,
    size: (u32, u32),
    labels: Labels<'_>,
    values: &[(String, f64)],
) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let n = values.len();
    // Row 0 is drawn at the top
    let names: Vec<String> = values.iter().rev().map(|(name, _)| name.clone()).collect();
    let x_max = padded_max(values.iter().map(|(_, v)| *v)) * 1.15;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(labels.title, CAPTION_FONT)
        .x_label_area_size(45)
        .y_label_area_size(120)
        .build_cartesian_2d(0.0..x_max, -0.5..n as f64 - 0.5)?;

    let y_formatter = |y: &f64| category_label(*y, &names);
    chart
        .configure_mesh()
        .x_desc(labels.x)
        .y_labels(n * 2 + 1)
        .y_label_formatter(&y_formatter)
        .disable_y_mesh()
        .draw()?;

    let row_y = |i: usize| (n - 1 - i) as f64;
    chart.draw_series(values.iter().enumerate().map(|(i, (_, v))| {
        let y = row_y(i);
        Rectangle::new([(0.0, y - 0.4), (*v, y + 0.4)], categorical(i).filled())
    }))?;
    chart.draw_series(values.iter().enumerate().map(|(i, (_, v))| {
        Text::new(format!("{v:.6}"), (*v, row_y(i)), LABEL_FONT.into_font())
    }))?;

    root.present()?;
    Ok(())
}

/// Horizontal box plot with the mean of each row marked.
///
/// Row 1 (bottom) is the first entry of `stats`.
pub fn box_plot(
    path: &Path,
    size: (u32, u32),
    labels: Labels<'_>,
    stats: &[LatencyStats],
) -> DrawResult {
    const HALF: f64 = 0.25;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    // Row 0 is unused so rows start at 1
    let names: Vec<String> = std::iter::once(String::new())
        .chain(stats.iter().map(|s| s.event.clone()))
        .collect();
    let x_max = padded_max(stats.iter().flat_map(|s| [s.whisker_high, s.mean]));

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(labels.title, CAPTION_FONT)
        .x_label_area_size(45)
        .y_label_area_size(120)
        .build_cartesian_2d(-1.0..x_max, 0.5..stats.len() as f64 + 0.5)?;

    let y_formatter = |y: &f64| category_label(*y, &names);
    chart
        .configure_mesh()
        .x_desc(labels.x)
        .y_labels(stats.len() * 2 + 1)
        .y_label_formatter(&y_formatter)
        .disable_y_mesh()
        .draw()?;

    let rows = || stats.iter().enumerate().map(|(i, s)| ((i + 1) as f64, s));

    chart.draw_series(rows().map(|(y, s)| {
        Rectangle::new([(s.q1, y - HALF), (s.q3, y + HALF)], BLACK.stroke_width(1))
    }))?;

    chart.draw_series(rows().flat_map(|(y, s)| {
        [
            PathElement::new(
                vec![(s.median, y - HALF), (s.median, y + HALF)],
                ORANGE.stroke_width(2),
            ),
            PathElement::new(vec![(s.whisker_low, y), (s.q1, y)], BLACK.stroke_width(1)),
            PathElement::new(vec![(s.q3, y), (s.whisker_high, y)], BLACK.stroke_width(1)),
            PathElement::new(
                vec![(s.whisker_low, y - HALF / 2.0), (s.whisker_low, y + HALF / 2.0)],
                BLACK.stroke_width(1),
            ),
            PathElement::new(
                vec![(s.whisker_high, y - HALF / 2.0), (s.whisker_high, y + HALF / 2.0)],
                BLACK.stroke_width(1),
            ),
        ]
    }))?;

    chart.draw_series(rows().map(|(y, s)| Circle::new((s.mean, y), 4, BLUE.filled())))?;

    root.present()?;
    Ok(())
}
