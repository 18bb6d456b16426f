//! Pie charts drawn directly in pixel space.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::DrawResult;
use super::palette::categorical;

/// One wedge of a pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// Wedge outline from `start` sweeping `sweep` degrees clockwise, one
/// vertex per degree.
fn wedge(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = (sweep.ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = (start + sweep * step as f64 / steps as f64).to_radians();
        points.push(polar(center, radius, angle));
    }
    points
}

fn polar(center: (i32, i32), radius: f64, radians: f64) -> (i32, i32) {
    (
        center.0 + (radius * radians.cos()).round() as i32,
        center.1 + (radius * radians.sin()).round() as i32,
    )
}

/// Draw a pie with percentage labels inside each wedge and names outside.
///
/// Zero-valued slices are not drawn. `footer` is printed in bold under the
/// pie.
pub fn pie(
    path: &Path,
    size: (u32, u32),
    title: &str,
    slices: &[PieSlice],
    footer: Option<&str>,
) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled(title, ("sans-serif", 26.0))?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2 - 10);
    let radius = f64::from(width.min(height)) * 0.32;
    let total: f64 = slices.iter().map(|s| s.value).sum();

    let centered = Pos::new(HPos::Center, VPos::Center);
    let name_style = TextStyle::from(("sans-serif", 15.0).into_font()).pos(centered);
    let percent_style = TextStyle::from(("sans-serif", 13.0).into_font()).pos(centered);

    // Start at twelve o'clock
    let mut start = -90.0;
    for (index, slice) in slices.iter().enumerate() {
        if slice.value <= 0.0 {
            continue;
        }
        let sweep = slice.value / total * 360.0;
        let color = categorical(index);

        let outline = wedge(center, radius, start, sweep);
        area.draw(&Polygon::new(outline.clone(), color.filled()))?;
        let mut closed = outline;
        closed.push(center);
        area.draw(&PathElement::new(closed, WHITE.stroke_width(2)))?;

        let middle = (start + sweep / 2.0).to_radians();
        area.draw(&Text::new(
            slice.label.clone(),
            polar(center, radius * 1.18, middle),
            name_style.clone(),
        ))?;
        area.draw(&Text::new(
            format!("{:.1}%", slice.value / total * 100.0),
            polar(center, radius * 0.7, middle),
            percent_style.clone(),
        ))?;

        start += sweep;
    }

    if let Some(footer) = footer {
        let style = TextStyle::from(
            ("sans-serif", 18.0)
                .into_font()
                .style(FontStyle::Bold),
        )
        .pos(centered);
        area.draw(&Text::new(
            footer.to_string(),
            (width as i32 / 2, height as i32 - 20),
            style,
        ))?;
    }

    root.present()?;
    Ok(())
}
