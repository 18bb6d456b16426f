//! Terminal styling for profiler output.
//!
//! Uses the anstyle ecosystem:
//! - anstream for auto-detecting color support
//! - anstyle for composable styling
//!
//! Chart paths, summaries and trace JSON go to stdout. Errors and warnings go
//! to stderr so stdout stays pipeable.

// Re-exports from anstream (auto-detecting output)
pub use anstream::{eprintln, print, println};

use anstyle::{AnsiColor, Color, Style};
use unicode_width::UnicodeWidthStr;

pub const SUCCESS_EMOJI: &str = "✅";
pub const ERROR_EMOJI: &str = "❌";
pub const WARNING_EMOJI: &str = "🟡";
pub const HINT_EMOJI: &str = "💡";

pub const HEADER: Style = Style::new().bold();
pub const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

/// Format a warning line with emoji and yellow text.
pub fn format_warning(msg: &str) -> String {
    format!("{WARNING_EMOJI} {WARNING}{msg}{WARNING:#}")
}

/// Render rows as left-aligned columns with a bold header line.
///
/// The first column is left-aligned, the rest right-aligned, which suits
/// "name, then numbers" tables. Widths are display columns, so wide
/// characters in method names stay aligned.
pub fn format_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    let header_line = render_row(header, &widths);
    out.push_str(&format!("{HEADER}{header_line}{HEADER:#}\n"));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&render_row(&cells, &widths));
        out.push('\n');
    }
    out
}

fn render_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            // `{:<width$}` pads by chars, not columns
            let pad = " ".repeat(width.saturating_sub(cell.width()));
            if i == 0 {
                format!("{cell}{pad}")
            } else {
                format!("{pad}{cell}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
