//! Aligned text-table rendering for the `--output pretty` mode.

use crate::models::ResultTable;

/// Render a bordered, left-justified table with the header row as
/// column titles:
///
/// ```text
/// +--------+--------+
/// | Status | Count  |
/// +--------+--------+
/// | Active | 12     |
/// +--------+--------+
/// ```
pub fn render(results: &ResultTable) -> String {
    let widths = column_widths(results);
    let border = border_line(&widths);

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    out.push_str(&format_row(results.header(), &widths));
    out.push('\n');
    out.push_str(&border);
    for row in results.data_rows() {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }
    out.push('\n');
    out.push_str(&border);
    out
}

/// Widest cell per column, header included.
fn column_widths(results: &ResultTable) -> Vec<usize> {
    let mut widths = vec![0; results.column_count()];
    for row in results.iter_all() {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in row.iter().zip(widths) {
        let pad = width - cell.chars().count();
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad + 1));
        line.push('|');
    }
    line
}
