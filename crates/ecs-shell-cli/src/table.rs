//! Plain-text table for the cluster overview.

use ecs_shell_core::app::OverviewRow;

/// Render rows under the overview headers, columns padded to the widest cell.
pub fn render(rows: &[OverviewRow]) -> String {
    let headers = OverviewRow::HEADERS;
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 4]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers));
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 3 * (widths.len() - 1)));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.cells()));
        out.push('\n');
    }
    out
}
