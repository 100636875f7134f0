//! CLI output formatting helpers.

use fetchq::Job;

/// Renders a column-aligned table: header row, dash rule, one row per entry.
///
/// Column widths are sized to the widest cell (or header). Returns just the
/// header and rule when `rows` is empty.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if index < widths.len() {
                widths[index] = widths[index].max(cell.chars().count());
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers.iter().map(|h| (*h).to_string()), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(render_row(row.iter().cloned(), &widths));
    }
    lines.join("\n")
}

fn render_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Table row for a queued job: id, url, destdir, created_at.
pub fn queued_row(job: &Job) -> Vec<String> {
    vec![
        job.id.to_string(),
        job.url.clone(),
        job.destdir.clone(),
        job.created_at.clone(),
    ]
}

/// Table row for a failed job: id, url, destdir, handled_at.
pub fn failed_row(job: &Job) -> Vec<String> {
    vec![
        job.id.to_string(),
        job.url.clone(),
        job.destdir.clone(),
        job.handled_at.clone().unwrap_or_default(),
    ]
}
