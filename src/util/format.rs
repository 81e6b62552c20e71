// Display Formatting
// Human-readable durations and plain-text tables

use std::time::Duration;

/// Format a duration with the largest unit that keeps it above 1
pub fn format_duration(duration: Duration) -> String {
    const MICRO: u128 = 1_000;
    const MILLI: u128 = MICRO * 1_000;
    const SECOND: u128 = MILLI * 1_000;

    let nanos = duration.as_nanos();

    if nanos >= SECOND {
        format!("{:.2} s", nanos as f64 / SECOND as f64)
    } else if nanos >= MILLI {
        format!("{:.2} ms", nanos as f64 / MILLI as f64)
    } else if nanos >= MICRO {
        format!("{:.2} µs", nanos as f64 / MICRO as f64)
    } else {
        format!("{} ns", nanos)
    }
}

/// Render rows as left-aligned columns separated by two spaces
pub fn format_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let width = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    let render = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();

    let mut lines = vec![render(header.to_vec())];
    lines.push(render(separator.iter().map(String::as_str).collect()));
    for row in rows {
        lines.push(render(row.iter().map(String::as_str).collect()));
    }

    lines.join("\n")
}
