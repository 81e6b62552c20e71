// Benchmark Report
// Plain-text rendering of measurements for the command line

use super::harness::{BenchmarkOutcome, ComparisonEntry};
use crate::util::{format_duration, format_table};

/// One line summary of a single measurement
pub fn render_outcome(label: &str, outcome: &BenchmarkOutcome) -> String {
    match outcome {
        BenchmarkOutcome::Measured(result) => format!(
            "{}: {} iterations (size {}), avg {}, min {}, max {}, total {}",
            label,
            result.iterations(),
            result.contextual_size(),
            format_duration(result.average_time()),
            format_duration(result.min_time()),
            format_duration(result.max_time()),
            format_duration(result.total_time()),
        ),
        BenchmarkOutcome::Failed { error } => format!("{}: error: {}", label, error),
    }
}

/// Table of key comparison entries, failed entries show their error
pub fn render_comparison(entries: &[ComparisonEntry]) -> String {
    let header = ["p", "q", "bits", "keygen avg", "encrypt avg", "status"];

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            let mut row = vec![entry.size.p.to_string(), entry.size.q.to_string()];
            match &entry.outcome {
                Ok(comparison) => row.extend([
                    comparison.modulus_bits.to_string(),
                    format_duration(comparison.key_generation.average_time()),
                    format_duration(comparison.encryption.average_time()),
                    "ok".to_string(),
                ]),
                Err(error) => row.extend([
                    "-".to_string(),
                    "-".to_string(),
                    "-".to_string(),
                    format!("error: {}", error),
                ]),
            }
            row
        })
        .collect();

    format_table(&header, &rows)
}
