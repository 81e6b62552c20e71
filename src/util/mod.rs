// Utility Module
// Formatting helpers shared by the benchmark report and the command line

pub mod format;

pub use format::{format_duration, format_table};
