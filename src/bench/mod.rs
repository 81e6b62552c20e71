// Benchmark Module
// Timing harness for key generation and the cipher operations

pub mod clock;
pub mod harness;
pub mod report;

pub use clock::{Clock, MonotonicClock};
pub use harness::{
    BenchConfig, Benchmark, BenchmarkOutcome, BenchmarkResult, ComparisonEntry, KeyComparison, KeySize,
    DEFAULT_ITERATIONS,
};
pub use report::{render_comparison, render_outcome};
