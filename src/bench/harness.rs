// Benchmark Harness
// Times repeated key generation, encryption and decryption calls

use std::fmt;
use std::hint::black_box;
use std::time::Duration;

use log::{info, warn};

use super::clock::{Clock, MonotonicClock};
use crate::rsa::bigint::{bit_length, from_u64};
use crate::rsa::encrypt::{encrypt, encrypt_value};
use crate::rsa::decrypt::decrypt;
use crate::rsa::keygen::{generate_keypair_with, KeyGenConfig, PrivateKey, PublicKey};
use crate::rsa::message::EncryptedMessage;

/// Iterations used when the caller does not choose
pub const DEFAULT_ITERATIONS: u32 = 10;

/// Plaintext value encrypted by the key comparison; fits the smallest modulus (2 * 3)
pub const DEFAULT_SAMPLE_VALUE: u64 = 2;

/// Aggregated timings of one measurement, immutable once produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkResult {
    average_time: Duration,
    min_time: Duration,
    max_time: Duration,
    total_time: Duration,
    iterations: u32,
    contextual_size: u64,
}

impl BenchmarkResult {
    /// Aggregate per-call samples; returns None when there are none
    pub fn from_samples(samples: &[Duration], contextual_size: u64) -> Option<Self> {
        let min_time = samples.iter().min().copied()?;
        let max_time = samples.iter().max().copied()?;
        let total_time: Duration = samples.iter().sum();
        let iterations = u32::try_from(samples.len()).ok()?;

        Some(Self {
            average_time: total_time / iterations,
            min_time,
            max_time,
            total_time,
            iterations,
            contextual_size,
        })
    }

    pub fn average_time(&self) -> Duration {
        self.average_time
    }

    pub fn min_time(&self) -> Duration {
        self.min_time
    }

    pub fn max_time(&self) -> Duration {
        self.max_time
    }

    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Modulus bits for key generation, characters for encryption, values for decryption
    pub fn contextual_size(&self) -> u64 {
        self.contextual_size
    }
}

/// Either measured timings or the reason measuring was impossible
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchmarkOutcome {
    Measured(BenchmarkResult),
    Failed { error: String },
}

impl BenchmarkOutcome {
    pub fn result(&self) -> Option<&BenchmarkResult> {
        match self {
            BenchmarkOutcome::Measured(result) => Some(result),
            BenchmarkOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            BenchmarkOutcome::Measured(_) => None,
            BenchmarkOutcome::Failed { error } => Some(error),
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, BenchmarkOutcome::Measured(_))
    }
}

/// A (p, q) candidate for key comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySize {
    pub p: u64,
    pub q: u64,
}

impl KeySize {
    pub fn new(p: u64, q: u64) -> Self {
        Self { p, q }
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p={}, q={}", self.p, self.q)
    }
}

/// Timings of one successful comparison entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyComparison {
    pub modulus_bits: u64,
    pub key_generation: BenchmarkResult,
    pub encryption: BenchmarkResult,
}

/// Per-entry outcome of a key comparison, failures stay local to the entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonEntry {
    pub size: KeySize,
    pub outcome: Result<KeyComparison, String>,
}

impl ComparisonEntry {
    pub fn error(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }
}

/// Configuration for the benchmark harness
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    pub iterations: u32,
    pub sample_value: u64,
    pub keygen: KeyGenConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            sample_value: DEFAULT_SAMPLE_VALUE,
            keygen: KeyGenConfig::default(),
        }
    }
}

impl BenchConfig {
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_sample_value(mut self, value: u64) -> Self {
        self.sample_value = value;
        self
    }

    pub fn with_keygen(mut self, keygen: KeyGenConfig) -> Self {
        self.keygen = keygen;
        self
    }
}

/// Runs measurements sequentially against an injected clock
pub struct Benchmark<C: Clock = MonotonicClock> {
    clock: C,
    config: BenchConfig,
}

impl Benchmark<MonotonicClock> {
    pub fn new(config: BenchConfig) -> Self {
        Self::with_clock(MonotonicClock::new(), config)
    }
}

impl Default for Benchmark<MonotonicClock> {
    fn default() -> Self {
        Self::new(BenchConfig::default())
    }
}

impl<C: Clock> Benchmark<C> {
    pub fn with_clock(clock: C, config: BenchConfig) -> Self {
        Self { clock, config }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Time `op` once per iteration; the first failure aborts and is captured
    fn measure<T, E, F>(&self, label: &str, iterations: u32, contextual_size: u64, mut op: F) -> BenchmarkOutcome
    where
        E: fmt::Display,
        F: FnMut() -> Result<T, E>,
    {
        let iterations = iterations.max(1);
        let mut samples = Vec::with_capacity(iterations as usize);

        for _ in 0..iterations {
            let start = self.clock.now();
            let outcome = black_box(op());
            let elapsed = self.clock.now().saturating_sub(start);

            if let Err(e) = outcome {
                warn!("{} benchmark failed: {}", label, e);
                return BenchmarkOutcome::Failed {
                    error: e.to_string(),
                };
            }
            samples.push(elapsed);
        }

        match BenchmarkResult::from_samples(&samples, contextual_size) {
            Some(result) => {
                info!(
                    "{}: {} iterations, avg {:?}, min {:?}, max {:?}",
                    label,
                    result.iterations(),
                    result.average_time(),
                    result.min_time(),
                    result.max_time()
                );
                BenchmarkOutcome::Measured(result)
            }
            None => BenchmarkOutcome::Failed {
                error: format!("{} produced no samples", label),
            },
        }
    }

    /// Time key generation for (p, q)
    pub fn measure_key_generation(&self, p: u64, q: u64, iterations: u32) -> BenchmarkOutcome {
        let modulus_bits = bit_length(&(from_u64(p) * from_u64(q)));
        self.measure("key generation", iterations, modulus_bits, || {
            generate_keypair_with(p, q, &self.config.keygen)
        })
    }

    /// Time encryption of `message`
    pub fn measure_encryption(&self, message: &str, public_key: &PublicKey, iterations: u32) -> BenchmarkOutcome {
        let characters = message.chars().count() as u64;
        self.measure("encryption", iterations, characters, || encrypt(message, public_key))
    }

    /// Time decryption of `encrypted`
    pub fn measure_decryption(
        &self,
        encrypted: &EncryptedMessage,
        private_key: &PrivateKey,
        iterations: u32,
    ) -> BenchmarkOutcome {
        let values = encrypted.len() as u64;
        self.measure("decryption", iterations, values, || decrypt(encrypted, private_key))
    }

    /// Key generation plus a fixed sample encryption for every size
    ///
    /// A failing entry records its error and the remaining sizes are still
    /// measured.
    pub fn compare_key_performance(&self, sizes: &[KeySize]) -> Vec<ComparisonEntry> {
        sizes
            .iter()
            .map(|&size| ComparisonEntry {
                size,
                outcome: self.compare_one(size),
            })
            .collect()
    }

    fn compare_one(&self, size: KeySize) -> Result<KeyComparison, String> {
        let iterations = self.config.iterations;

        let keypair = generate_keypair_with(size.p, size.q, &self.config.keygen).map_err(|e| {
            warn!("skipping {}: {}", size, e);
            e.to_string()
        })?;

        let sample = from_u64(self.config.sample_value);
        if sample >= keypair.public_key.n {
            let error = format!(
                "sample value {} is too large for modulus {}",
                self.config.sample_value, keypair.public_key.n
            );
            warn!("skipping {}: {}", size, error);
            return Err(error);
        }

        let key_generation = into_result(self.measure_key_generation(size.p, size.q, iterations))?;
        let encryption = into_result(self.measure("sample encryption", iterations, 1, || {
            Ok::<_, std::convert::Infallible>(encrypt_value(&sample, &keypair.public_key))
        }))?;

        Ok(KeyComparison {
            modulus_bits: keypair.bit_length(),
            key_generation,
            encryption,
        })
    }
}

fn into_result(outcome: BenchmarkOutcome) -> Result<BenchmarkResult, String> {
    match outcome {
        BenchmarkOutcome::Measured(result) => Ok(result),
        BenchmarkOutcome::Failed { error } => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::clock::testing::ScriptedClock;
    use crate::rsa::keygen::generate_keypair;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_from_samples() {
        let result = BenchmarkResult::from_samples(&[ms(4), ms(2), ms(6)], 5).unwrap();
        assert_eq!(result.min_time(), ms(2));
        assert_eq!(result.max_time(), ms(6));
        assert_eq!(result.total_time(), ms(12));
        assert_eq!(result.average_time(), ms(4));
        assert_eq!(result.iterations(), 3);
        assert_eq!(result.contextual_size(), 5);

        assert!(BenchmarkResult::from_samples(&[], 0).is_none());
    }

    #[test]
    fn test_measure_encryption_aggregates() {
        let samples = [3, 9, 5, 7];
        let bench = Benchmark::with_clock(ScriptedClock::with_samples(&samples), BenchConfig::default());
        let keypair = generate_keypair(61, 53).unwrap();

        let outcome = bench.measure_encryption("Hello", &keypair.public_key, 4);
        let result = outcome.result().unwrap();

        assert_eq!(result.iterations(), 4);
        assert_eq!(result.contextual_size(), 5);
        assert_eq!(result.min_time(), ms(3));
        assert_eq!(result.max_time(), ms(9));
        assert_eq!(result.total_time(), ms(24));
        assert_eq!(result.average_time(), ms(6));
        assert!(result.min_time() <= result.average_time());
        assert!(result.average_time() <= result.max_time());
    }

    #[test]
    fn test_zero_iterations_clamped_to_one() {
        let bench = Benchmark::with_clock(ScriptedClock::with_samples(&[8]), BenchConfig::default());
        let outcome = bench.measure_key_generation(61, 53, 0);
        let result = outcome.result().unwrap();

        assert_eq!(result.iterations(), 1);
        assert_eq!(result.total_time(), ms(8));
        assert_eq!(result.contextual_size(), 12);
    }

    #[test]
    fn test_failures_are_captured() {
        let bench = Benchmark::default();

        let outcome = bench.measure_key_generation(4, 7, 3);
        assert!(!outcome.is_measured());
        assert_eq!(outcome.error(), Some("4 is not a prime number"));

        let small = generate_keypair(5, 7).unwrap();
        let outcome = bench.measure_encryption("A", &small.public_key, 3);
        assert!(outcome.error().unwrap().contains("too large"));

        let outcome = bench.measure_encryption("", &small.public_key, 3);
        assert_eq!(outcome.error(), Some("message is empty"));

        let bad_key = PrivateKey::new(35, 0);
        let outcome = bench.measure_decryption(&EncryptedMessage::from(vec![1u64]), &bad_key, 3);
        assert!(outcome.error().unwrap().contains("invalid private key"));
    }

    #[test]
    fn test_measure_decryption() {
        let bench = Benchmark::new(BenchConfig::default());
        let keypair = generate_keypair(61, 53).unwrap();
        let encrypted = encrypt("bench", &keypair.public_key).unwrap();

        let outcome = bench.measure_decryption(&encrypted, &keypair.private_key, DEFAULT_ITERATIONS);
        let result = outcome.result().unwrap();
        assert_eq!(result.iterations(), DEFAULT_ITERATIONS);
        assert_eq!(result.contextual_size(), 5);
        assert!(result.min_time() <= result.max_time());
    }

    #[test]
    fn test_compare_isolates_failures() {
        let bench = Benchmark::new(BenchConfig::default().with_iterations(3));
        let entries = bench.compare_key_performance(&[KeySize::new(4, 7), KeySize::new(5, 7)]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].error(), Some("4 is not a prime number"));

        let second = entries[1].outcome.as_ref().unwrap();
        assert_eq!(second.modulus_bits, 6);
        assert_eq!(second.key_generation.iterations(), 3);
        assert_eq!(second.encryption.iterations(), 3);
        assert_eq!(second.encryption.contextual_size(), 1);
    }

    #[test]
    fn test_compare_rejects_oversized_sample() {
        let bench = Benchmark::new(BenchConfig::default().with_sample_value(100).with_iterations(1));
        let entries = bench.compare_key_performance(&[KeySize::new(5, 7), KeySize::new(61, 53)]);

        assert!(entries[0].error().unwrap().contains("too large"));
        assert!(entries[1].outcome.is_ok());
    }
}
