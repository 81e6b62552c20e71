// RSA Key Generation
// Builds RSA key pairs (public and private keys) from two validated primes

use log::{debug, info};
use num_traits::{One, Zero};

use super::bigint::{bit_length, from_u64, gcd, lcm, mod_inverse, RsaBigInt};
use super::error::KeyResult;
use super::primes::{validate_key_inputs, validate_primes, DEFAULT_MAX_PRIME};

/// Smallest public exponent the scan will consider
pub const MIN_PUBLIC_EXPONENT: u64 = 3;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

/// Values kept for display and testing, never used for encryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDebug {
    pub p: u64,
    pub q: u64,
    pub lambda: RsaBigInt,
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
    pub debug: KeyDebug,
}

impl PublicKey {
    pub fn new(n: u64, e: u64) -> Self {
        Self {
            n: from_u64(n),
            e: from_u64(e),
        }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        bit_length(&self.n)
    }
}

impl PrivateKey {
    pub fn new(n: u64, d: u64) -> Self {
        Self {
            n: from_u64(n),
            d: from_u64(d),
        }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        bit_length(&self.n)
    }
}

impl KeyPair {
    /// Get the bit length of the key
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

/// Configuration for key generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyGenConfig {
    /// Largest prime accepted for p or q
    pub max_prime: u64,
    /// First candidate of the upward public exponent scan
    pub exponent_start: u64,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            max_prime: DEFAULT_MAX_PRIME,
            exponent_start: MIN_PUBLIC_EXPONENT,
        }
    }
}

impl KeyGenConfig {
    pub fn with_max_prime(mut self, max_prime: u64) -> Self {
        self.max_prime = max_prime;
        self
    }

    pub fn with_exponent_start(mut self, start: u64) -> Self {
        self.exponent_start = start;
        self
    }
}

/// Pick the public exponent: the first e >= max(start, 3) coprime to lambda
///
/// The scan is not capped at lambda. A start of 65537 therefore keeps 65537
/// for every toy key, while the default start of 3 gives the smallest usable
/// exponent (7 for p = 61, q = 53, not the textbook 17).
pub fn choose_public_exponent(lambda: &RsaBigInt, start: u64) -> RsaBigInt {
    let mut e = from_u64(start.max(MIN_PUBLIC_EXPONENT));

    // lambda + 1 is always coprime to lambda, so the scan is bounded
    while !gcd(&e, lambda).is_one() {
        e += 1u8;
    }

    e
}

/// Generate an RSA key pair from p and q with default settings
pub fn generate_keypair(p: u64, q: u64) -> KeyResult<KeyPair> {
    generate_keypair_with(p, q, &KeyGenConfig::default())
}

/// Generate an RSA key pair from textual p and q, as typed by a user
pub fn generate_keypair_from_input(p: &str, q: &str, config: &KeyGenConfig) -> KeyResult<KeyPair> {
    let (p, q) = validate_key_inputs(p, q, config.max_prime)?;
    build_keypair(p, q, config)
}

/// Generate an RSA key pair from p and q
pub fn generate_keypair_with(p: u64, q: u64, config: &KeyGenConfig) -> KeyResult<KeyPair> {
    let (p, q) = validate_primes(p, q, config.max_prime)?;
    build_keypair(p, q, config)
}

fn build_keypair(p: u64, q: u64, config: &KeyGenConfig) -> KeyResult<KeyPair> {
    // Step 1: Compute n = p * q
    let n = from_u64(p) * from_u64(q);

    // Step 2: Compute λ(n) = lcm(p-1, q-1)
    let lambda = lcm(&from_u64(p - 1), &from_u64(q - 1))?;
    debug!("p={} q={} n={} lambda={}", p, q, n, lambda);

    // Step 3: Choose e coprime to λ(n)
    let e = choose_public_exponent(&lambda, config.exponent_start);

    // Step 4: Compute d = e^(-1) mod λ(n)
    let d = mod_inverse(&e, &lambda)?;
    debug!("e={} d={}", e, d);

    let keypair = KeyPair {
        public_key: PublicKey { n: n.clone(), e },
        private_key: PrivateKey { n, d },
        debug: KeyDebug { p, q, lambda },
    };
    info!("generated {}-bit key pair", keypair.bit_length());

    Ok(keypair)
}

/// Summary of the classic p = 61, q = 53 walkthrough
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demonstration {
    pub p: u64,
    pub q: u64,
    pub n: RsaBigInt,
    pub e: RsaBigInt,
    pub d: RsaBigInt,
    pub lambda: RsaBigInt,
}

/// Run key generation on p = 61, q = 53 and report every intermediate value
pub fn demonstration_example() -> KeyResult<Demonstration> {
    let keys = generate_keypair(61, 53)?;

    Ok(Demonstration {
        p: keys.debug.p,
        q: keys.debug.q,
        n: keys.public_key.n,
        e: keys.public_key.e,
        d: keys.private_key.d,
        lambda: keys.debug.lambda,
    })
}

/// Check the arithmetic relations a generated pair must satisfy
pub fn verify_keypair(keypair: &KeyPair) -> bool {
    let KeyPair {
        public_key,
        private_key,
        debug,
    } = keypair;

    if debug.lambda.is_zero() {
        return false;
    }

    public_key.n == from_u64(debug.p) * from_u64(debug.q)
        && public_key.n == private_key.n
        && gcd(&public_key.e, &debug.lambda).is_one()
        && (&public_key.e * &private_key.d) % &debug.lambda == RsaBigInt::one()
}
