// Prime Validation
// Trial-division primality and (p, q) parameter checks for toy-sized keys

use rand::Rng;

use super::bigint::isqrt;
use super::error::{KeyError, KeyResult};

/// Largest prime accepted by default, keeps trial division tractable
pub const DEFAULT_MAX_PRIME: u64 = 1_000_000;

/// Trial division by every integer in 2..=floor(sqrt(value))
///
/// Values of 0 and 1 are rejected as input rather than reported as composite.
pub fn is_prime(value: u64) -> KeyResult<bool> {
    if value <= 1 {
        return Err(KeyError::InvalidInput(format!(
            "{} must be greater than 1",
            value
        )));
    }

    let limit = isqrt(value);
    Ok((2..=limit).all(|divisor| value % divisor != 0))
}

/// Parse a textual key parameter
pub fn parse_prime_input(name: &str, raw: &str) -> KeyResult<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(KeyError::InvalidInput(format!("{} is missing", name)));
    }

    trimmed.parse::<u64>().map_err(|_| {
        KeyError::InvalidInput(format!("{} must be a positive integer, got {:?}", name, trimmed))
    })
}

/// Validate textual p and q as RSA parameters and return them parsed
pub fn validate_key_inputs(p: &str, q: &str, max_prime: u64) -> KeyResult<(u64, u64)> {
    let p = parse_prime_input("p", p)?;
    let q = parse_prime_input("q", q)?;
    validate_primes(p, q, max_prime)
}

/// Validate numeric p and q as RSA parameters
pub fn validate_primes(p: u64, q: u64, max_prime: u64) -> KeyResult<(u64, u64)> {
    for value in [p, q] {
        if value > max_prime {
            return Err(KeyError::OutOfRange {
                value,
                max: max_prime,
            });
        }
    }

    for value in [p, q] {
        if !is_prime(value)? {
            return Err(KeyError::NotPrime(value));
        }
    }

    if p == q {
        return Err(KeyError::NotDistinct(p));
    }

    Ok((p, q))
}

/// Pick a uniformly random prime in [2, bound)
pub fn random_prime_below<R: Rng>(rng: &mut R, bound: u64) -> KeyResult<u64> {
    if bound <= 2 {
        return Err(KeyError::InvalidInput(format!(
            "no prime exists below {}",
            bound
        )));
    }

    // 2 is always a hit, so this terminates
    loop {
        let candidate = rng.gen_range(2..bound);
        if is_prime(candidate)? {
            return Ok(candidate);
        }
    }
}

/// Pick two distinct random primes below bound
pub fn random_prime_pair<R: Rng>(rng: &mut R, bound: u64) -> KeyResult<(u64, u64)> {
    if bound <= 3 {
        return Err(KeyError::InvalidInput(format!(
            "fewer than two primes exist below {}",
            bound
        )));
    }

    let p = random_prime_below(rng, bound)?;
    loop {
        let q = random_prime_below(rng, bound)?;
        if q != p {
            return Ok((p, q));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_is_prime() {
        assert!(is_prime(2).unwrap());
        assert!(is_prime(3).unwrap());
        assert!(is_prime(61).unwrap());
        assert!(is_prime(999_983).unwrap());
        assert!(!is_prime(4).unwrap());
        assert!(!is_prime(9).unwrap());
        assert!(!is_prime(25).unwrap());
        assert!(!is_prime(1_000_000).unwrap());
    }

    #[test]
    fn test_is_prime_rejects_small_values() {
        assert!(matches!(is_prime(0), Err(KeyError::InvalidInput(_))));
        assert!(matches!(is_prime(1), Err(KeyError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_key_inputs() {
        assert_eq!(validate_key_inputs("61", " 53 ", DEFAULT_MAX_PRIME), Ok((61, 53)));
        assert!(matches!(
            validate_key_inputs("", "53", DEFAULT_MAX_PRIME),
            Err(KeyError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_key_inputs("abc", "53", DEFAULT_MAX_PRIME),
            Err(KeyError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_key_inputs("-7", "53", DEFAULT_MAX_PRIME),
            Err(KeyError::InvalidInput(_))
        ));
        assert!(matches!(
            validate_key_inputs("61", "5.5", DEFAULT_MAX_PRIME),
            Err(KeyError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_primes_failures() {
        assert_eq!(
            validate_primes(1_000_003, 53, DEFAULT_MAX_PRIME),
            Err(KeyError::OutOfRange { value: 1_000_003, max: DEFAULT_MAX_PRIME })
        );
        assert_eq!(validate_primes(4, 7, DEFAULT_MAX_PRIME), Err(KeyError::NotPrime(4)));
        assert_eq!(validate_primes(7, 21, DEFAULT_MAX_PRIME), Err(KeyError::NotPrime(21)));
        assert_eq!(validate_primes(13, 13, DEFAULT_MAX_PRIME), Err(KeyError::NotDistinct(13)));
        assert!(matches!(validate_primes(1, 7, DEFAULT_MAX_PRIME), Err(KeyError::InvalidInput(_))));
    }

    #[test]
    fn test_custom_bound() {
        assert_eq!(validate_primes(101, 103, 100), Err(KeyError::OutOfRange { value: 101, max: 100 }));
        assert_eq!(validate_primes(97, 89, 100), Ok((97, 89)));
    }

    #[test]
    fn test_random_primes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let p = random_prime_below(&mut rng, 1000).unwrap();
            assert!(p < 1000);
            assert!(is_prime(p).unwrap());
        }

        let (p, q) = random_prime_pair(&mut rng, 100).unwrap();
        assert_ne!(p, q);
        assert!(random_prime_below(&mut rng, 2).is_err());
        assert!(random_prime_pair(&mut rng, 3).is_err());
    }
}
