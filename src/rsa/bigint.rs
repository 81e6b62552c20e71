// RSA Big Integer Operations
// Modular arithmetic primitives over num-bigint, sized so that products up to n^2 never overflow

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use super::error::{ArithmeticError, ArithmeticResult};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Greatest common divisor, gcd(a, 0) = a
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }

    a
}

/// Least common multiple
pub fn lcm(a: &RsaBigInt, b: &RsaBigInt) -> ArithmeticResult<RsaBigInt> {
    if a.is_zero() && b.is_zero() {
        return Err(ArithmeticError::DivideByZero);
    }
    Ok((a * b) / gcd(a, b))
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd(a, b)
pub fn extended_gcd(a: &RsaBigInt, b: &RsaBigInt) -> (RsaBigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    // remainders of non-negative operands stay non-negative
    (old_r.magnitude().clone(), old_s, old_t)
}

/// Compute modular inverse: a^(-1) mod m, in [0, m)
/// The inverse modulo 1 is defined as 0
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> ArithmeticResult<RsaBigInt> {
    if m.is_zero() {
        return Err(ArithmeticError::DivideByZero);
    }
    if m.is_one() {
        return Ok(RsaBigInt::zero());
    }

    let (gcd, x, _) = extended_gcd(a, m);
    if !gcd.is_one() {
        return Err(ArithmeticError::NoInverseExists {
            value: a.clone(),
            modulus: m.clone(),
        });
    }

    // mod_floor by a positive modulus lands in [0, m)
    let x = x.mod_floor(&BigInt::from(m.clone()));
    Ok(x.magnitude().clone())
}

/// Integer square root, floor(sqrt(n))
pub fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }

    // Newton iteration from ceil(n / 2)
    let mut x = n;
    let mut y = x / 2 + x % 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Number of significant bits
pub fn bit_length(n: &RsaBigInt) -> u64 {
    n.bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let base = from_u64(3);
        let exp = from_u64(5);
        let modulus = from_u64(7);
        let result = mod_pow(&base, &exp, &modulus);
        assert_eq!(result, from_u64(5));
    }

    #[test]
    fn test_mod_pow_large_exponent() {
        // 65537 mod lambda(35) = 65537 mod 12 = 5, and 3^5 mod 35 = 33
        assert_eq!(mod_pow(&from_u64(3), &from_u64(65537), &from_u64(35)), from_u64(33));
        assert_eq!(mod_pow(&from_u64(33), &from_u64(5), &from_u64(35)), from_u64(3));
    }

    #[test]
    fn test_mod_pow_no_overflow_near_max_modulus() {
        // n close to 10^12 so intermediate squares reach ~10^24
        let n = from_u64(999_983) * from_u64(999_979);
        let base = from_u64(999_999_999_999 % 999_983);
        let expected = base.modpow(&from_u64(65537), &n);
        assert_eq!(mod_pow(&base, &from_u64(65537), &n), expected);
    }

    #[test]
    fn test_mod_pow_modulus_one() {
        assert_eq!(mod_pow(&from_u64(9), &from_u64(4), &from_u64(1)), from_u64(0));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(&from_u64(48), &from_u64(18)), from_u64(6));
        assert_eq!(gcd(&from_u64(17), &from_u64(0)), from_u64(17));
        assert_eq!(gcd(&from_u64(0), &from_u64(17)), from_u64(17));
        assert_eq!(gcd(&from_u64(65537), &from_u64(780)), from_u64(1));
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(&from_u64(60), &from_u64(52)).unwrap(), from_u64(780));
        assert_eq!(lcm(&from_u64(4), &from_u64(6)).unwrap(), from_u64(12));
        assert_eq!(lcm(&from_u64(5), &from_u64(0)).unwrap(), from_u64(0));
        assert_eq!(lcm(&from_u64(0), &from_u64(0)), Err(ArithmeticError::DivideByZero));
    }

    #[test]
    fn test_extended_gcd() {
        let (g, x, y) = extended_gcd(&from_u64(240), &from_u64(46));
        assert_eq!(g, from_u64(2));
        assert_eq!(BigInt::from(240) * x + BigInt::from(46) * y, BigInt::from(2));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let a = from_u64(3);
        let m = from_u64(7);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!(inv, from_u64(5));

        // Verify: 3 * 5 = 15 ≡ 1 (mod 7)
        assert_eq!((a * inv) % m, from_u64(1));

        // e = 17, d = 413 for p = 61, q = 53 with lambda = 780
        assert_eq!(mod_inverse(&from_u64(17), &from_u64(780)).unwrap(), from_u64(413));
    }

    #[test]
    fn test_mod_inverse_edge_cases() {
        assert_eq!(mod_inverse(&from_u64(5), &from_u64(1)).unwrap(), from_u64(0));
        assert_eq!(mod_inverse(&from_u64(5), &from_u64(0)), Err(ArithmeticError::DivideByZero));
        assert!(matches!(
            mod_inverse(&from_u64(6), &from_u64(12)),
            Err(ArithmeticError::NoInverseExists { .. })
        ));
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(1_000_000), 1000);
        assert_eq!(isqrt(u64::MAX), 4_294_967_295);
    }
}
