// RSA Error Types
// One enum per failure domain, so callers can tell bad parameters apart from
// operations that are not yet possible and from malformed external data

use thiserror::Error;

use super::bigint::RsaBigInt;

/// Key parameter validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{value} is out of range: primes must not exceed {max}")]
    OutOfRange { value: u64, max: u64 },

    #[error("{0} is not a prime number")]
    NotPrime(u64),

    #[error("p and q must be distinct primes (both were {0})")]
    NotDistinct(u64),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// Failures of the modular arithmetic primitives
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivideByZero,

    #[error("{value} has no inverse modulo {modulus}")]
    NoInverseExists { value: RsaBigInt, modulus: RsaBigInt },
}

/// Encryption failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncryptError {
    #[error("message is empty")]
    EmptyInput,

    #[error("character {character:?} (code {code}) is too large for modulus {modulus}")]
    MessageTooLarge {
        character: char,
        code: u32,
        modulus: RsaBigInt,
    },
}

/// Decryption failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecryptError {
    #[error("invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    #[error("invalid private key: {0}")]
    InvalidKey(&'static str),

    #[error("decrypted value {0} is not a valid character")]
    InvalidCodePoint(RsaBigInt),
}

/// Failures while reading an externally supplied ciphertext
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("malformed ciphertext: {0}")]
    Parse(String),

    #[error(transparent)]
    Ciphertext(#[from] DecryptError),
}

pub type KeyResult<T> = Result<T, KeyError>;
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;
