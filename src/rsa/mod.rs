// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod error;
pub mod primes;
pub mod keygen;
pub mod message;
pub mod encrypt;
pub mod decrypt;

pub use bigint::{gcd, lcm, mod_inverse, mod_pow, RsaBigInt};
pub use error::{ArithmeticError, DecryptError, EncryptError, KeyError, MessageError};
pub use primes::{is_prime, validate_key_inputs, validate_primes, DEFAULT_MAX_PRIME};
pub use keygen::{
    demonstration_example, generate_keypair, generate_keypair_from_input, generate_keypair_with,
    KeyGenConfig, KeyPair, PrivateKey, PublicKey,
};
pub use message::EncryptedMessage;
pub use encrypt::encrypt;
pub use decrypt::{decrypt, decrypt_json, decrypt_value};
