// RSA Decryption Implementation
// Inverts per-character encryption: m = c^d mod n, then back to a character

use num_traits::{ToPrimitive, Zero};

use super::bigint::{from_u64, mod_pow, RsaBigInt};
use super::error::{DecryptError, MessageError};
use super::keygen::PrivateKey;
use super::message::EncryptedMessage;

/// Reject keys that cannot decrypt anything
pub fn check_private_key(private_key: &PrivateKey) -> Result<(), DecryptError> {
    if private_key.n.is_zero() {
        return Err(DecryptError::InvalidKey("modulus n must be positive"));
    }
    if private_key.d.is_zero() {
        return Err(DecryptError::InvalidKey("private exponent d must be positive"));
    }
    Ok(())
}

/// Decrypt a single value: c^d mod n
pub fn decrypt_value(c: u64, d: u64, n: u64) -> Result<u64, DecryptError> {
    let key = PrivateKey::new(n, d);
    check_private_key(&key)?;

    let m = mod_pow(&from_u64(c), &key.d, &key.n);
    // m < n, and n came from a u64
    m.to_u64()
        .ok_or_else(|| DecryptError::InvalidCiphertext(format!("{} does not fit in 64 bits", m)))
}

fn to_char(m: RsaBigInt) -> Result<char, DecryptError> {
    m.to_u32()
        .and_then(char::from_u32)
        .ok_or(DecryptError::InvalidCodePoint(m))
}

/// Decrypt ciphertext values back into the original string
pub fn decrypt(encrypted: &EncryptedMessage, private_key: &PrivateKey) -> Result<String, DecryptError> {
    check_private_key(private_key)?;

    encrypted
        .values()
        .iter()
        .map(|c| to_char(mod_pow(c, &private_key.d, &private_key.n)))
        .collect()
}

/// Parse a JSON ciphertext array and decrypt it
pub fn decrypt_json(text: &str, private_key: &PrivateKey) -> Result<String, MessageError> {
    let encrypted = EncryptedMessage::from_json(text)?;
    Ok(decrypt(&encrypted, private_key)?)
}

impl PrivateKey {
    /// Decrypt a ciphertext using this private key
    pub fn decrypt(&self, encrypted: &EncryptedMessage) -> Result<String, DecryptError> {
        decrypt(encrypted, self)
    }
}
