// RSA Encryption Implementation
// Textbook per-character RSA: each code point m becomes c = m^e mod n

use super::bigint::{mod_pow, RsaBigInt};
use super::error::EncryptError;
use super::keygen::PublicKey;
use super::message::EncryptedMessage;

/// Encrypt a single value using RSA public key
pub fn encrypt_value(m: &RsaBigInt, public_key: &PublicKey) -> RsaBigInt {
    mod_pow(m, &public_key.e, &public_key.n)
}

/// Encrypt a string using RSA public key, one value per character
pub fn encrypt(message: &str, public_key: &PublicKey) -> Result<EncryptedMessage, EncryptError> {
    if message.is_empty() {
        return Err(EncryptError::EmptyInput);
    }

    message
        .chars()
        .map(|character| {
            let code = u32::from(character);
            let m = RsaBigInt::from(code);

            // Values >= n cannot be recovered after reduction mod n
            if m >= public_key.n {
                return Err(EncryptError::MessageTooLarge {
                    character,
                    code,
                    modulus: public_key.n.clone(),
                });
            }

            Ok(encrypt_value(&m, public_key))
        })
        .collect()
}

impl PublicKey {
    /// Encrypt a message using this public key
    pub fn encrypt(&self, message: &str) -> Result<EncryptedMessage, EncryptError> {
        encrypt(message, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::generate_keypair;

    #[test]
    fn test_encrypt_string() {
        let keypair = generate_keypair(61, 53).unwrap();
        let ciphertext = encrypt("Hi", &keypair.public_key).unwrap();

        // 'H' = 72, 'i' = 105, e = 7, n = 3233
        let expected: Vec<RsaBigInt> = [72u64, 105]
            .iter()
            .map(|&m| from_u64(m).modpow(&from_u64(7), &from_u64(3233)))
            .collect();
        assert_eq!(ciphertext.values(), expected.as_slice());
    }

    #[test]
    fn test_encrypt_fixed_exponent() {
        // 3^65537 mod 35 = 33
        let key = PublicKey::new(35, 65537);
        let ciphertext = encrypt("\u{3}", &key).unwrap();
        assert_eq!(ciphertext.values(), &[from_u64(33)]);
    }

    #[test]
    fn test_encrypt_preserves_order() {
        let keypair = generate_keypair(61, 53).unwrap();
        let forward = encrypt("ab", &keypair.public_key).unwrap();
        let backward = encrypt("ba", &keypair.public_key).unwrap();

        assert_eq!(forward.values()[0], backward.values()[1]);
        assert_eq!(forward.values()[1], backward.values()[0]);
    }

    #[test]
    fn test_encrypt_empty() {
        let keypair = generate_keypair(61, 53).unwrap();
        assert_eq!(encrypt("", &keypair.public_key), Err(EncryptError::EmptyInput));
    }

    #[test]
    fn test_encrypt_message_too_large() {
        // n = 35 cannot carry 'A' (65)
        let keypair = generate_keypair(5, 7).unwrap();
        let result = keypair.public_key.encrypt("A");
        assert_eq!(
            result,
            Err(EncryptError::MessageTooLarge {
                character: 'A',
                code: 65,
                modulus: from_u64(35),
            })
        );
    }

    #[test]
    fn test_encrypt_unicode_needs_larger_modulus() {
        let small = generate_keypair(61, 53).unwrap();
        assert!(encrypt("€", &small.public_key).is_err());

        let large = generate_keypair(1009, 1013).unwrap();
        assert_eq!(encrypt("€", &large.public_key).unwrap().len(), 1);
    }
}
