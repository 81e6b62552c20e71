// RSA Session
// Holds the current key pair for a front end and guards operations that need one

use log::info;
use thiserror::Error;

use crate::rsa::decrypt::{decrypt, decrypt_json};
use crate::rsa::encrypt::encrypt;
use crate::rsa::error::{DecryptError, EncryptError, KeyError, MessageError};
use crate::rsa::keygen::{generate_keypair_from_input, KeyGenConfig, KeyPair};
use crate::rsa::message::EncryptedMessage;

/// Errors surfaced to whoever drives the session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no key pair yet: generate RSA keys first")]
    NoKeyPair,

    #[error("please enter text to process")]
    EmptyInput,

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Encrypt(#[from] EncryptError),

    #[error(transparent)]
    Decrypt(#[from] DecryptError),

    #[error(transparent)]
    Message(#[from] MessageError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Key pair state for one encryption/decryption session
#[derive(Debug, Default)]
pub struct Session {
    config: KeyGenConfig,
    keypair: Option<KeyPair>,
}

impl Session {
    pub fn new(config: KeyGenConfig) -> Self {
        Self {
            config,
            keypair: None,
        }
    }

    pub fn keypair(&self) -> Option<&KeyPair> {
        self.keypair.as_ref()
    }

    pub fn has_keys(&self) -> bool {
        self.keypair.is_some()
    }

    /// Validate textual primes and replace the current key pair
    ///
    /// A failed attempt leaves any previous key pair in place.
    pub fn generate_keys(&mut self, p: &str, q: &str) -> SessionResult<&KeyPair> {
        let keypair = generate_keypair_from_input(p, q, &self.config)?;
        info!("session key pair replaced (n = {})", keypair.public_key.n);
        Ok(self.keypair.insert(keypair))
    }

    pub fn clear_keys(&mut self) {
        self.keypair = None;
    }

    fn require_keys(&self) -> SessionResult<&KeyPair> {
        self.keypair.as_ref().ok_or(SessionError::NoKeyPair)
    }

    pub fn encrypt(&self, text: &str) -> SessionResult<EncryptedMessage> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }
        let keypair = self.require_keys()?;
        Ok(encrypt(text, &keypair.public_key)?)
    }

    pub fn decrypt(&self, encrypted: &EncryptedMessage) -> SessionResult<String> {
        let keypair = self.require_keys()?;
        Ok(decrypt(encrypted, &keypair.private_key)?)
    }

    /// Decrypt a ciphertext typed or pasted as a JSON array
    pub fn decrypt_json(&self, text: &str) -> SessionResult<String> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }
        let keypair = self.require_keys()?;
        Ok(decrypt_json(text, &keypair.private_key)?)
    }
}
