// Toy RSA
// Educational RSA key generation, per-character encryption and decryption,
// and a benchmark harness for timing them. Not for protecting real data.

pub mod rsa;
pub mod bench;
pub mod session;
pub mod util;

pub use rsa::{
    decrypt, encrypt, generate_keypair, EncryptedMessage, KeyGenConfig, KeyPair, PrivateKey, PublicKey,
};
pub use bench::{BenchConfig, Benchmark, BenchmarkOutcome, BenchmarkResult, KeySize};
pub use session::{Session, SessionError};
