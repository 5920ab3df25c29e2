// RSA Errors
// Every failure the core can report, as one typed enum

use std::string::FromUtf8Error;

use thiserror::Error;

/// Result type for RSA operations
pub type RsaResult<T> = Result<T, RsaError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsaError {
    /// `gcd(e, m) != 1`, so `e` has no inverse modulo `m`
    #[error("modular inverse does not exist (operands are not coprime)")]
    NoInverse,

    #[error("integer of {bits} bits does not fit in {width} bytes")]
    EncodingOverflow { bits: u64, width: usize },

    /// Modulus too narrow for the plaintext blocks or too wide for the ciphertext blocks
    #[error("{bits}-bit modulus does not match a {key_size_bits}-bit key size")]
    ModulusMismatch { bits: u64, key_size_bits: u32 },

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("malformed ciphertext: {len} bytes is not a multiple of the {block_size}-byte block size")]
    MalformedCiphertext { len: usize, block_size: usize },

    #[error("decrypted plaintext is not valid UTF-8: {0}")]
    TextDecoding(#[from] FromUtf8Error),

    #[error("invalid key size `{0}` bits")]
    InvalidKeySize(u32),

    #[error("block size must be at least one byte")]
    InvalidBlockSize,

    /// Length header of a length-prefixed block exceeds the block capacity
    #[error("block declares {declared} bytes but can carry at most {capacity}")]
    InvalidBlockLength { declared: usize, capacity: usize },

    #[error("invalid base64 ciphertext: {0}")]
    Base64(#[from] base64::DecodeError),
}
