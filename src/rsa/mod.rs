// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod block;
pub mod cipher;
pub mod config;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod framing;
pub mod keygen;
pub mod transport;

pub use bigint::{gcd, extended_euclid, mod_exp, mod_inverse, random_prime, PrimeSource, RsaBigInt};
pub use block::{bytes_to_int, int_to_bytes, split_into_blocks, Blocks};
pub use cipher::RsaCipher;
pub use config::RsaConfig;
pub use decrypt::{decrypt_bytes, decrypt_to_string, BlockFailure, Decrypted, DecryptedBytes};
pub use encrypt::{encrypt_bytes, encrypt_string};
pub use error::{RsaError, RsaResult};
pub use framing::BlockMode;
pub use keygen::{KeyGenerator, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
pub use transport::{decrypt_from_base64, encrypt_to_base64};
