// RSA Cipher
// Encrypt/decrypt arbitrary-length messages under one configuration

use super::config::RsaConfig;
use super::decrypt::{decrypt_bytes, decrypt_to_string, Decrypted, DecryptedBytes};
use super::encrypt::{encrypt_bytes, encrypt_string};
use super::error::RsaResult;
use super::keygen::{RsaKeyPair, RsaPrivateKey, RsaPublicKey};

/// Encrypts and decrypts whole messages under one `RsaConfig`
#[derive(Debug, Clone, Default)]
pub struct RsaCipher {
    config: RsaConfig,
}

impl RsaCipher {
    /// Create a cipher for a validated configuration
    pub fn new(config: RsaConfig) -> RsaResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Cipher sharing the configuration the key pair was generated with
    pub fn for_keypair(keypair: &RsaKeyPair) -> Self {
        Self {
            config: keypair.config.clone(),
        }
    }

    /// Configuration every message is split and framed with
    pub fn config(&self) -> &RsaConfig {
        &self.config
    }

    /// Encrypt a string using RSA public key
    pub fn encrypt(&self, plaintext: &str, public_key: &RsaPublicKey) -> RsaResult<Vec<u8>> {
        encrypt_string(plaintext, public_key, &self.config)
    }

    /// Encrypt raw bytes using RSA public key
    pub fn encrypt_bytes(&self, plaintext: &[u8], public_key: &RsaPublicKey) -> RsaResult<Vec<u8>> {
        encrypt_bytes(plaintext, public_key, &self.config)
    }

    /// Decrypt ciphertext to text, reporting skipped blocks
    pub fn decrypt(&self, ciphertext: &[u8], private_key: &RsaPrivateKey) -> RsaResult<Decrypted> {
        decrypt_to_string(ciphertext, private_key, &self.config)
    }

    /// Decrypt ciphertext to raw bytes, reporting skipped blocks
    pub fn decrypt_bytes(
        &self,
        ciphertext: &[u8],
        private_key: &RsaPrivateKey,
    ) -> RsaResult<DecryptedBytes> {
        decrypt_bytes(ciphertext, private_key, &self.config)
    }
}
