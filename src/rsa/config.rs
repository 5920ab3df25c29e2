// RSA Configuration
// Key size and block layout shared by key generation and the cipher

use super::bigint::RsaBigInt;
use super::error::{RsaError, RsaResult};
use super::framing::BlockMode;

/// Smallest key size whose plaintext blocks still carry one byte
pub const MIN_KEY_SIZE_BITS: u32 = 16;

/// Configuration for a key pair and every block encrypted under it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaConfig {
    pub key_size_bits: u32,
    /// Lower bound of the random public exponent search
    pub min_exponent: u64,
    pub max_exponent_attempts: usize,
    pub block_mode: BlockMode,
    pub parallel: bool,
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            key_size_bits: 1024,
            min_exponent: 65537,
            max_exponent_attempts: 10_000,
            block_mode: BlockMode::StripZeros,
            parallel: true,
        }
    }
}

impl RsaConfig {
    /// Set the modulus width in bits
    pub fn with_key_size(mut self, bits: u32) -> Self {
        self.key_size_bits = bits;
        self
    }

    /// Set the lower bound of the public exponent search
    pub fn with_min_exponent(mut self, min_exponent: u64) -> Self {
        self.min_exponent = min_exponent;
        self
    }

    /// Set how many candidates the exponent search draws before giving up
    pub fn with_max_exponent_attempts(mut self, attempts: usize) -> Self {
        self.max_exponent_attempts = attempts;
        self
    }

    /// Set how plaintext chunks are laid out inside a block
    pub fn with_block_mode(mut self, mode: BlockMode) -> Self {
        self.block_mode = mode;
        self
    }

    /// Map blocks through rayon when the `parallel` feature is on
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Width of the modulus, of every ciphertext block, in bytes
    pub fn key_size_bytes(&self) -> usize {
        (self.key_size_bits / 8) as usize
    }

    /// Width of one ciphertext block in bytes
    pub fn ciphertext_block_size(&self) -> usize {
        self.key_size_bytes()
    }

    /// Number of message bytes carried by one block
    pub fn plaintext_block_size(&self) -> usize {
        self.key_size_bytes()
            .saturating_sub(1 + self.block_mode.header_len())
    }

    /// Check the key size against the block layout
    pub fn validate(&self) -> RsaResult<()> {
        if self.key_size_bits < MIN_KEY_SIZE_BITS || self.key_size_bits % 8 != 0 {
            return Err(RsaError::InvalidKeySize(self.key_size_bits));
        }
        let block_size = self.plaintext_block_size();
        if block_size == 0 {
            return Err(RsaError::InvalidKeySize(self.key_size_bits));
        }
        // the length header is two bytes wide
        if self.block_mode == BlockMode::LengthPrefixed && block_size > usize::from(u16::MAX) {
            return Err(RsaError::InvalidKeySize(self.key_size_bits));
        }
        Ok(())
    }

    /// Check that `n` suits this key size: every plaintext block
    /// (`key_size_bytes - 1` bytes) stays below `n` and every value below `n`
    /// fits in `key_size_bytes` bytes, i.e. `8(K-1) < bits(n) <= 8K`.
    pub fn check_modulus(&self, n: &RsaBigInt) -> RsaResult<()> {
        let max_bits = u64::from(self.key_size_bits);
        let min_bits = 8 * (self.key_size_bytes() as u64).saturating_sub(1) + 1;
        let bits = n.bits();
        if bits < min_bits || bits > max_bits {
            return Err(RsaError::ModulusMismatch {
                bits,
                key_size_bits: self.key_size_bits,
            });
        }
        Ok(())
    }
}
