// RSA Decryption Implementation
// Block-by-block inverse of `encrypt`, with a per-block failure report

use log::{trace, warn};

use super::bigint::mod_exp;
use super::block::{bytes_to_int, map_blocks};
use super::config::RsaConfig;
use super::error::{RsaError, RsaResult};
use super::keygen::RsaPrivateKey;

/// A ciphertext block that could not be turned back into plaintext
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFailure {
    pub index: usize,
    pub error: RsaError,
}

/// Best-effort plaintext bytes plus every block that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedBytes {
    pub plaintext: Vec<u8>,
    pub failures: Vec<BlockFailure>,
}

/// Best-effort plaintext text plus every block that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decrypted {
    pub text: String,
    pub failures: Vec<BlockFailure>,
}

impl DecryptedBytes {
    /// Number of ciphertext blocks that contributed no bytes
    pub fn failed_blocks(&self) -> usize {
        self.failures.len()
    }

    /// True when every block decoded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Decrypted {
    /// Number of ciphertext blocks that contributed no text
    pub fn failed_blocks(&self) -> usize {
        self.failures.len()
    }

    /// True when every block decoded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Decrypt ciphertext bytes using RSA private key
///
/// The ciphertext length must be a multiple of `config.ciphertext_block_size()`;
/// that is checked before any block is touched. A block whose plaintext cannot
/// be recovered is recorded in `failures` and contributes no bytes.
pub fn decrypt_bytes(
    ciphertext: &[u8],
    private_key: &RsaPrivateKey,
    config: &RsaConfig,
) -> RsaResult<DecryptedBytes> {
    config.validate()?;
    config.check_modulus(&private_key.n)?;
    let key_bytes = config.ciphertext_block_size();
    if ciphertext.len() % key_bytes != 0 {
        return Err(RsaError::MalformedCiphertext {
            len: ciphertext.len(),
            block_size: key_bytes,
        });
    }

    let mode = config.block_mode;
    let blocks = map_blocks(ciphertext, key_bytes, config.parallel, |index, block| {
        // Compute m = c^d mod n
        let c = bytes_to_int(block);
        let m = mod_exp(&c, &private_key.d, &private_key.n);
        trace!("decrypted block {}", index);
        mode.unframe(&m, key_bytes)
    })?;

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut failures = Vec::new();
    for (index, block) in blocks.into_iter().enumerate() {
        match block {
            Ok(bytes) => plaintext.extend_from_slice(&bytes),
            Err(error) => {
                warn!("failed to decode block {}: {}", index, error);
                failures.push(BlockFailure { index, error });
            }
        }
    }

    Ok(DecryptedBytes { plaintext, failures })
}

/// Decrypt ciphertext to a string
pub fn decrypt_to_string(
    ciphertext: &[u8],
    private_key: &RsaPrivateKey,
    config: &RsaConfig,
) -> RsaResult<Decrypted> {
    let DecryptedBytes { plaintext, failures } = decrypt_bytes(ciphertext, private_key, config)?;
    let text = String::from_utf8(plaintext)?;
    Ok(Decrypted { text, failures })
}
