// RSA Encryption Implementation
// Raw modular exponentiation over fixed-width blocks, no padding scheme

use log::trace;

use super::bigint::mod_exp;
use super::block::{int_to_bytes, map_blocks};
use super::config::RsaConfig;
use super::error::RsaResult;
use super::keygen::RsaPublicKey;

/// Encrypt bytes using RSA public key
///
/// The message is cut into `config.plaintext_block_size()` chunks and every
/// chunk becomes exactly `config.ciphertext_block_size()` bytes of output.
/// Empty input gives empty output.
pub fn encrypt_bytes(
    plaintext: &[u8],
    public_key: &RsaPublicKey,
    config: &RsaConfig,
) -> RsaResult<Vec<u8>> {
    config.validate()?;
    config.check_modulus(&public_key.n)?;
    let key_bytes = config.key_size_bytes();
    let mode = config.block_mode;

    let blocks = map_blocks(
        plaintext,
        config.plaintext_block_size(),
        config.parallel,
        |index, chunk| {
            // Compute c = m^e mod n
            let m = mode.frame(chunk, key_bytes)?;
            let c = mod_exp(&m, &public_key.e, &public_key.n);
            trace!("encrypted block {} ({} bytes)", index, chunk.len());
            int_to_bytes(&c, key_bytes)
        },
    )?;

    let mut ciphertext = Vec::with_capacity(blocks.len() * key_bytes);
    for block in blocks {
        ciphertext.extend_from_slice(&block?);
    }
    Ok(ciphertext)
}

/// Encrypt a string using RSA public key
pub fn encrypt_string(
    plaintext: &str,
    public_key: &RsaPublicKey,
    config: &RsaConfig,
) -> RsaResult<Vec<u8>> {
    encrypt_bytes(plaintext.as_bytes(), public_key, config)
}
