// Text transport for ciphertext
// Base64 around the raw block stream, for callers that need printable text

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::cipher::RsaCipher;
use super::decrypt::Decrypted;
use super::error::RsaResult;
use super::keygen::{RsaPrivateKey, RsaPublicKey};

/// Encrypt a string and encode the ciphertext as standard padded base64
pub fn encrypt_to_base64(
    cipher: &RsaCipher,
    plaintext: &str,
    public_key: &RsaPublicKey,
) -> RsaResult<String> {
    let ciphertext = cipher.encrypt(plaintext, public_key)?;
    Ok(STANDARD.encode(ciphertext))
}

/// Decode base64 ciphertext, surrounding whitespace ignored, then decrypt it
pub fn decrypt_from_base64(
    cipher: &RsaCipher,
    ciphertext: &str,
    private_key: &RsaPrivateKey,
) -> RsaResult<Decrypted> {
    let raw = STANDARD.decode(ciphertext.trim())?;
    cipher.decrypt(&raw, private_key)
}
