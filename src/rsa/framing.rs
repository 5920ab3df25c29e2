// Block Framing
// How a plaintext chunk is laid out inside one block and recovered after decryption
//
// StripZeros:     the chunk itself; decryption drops every leading zero byte
// LengthPrefixed: [len_hi, len_lo] || chunk || zero fill, `key_size_bytes - 1` bytes wide

use super::block::{bytes_to_int, int_to_bytes};
use super::bigint::RsaBigInt;
use super::error::{RsaError, RsaResult};

const LENGTH_HEADER_LEN: usize = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlockMode {
    /// Leading zero bytes of a plaintext block are indistinguishable from
    /// the width padding and do not survive a round trip.
    #[default]
    StripZeros,
    /// Each block records its own length, so any byte sequence round-trips.
    LengthPrefixed,
}

impl BlockMode {
    /// Bytes of framing header inside each plaintext block
    pub fn header_len(self) -> usize {
        match self {
            BlockMode::StripZeros => 0,
            BlockMode::LengthPrefixed => LENGTH_HEADER_LEN,
        }
    }

    /// Smallest modulus width, in bytes, that leaves room for one message byte
    fn min_key_size_bytes(self) -> usize {
        1 + self.header_len() + 1
    }

    fn check_width(self, key_size_bytes: usize) -> RsaResult<()> {
        if key_size_bytes < self.min_key_size_bytes() {
            return Err(RsaError::InvalidBlockSize);
        }
        Ok(())
    }

    /// Integer to encrypt for one plaintext chunk.
    /// `key_size_bytes` is the modulus width.
    pub(crate) fn frame(self, chunk: &[u8], key_size_bytes: usize) -> RsaResult<RsaBigInt> {
        self.check_width(key_size_bytes)?;
        match self {
            BlockMode::StripZeros => Ok(bytes_to_int(chunk)),
            BlockMode::LengthPrefixed => {
                let width = key_size_bytes - 1;
                let capacity = width - LENGTH_HEADER_LEN;
                if chunk.len() > capacity {
                    return Err(RsaError::InvalidBlockLength {
                        declared: chunk.len(),
                        capacity,
                    });
                }
                let mut framed = Vec::with_capacity(width);
                framed.extend_from_slice(&(chunk.len() as u16).to_be_bytes());
                framed.extend_from_slice(chunk);
                framed.resize(width, 0);
                Ok(bytes_to_int(&framed))
            }
        }
    }

    /// Recover the plaintext chunk from a decrypted block integer
    pub(crate) fn unframe(self, value: &RsaBigInt, key_size_bytes: usize) -> RsaResult<Vec<u8>> {
        self.check_width(key_size_bytes)?;
        match self {
            BlockMode::StripZeros => {
                let bytes = int_to_bytes(value, key_size_bytes)?;
                let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
                Ok(bytes[start..].to_vec())
            }
            BlockMode::LengthPrefixed => {
                let bytes = int_to_bytes(value, key_size_bytes - 1)?;
                let capacity = bytes.len() - LENGTH_HEADER_LEN;
                let declared = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
                if declared > capacity {
                    return Err(RsaError::InvalidBlockLength { declared, capacity });
                }
                let body = &bytes[LENGTH_HEADER_LEN..];
                Ok(body[..declared].to_vec())
            }
        }
    }
}
