// Block Codec
// Conversion between byte buffers and fixed-width big-endian integers

use num_traits::Zero;

use super::bigint::RsaBigInt;
use super::error::{RsaError, RsaResult};

/// Lazy sequence of contiguous block slices; clone it to restart
pub type Blocks<'a> = std::slice::Chunks<'a, u8>;

/// Big-endian interpretation, the empty buffer maps to 0
pub fn bytes_to_int(buffer: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(buffer)
}

/// Big-endian encoding left-padded with zeros to exactly `width` bytes
pub fn int_to_bytes(value: &RsaBigInt, width: usize) -> RsaResult<Vec<u8>> {
    let bits = value.bits();
    if bits > (width as u64) * 8 {
        return Err(RsaError::EncodingOverflow { bits, width });
    }

    let mut result = vec![0u8; width];
    if !value.is_zero() {
        let raw = value.to_bytes_be();
        let start = width - raw.len();
        result[start..].copy_from_slice(&raw);
    }
    Ok(result)
}

/// Split into slices of `block_size` bytes, the final one holding the remainder
pub fn split_into_blocks(buffer: &[u8], block_size: usize) -> RsaResult<Blocks<'_>> {
    if block_size == 0 {
        return Err(RsaError::InvalidBlockSize);
    }
    Ok(buffer.chunks(block_size))
}

/// Apply `f` to every `(index, block)` pair, output in block order.
/// Blocks are independent, so with the `parallel` feature they run on rayon.
pub(crate) fn map_blocks<T, F>(
    buffer: &[u8],
    block_size: usize,
    parallel: bool,
    f: F,
) -> RsaResult<Vec<T>>
where
    T: Send,
    F: Fn(usize, &[u8]) -> T + Sync + Send,
{
    let blocks = split_into_blocks(buffer, block_size)?;
    if parallel {
        return Ok(par_map_blocks(buffer, block_size, f));
    }
    Ok(blocks.enumerate().map(|(index, block)| f(index, block)).collect())
}

#[cfg(feature = "parallel")]
fn par_map_blocks<T, F>(buffer: &[u8], block_size: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &[u8]) -> T + Sync + Send,
{
    use rayon::prelude::*;

    buffer
        .par_chunks(block_size)
        .enumerate()
        .map(|(index, block)| f(index, block))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn par_map_blocks<T, F>(buffer: &[u8], block_size: usize, f: F) -> Vec<T>
where
    F: Fn(usize, &[u8]) -> T,
{
    buffer
        .chunks(block_size)
        .enumerate()
        .map(|(index, block)| f(index, block))
        .collect()
}
