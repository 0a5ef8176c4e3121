//! Byte sources for random sample values.
//!
//! The default source hashes a nanosecond timestamp with BLAKE2b. It is fast
//! and good enough for test data, but it is predictable and must not be used
//! where secure randomness is required. Pass a real RNG to `rng_bytes` for that.

use std::time::{SystemTime, UNIX_EPOCH};

use blake2b_simd::Params;
use rand::RngCore;

pub const BLOCK_BITS: usize = 128;
const BLOCK_BYTES: usize = BLOCK_BITS / 8;

/// One 128-bit block derived from the current time and `index`.
pub fn time_block(index: u64) -> [u8; BLOCK_BYTES] {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let hash = Params::new()
        .hash_length(BLOCK_BYTES)
        .to_state()
        .update(&nanos.to_le_bytes())
        .update(&index.to_le_bytes())
        .finalize();

    let mut block = [0u8; BLOCK_BYTES];
    block.copy_from_slice(hash.as_bytes());
    block
}

/// Whole time-derived blocks covering at least `bits` bits.
pub fn time_bytes(bits: usize) -> Vec<u8> {
    let blocks = bits.div_ceil(BLOCK_BITS);
    let mut data = Vec::with_capacity(blocks * BLOCK_BYTES);
    for index in 0..blocks {
        data.extend_from_slice(&time_block(index as u64));
    }
    debug!("generated {} time-seeded blocks for {} bits", blocks, bits);
    data
}

/// `ceil(bits / 8)` bytes drawn from `rng`.
pub fn rng_bytes<R: RngCore + ?Sized>(rng: &mut R, bits: usize) -> Vec<u8> {
    let mut data = vec![0u8; bits.div_ceil(8)];
    rng.fill_bytes(&mut data);
    data
}
