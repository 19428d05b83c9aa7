//! Exact chunk arithmetic over byte sizes.
//!
//! Everything is `u64`, the width of a file offset, so sizes and indices past
//! the 32-bit and 53-bit limits are handled without loss. Products are
//! checked instead of wrapping.

use std::num::NonZeroU64;

/// Index of the last chunk of a `size`-byte source, or `None` if it is empty.
pub fn max_chunk_index(size: u64, chunk_size: NonZeroU64) -> Option<u64> {
    // floor((size - 1) / chunk_size); u64 division truncates toward zero
    size.checked_sub(1).map(|last_byte| last_byte / chunk_size.get())
}

/// Number of chunks, counting a trailing partial chunk.
pub fn chunk_count(size: u64, chunk_size: NonZeroU64) -> u64 {
    max_chunk_index(size, chunk_size).map_or(0, |max| max + 1)
}

/// Byte offset of chunk `index`, or `None` if it does not fit in a `u64`.
pub fn chunk_offset(index: u64, chunk_size: NonZeroU64) -> Option<u64> {
    index.checked_mul(chunk_size.get())
}

pub fn is_valid_index(index: u64, size: u64, chunk_size: NonZeroU64) -> bool {
    match max_chunk_index(size, chunk_size) {
        Some(max) => index <= max,
        None => false,
    }
}
