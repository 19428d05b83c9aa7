use std::num::NonZeroU64;

use crate::error::{ChunkReaderError, Result};

pub const DEFAULT_CHUNK_SIZE: NonZeroU64 = NonZeroU64::MIN;

/// Construction settings for a chunked reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    pub chunk_size: NonZeroU64,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ReaderOptions {
    pub fn with_chunk_size(chunk_size: u64) -> Result<Self> {
        let chunk_size = NonZeroU64::new(chunk_size).ok_or_else(|| {
            ChunkReaderError::InvalidArgument("chunk size must be positive".to_string())
        })?;
        Ok(ReaderOptions { chunk_size })
    }
}
