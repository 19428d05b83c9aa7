use crate::error::Result;

/// Positioned cursor over a sequence of chunks.
///
/// `next` never checks bounds; callers are expected to ask `valid` before
/// touching `current`. `seek` is the only operation that rejects an index.
pub trait ChunkCursor {
    type Chunk;

    /// Chunk at the current position. Does not move the cursor.
    fn current(&mut self) -> Result<Self::Chunk>;

    /// Advance by exactly one chunk.
    fn next(&mut self);

    /// Current chunk index.
    fn key(&self) -> u64;

    /// Whether the current position names an existing chunk.
    fn valid(&mut self) -> Result<bool>;

    fn rewind(&mut self) -> Result<()>;

    /// Jump to `index`, failing with `OutOfBounds` if no such chunk exists.
    fn seek(&mut self, index: u64) -> Result<()>;
}
