use std::fs::File;
use std::io::{self, Read, SeekFrom};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::bounds;
use crate::cursor::ChunkCursor;
use crate::error::{ChunkReaderError, Result};
use crate::io::{ChunkSource, MmapSource};
use crate::options::ReaderOptions;

// Upper bound on the buffer reserved up front for one chunk; larger chunks
// grow as bytes actually arrive.
const PREALLOC_LIMIT: u64 = 1 << 20;

/// Random-access reader over fixed-size chunks of a byte source.
///
/// Chunk `i` covers bytes `[i * chunk_size, (i + 1) * chunk_size)`; the last
/// chunk may be shorter. The source size is queried afresh on every bounds
/// check, so the reader tracks files that change size while it is open.
pub struct ChunkedFileReader<S: ChunkSource = File> {
    source: S,
    path: Option<PathBuf>,
    chunk_size: NonZeroU64,
    position: u64,
}

impl ChunkedFileReader<File> {
    /// Open `path` with one-byte chunks.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ReaderOptions::default())
    }

    pub fn open_with_chunk_size<P: AsRef<Path>>(path: P, chunk_size: u64) -> Result<Self> {
        Self::open_with_options(path, ReaderOptions::with_chunk_size(chunk_size)?)
    }

    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = open_file(path)?;
        debug!(
            "opened {} with chunk size {}",
            path.display(),
            options.chunk_size
        );
        Ok(Self::from_parts(file, Some(path.to_path_buf()), options))
    }
}

impl ChunkedFileReader<MmapSource> {
    /// Open `path` through a read-only memory map.
    pub fn open_mmap<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = open_file(path)?;
        let source = MmapSource::open(&file)?;
        debug!(
            "mapped {} ({} bytes) with chunk size {}",
            path.display(),
            source.len(),
            options.chunk_size
        );
        Ok(Self::from_parts(source, Some(path.to_path_buf()), options))
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ChunkReaderError::FileNotFound(path.to_path_buf()),
        _ => ChunkReaderError::from(e),
    })
}

impl<S: ChunkSource> ChunkedFileReader<S> {
    /// Wrap an already open source. `chunk_size` must be positive.
    pub fn new(source: S, chunk_size: u64) -> Result<Self> {
        Ok(Self::with_options(
            source,
            ReaderOptions::with_chunk_size(chunk_size)?,
        ))
    }

    pub fn with_options(source: S, options: ReaderOptions) -> Self {
        Self::from_parts(source, None, options)
    }

    fn from_parts(source: S, path: Option<PathBuf>, options: ReaderOptions) -> Self {
        ChunkedFileReader {
            source,
            path,
            chunk_size: options.chunk_size,
            position: 0,
        }
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size.get()
    }

    /// Path the reader was opened from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Current size of the source in bytes.
    pub fn byte_len(&mut self) -> Result<u64> {
        Ok(self.source.file_size()?)
    }

    pub fn chunk_count(&mut self) -> Result<u64> {
        let size = self.byte_len()?;
        Ok(bounds::chunk_count(size, self.chunk_size))
    }

    /// Index of the last chunk, or `None` for an empty source.
    pub fn last_index(&mut self) -> Result<Option<u64>> {
        let size = self.byte_len()?;
        Ok(bounds::max_chunk_index(size, self.chunk_size))
    }

    /// Seek to `index` and return that chunk.
    pub fn read_chunk(&mut self, index: u64) -> Result<Vec<u8>> {
        self.seek(index)?;
        self.current()
    }

    /// Iterate `(index, chunk)` pairs from the start of the source.
    ///
    /// The reader is rewound on the first call to `next`; afterwards it is
    /// left on the first invalid position (or where an error occurred).
    pub fn chunks(&mut self) -> Chunks<'_, S> {
        Chunks {
            reader: self,
            started: false,
            done: false,
        }
    }

    fn seek_bytes(&mut self, offset: u64) -> Result<()> {
        self.source.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn commit_seek(&mut self, index: u64) -> Result<()> {
        if !self.valid()? {
            return Err(ChunkReaderError::OutOfBounds { index });
        }
        let offset = bounds::chunk_offset(index, self.chunk_size)
            .ok_or(ChunkReaderError::OutOfBounds { index })?;
        self.seek_bytes(offset)
    }
}

impl<S: ChunkSource> ChunkCursor for ChunkedFileReader<S> {
    type Chunk = Vec<u8>;

    fn current(&mut self) -> Result<Vec<u8>> {
        let size = self.source.file_size()?;
        let offset = match bounds::chunk_offset(self.position, self.chunk_size) {
            Some(offset) if offset < size => offset,
            // at or past end of file, including offsets no seek can reach
            _ => return Ok(Vec::new()),
        };
        self.seek_bytes(offset)?;

        let len = self.chunk_size.get();
        let mut chunk = Vec::with_capacity(len.min(PREALLOC_LIMIT) as usize);
        (&mut self.source).take(len).read_to_end(&mut chunk)?;
        trace!(
            "read chunk {} ({} bytes at offset {})",
            self.position,
            chunk.len(),
            offset
        );
        Ok(chunk)
    }

    fn next(&mut self) {
        self.position = self.position.saturating_add(1);
    }

    fn key(&self) -> u64 {
        self.position
    }

    fn valid(&mut self) -> Result<bool> {
        let size = self.source.file_size()?;
        Ok(bounds::is_valid_index(self.position, size, self.chunk_size))
    }

    fn rewind(&mut self) -> Result<()> {
        self.position = 0;
        self.seek_bytes(0)
    }

    /// A rejected seek restores the previous position and leaves the
    /// source cursor where it was.
    fn seek(&mut self, index: u64) -> Result<()> {
        let previous = self.position;
        self.position = index;
        if let Err(e) = self.commit_seek(index) {
            debug!("seek to chunk {} rejected: {}", index, e);
            self.position = previous;
            return Err(e);
        }
        trace!("seeked to chunk {}", index);
        Ok(())
    }
}

/// Iterator returned by [`ChunkedFileReader::chunks`].
///
/// Yields `Result` so I/O errors surface; iteration stops after the first
/// error.
pub struct Chunks<'a, S: ChunkSource> {
    reader: &'a mut ChunkedFileReader<S>,
    started: bool,
    done: bool,
}

impl<S: ChunkSource> Chunks<'_, S> {
    fn step(&mut self) -> Result<Option<(u64, Vec<u8>)>> {
        if self.started {
            ChunkCursor::next(&mut *self.reader);
        } else {
            self.reader.rewind()?;
            self.started = true;
        }
        if !self.reader.valid()? {
            return Ok(None);
        }
        let chunk = self.reader.current()?;
        Ok(Some((self.reader.key(), chunk)))
    }
}

impl<S: ChunkSource> Iterator for Chunks<'_, S> {
    type Item = Result<(u64, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.step() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
