pub mod bounds;
pub mod cursor;
pub mod error;
pub mod io;
pub mod options;
pub mod reader;

pub use cursor::ChunkCursor;
pub use error::{ChunkReaderError, Result};
pub use io::{ChunkSource, FileSizeProvider, MmapSource};
pub use options::{ReaderOptions, DEFAULT_CHUNK_SIZE};
pub use reader::{ChunkedFileReader, Chunks};
