use std::io;
use std::path::PathBuf;

/// Error type for the library.
#[derive(Debug, thiserror::Error)]
pub enum ChunkReaderError {
    #[error("IO Error: {0}")]
    Io(String),
    #[error("File Not Found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Position not valid: {index}")]
    OutOfBounds { index: u64 },
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),
}

impl ChunkReaderError {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, ChunkReaderError::OutOfBounds { .. })
    }
}

impl From<io::Error> for ChunkReaderError {
    fn from(e: io::Error) -> Self {
        ChunkReaderError::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChunkReaderError>;
