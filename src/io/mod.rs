use std::fs::File;
use std::io::{self, Cursor, Read, Seek};

mod mmap;

pub use mmap::MmapSource;

/// Reports the current byte size of a source.
///
/// Implementations must re-derive the size on every call; readers rely on
/// this to stay correct when the backing file grows or shrinks underneath.
pub trait FileSizeProvider {
    fn file_size(&mut self) -> io::Result<u64>;
}

/// Anything a chunked reader can sit on top of.
pub trait ChunkSource: Read + Seek + FileSizeProvider {}
impl<T: Read + Seek + FileSizeProvider> ChunkSource for T {}

impl FileSizeProvider for File {
    fn file_size(&mut self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }
}

/// In-memory source, mostly useful as a test double.
impl<T: AsRef<[u8]>> FileSizeProvider for Cursor<T> {
    fn file_size(&mut self) -> io::Result<u64> {
        Ok(self.get_ref().as_ref().len() as u64)
    }
}

impl<T: FileSizeProvider + ?Sized> FileSizeProvider for &mut T {
    fn file_size(&mut self) -> io::Result<u64> {
        (**self).file_size()
    }
}

impl<T: FileSizeProvider + ?Sized> FileSizeProvider for Box<T> {
    fn file_size(&mut self) -> io::Result<u64> {
        (**self).file_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_size_follows_buffer() {
        let mut cur = Cursor::new(vec![0u8; 42]);
        assert_eq!(cur.file_size().unwrap(), 42);
        cur.get_mut().truncate(10);
        assert_eq!(cur.file_size().unwrap(), 10);
    }

    #[test]
    fn file_size_is_fresh() {
        use std::io::Write;

        let mut tmp = tempfile::tempfile().unwrap();
        assert_eq!(tmp.file_size().unwrap(), 0);
        tmp.write_all(b"12345").unwrap();
        assert_eq!(tmp.file_size().unwrap(), 5);
        tmp.set_len(1).unwrap();
        assert_eq!((&mut tmp).file_size().unwrap(), 1);
    }
}
