use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use memmap2::Mmap;

use super::FileSizeProvider;

/// Read-only memory map with its own cursor, usable as a chunk source.
///
/// The size is fixed when the file is mapped, so later growth of the file
/// is not seen. Single-threaded like every other source.
#[derive(Debug)]
pub struct MmapSource {
    // `None` for zero-length files, which cannot be mapped on every platform.
    mmap: Option<Mmap>,
    pos: u64,
}

impl MmapSource {
    pub fn open(file: &File) -> io::Result<Self> {
        if file.metadata()?.len() == 0 {
            return Ok(Self { mmap: None, pos: 0 });
        }
        // SAFETY: the map is read-only; callers must not truncate the file
        // while the source is alive.
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Self::from_mmap(mmap))
    }

    pub fn from_mmap(mmap: Mmap) -> Self {
        Self {
            mmap: Some(mmap),
            pos: 0,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn len(&self) -> u64 {
        self.as_slice().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Read for MmapSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let data = self.as_slice();
        if self.pos >= data.len() as u64 {
            return Ok(0);
        }
        // pos < len <= usize::MAX here
        let start = self.pos as usize;
        let to_read = buf.len().min(data.len() - start);
        buf[..to_read].copy_from_slice(&data[start..start + to_read]);
        self.pos += to_read as u64;
        Ok(to_read)
    }
}

impl Seek for MmapSource {
    fn seek(&mut self, how: SeekFrom) -> io::Result<u64> {
        let new = match how {
            SeekFrom::Start(off) => Some(off),
            SeekFrom::End(off) => self.len().checked_add_signed(off),
            SeekFrom::Current(off) => self.pos.checked_add_signed(off),
        };

        match new {
            Some(pos) => {
                self.pos = pos;
                Ok(pos)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}

impl FileSizeProvider for MmapSource {
    fn file_size(&mut self) -> io::Result<u64> {
        Ok(self.len())
    }
}
