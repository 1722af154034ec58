//! Memory-Mapped File Source
//!
//! File di-mmap read-only, lalu disajikan sebagai byte source:
//! - Zero-copy view: `remaining()` langsung dari page cache
//! - `available()` selalu tepat (sisa bytes di mapping)
//! - Tidak pernah `Fill::Nothing`: data ada atau EOF

use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::io;
use std::path::Path;

use super::{ByteSource, Fill};

/// Mmap-backed byte source over a file
pub struct MmapSource {
    // None untuk file kosong (mapping 0 bytes tidak didukung semua platform)
    mmap: Option<Mmap>,
    read_pos: usize,
}

impl MmapSource {
    /// Membuka file dan memetakan seluruh isinya
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::from_file(&file)
    }

    /// Memetakan file yang sudah terbuka
    pub fn from_file(file: &File) -> io::Result<Self> {
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(Self {
                mmap: None,
                read_pos: 0,
            });
        }

        let len = usize::try_from(len)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "file too large to map"))?;

        // SAFETY: Mapping read-only; file tidak boleh di-truncate selama source hidup
        let mmap = unsafe { MmapOptions::new().len(len).map(file)? };

        Ok(Self {
            mmap: Some(mmap),
            read_pos: 0,
        })
    }

    /// Total mapped length
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.mmap.as_ref().map_or(0, |m| m.len())
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.read_pos
    }

    /// Unread bytes (zero-copy)
    #[inline(always)]
    pub fn remaining(&self) -> &[u8] {
        match &self.mmap {
            Some(mmap) => &mmap[self.read_pos..],
            None => &[],
        }
    }
}

impl ByteSource for MmapSource {
    #[inline]
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        let remaining = self.remaining();
        if remaining.is_empty() {
            return Ok(Fill::Eof);
        }

        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.read_pos += n;

        Ok(Fill::Bytes(n))
    }

    #[inline(always)]
    fn available(&self) -> io::Result<usize> {
        Ok(self.len() - self.read_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempdir::TempDir;

    fn write_file(dir: &TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(data).unwrap();
        path
    }

    #[test]
    fn test_mmap_source_basic() {
        let dir = TempDir::new("kurir_mmap").unwrap();
        let path = write_file(&dir, "data.bin", b"Hello, Kurir!");

        let mut source = MmapSource::open(&path).unwrap();
        assert_eq!(source.len(), 13);
        assert_eq!(source.available().unwrap(), 13);

        let mut buf = [0u8; 8];
        assert_eq!(source.read_into(&mut buf).unwrap(), Fill::Bytes(8));
        assert_eq!(&buf, b"Hello, K");
        assert_eq!(source.remaining(), b"urir!");
        assert_eq!(source.position(), 8);

        assert_eq!(source.read_into(&mut buf).unwrap(), Fill::Bytes(5));
        assert_eq!(&buf[..5], b"urir!");
        assert_eq!(source.available().unwrap(), 0);
        assert_eq!(source.read_into(&mut buf).unwrap(), Fill::Eof);
    }

    #[test]
    fn test_mmap_empty_file() {
        let dir = TempDir::new("kurir_mmap_empty").unwrap();
        let path = write_file(&dir, "empty.bin", b"");

        let mut source = MmapSource::open(&path).unwrap();
        assert!(source.is_empty());

        let mut buf = [0u8; 4];
        assert_eq!(source.read_into(&mut buf).unwrap(), Fill::Eof);
    }
}
