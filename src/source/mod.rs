//! Source Layer: byte sources di bawah `PacketReader`
//!
//! Source cukup bisa mengisi buffer dan melaporkan salah satu dari:
//! - `Fill::Bytes(n)`: n bytes ditulis ke awal buffer
//! - `Fill::Nothing`: belum ada data, tapi belum EOF
//! - `Fill::Eof`: stream habis
//!
//! Adapters:
//! - `ReadSource`: any `std::io::Read`
//! - `MmapSource`: memory-mapped file (zero-copy view)
//! - `ScriptedSource`: in-memory scripted chunks for tests and benches

mod mmap_source;
mod scripted;

use std::io::{self, Read};

pub use mmap_source::MmapSource;
pub use scripted::{ScriptedSource, Step};

/// Outcome of a single `ByteSource::read_into` attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Jumlah bytes yang ditulis ke buffer
    Bytes(usize),
    /// Nothing available right now, not EOF
    Nothing,
    /// End of stream
    Eof,
}

/// Underlying byte source of a `PacketReader`
pub trait ByteSource {
    /// Reads up to `buf.len()` bytes into the front of `buf`.
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Fill>;

    /// Bytes readable right now without blocking. `Ok(0)` means none or unknown.
    fn available(&self) -> io::Result<usize> {
        Ok(0)
    }

    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline(always)]
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        (**self).read_into(buf)
    }

    fn available(&self) -> io::Result<usize> {
        (**self).available()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    #[inline(always)]
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        (**self).read_into(buf)
    }

    fn available(&self) -> io::Result<usize> {
        (**self).available()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Maps a `std::io::Read` to `Fill`
///
/// `Ok(0)` for a non-empty buffer is EOF. `WouldBlock` and `Interrupted`
/// are "nothing right now"; nothing is retried here.
#[inline]
pub(crate) fn fill_from_read<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<Fill> {
    match reader.read(buf) {
        Ok(0) => Ok(Fill::Eof),
        Ok(n) => Ok(Fill::Bytes(n)),
        Err(ref e)
            if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::Interrupted =>
        {
            Ok(Fill::Nothing)
        }
        Err(e) => Err(e),
    }
}

/// Adapter for any `std::io::Read`
///
/// Non-blocking readers (sockets, pipes) surface `WouldBlock` as
/// `Fill::Nothing`. `available()` is always 0 since `Read` cannot be probed.
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
}

impl<R: Read> ReadSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    #[inline(always)]
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        fill_from_read(&mut self.inner, buf)
    }
}
