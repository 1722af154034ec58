//! PacketReader: packet dan byte reads di atas satu `ByteSource`
//!
//! State machine: OPEN → OPEN (packets mengalir) → CLOSED saat EOF.
//! CLOSED bersifat terminal; source tidak dipanggil lagi setelahnya.
//!
//! Bytes sisa dari byte-level read disimpan di `pending` dan selalu
//! disajikan sebelum source dibaca lagi.

use std::io::{self, BufRead, Read};
use std::mem;
use std::thread;

use super::packet::{read_packet_from, Packet, ReadMode};
use crate::config::ReaderConfig;
use crate::error::ConfigError;
use crate::source::{ByteSource, ReadSource};

/// Packet-oriented reader over a `ByteSource`
///
/// Not meant for concurrent use. One consumer per instance; the `&mut self`
/// receivers enforce that for safe code.
#[derive(Debug)]
pub struct PacketReader<S> {
    source: S,
    packet_size: usize,
    no_delay: bool,
    // Packet terakhir dari byte-level read, dibaca mulai `pending_pos`
    pending: Vec<u8>,
    pending_pos: usize,
    eof: bool,
    closed: bool,
}

impl<R: Read> PacketReader<ReadSource<R>> {
    /// Reader over any `std::io::Read` with the default configuration
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReadSource::new(reader))
    }
}

impl<S: ByteSource> PacketReader<S> {
    /// Membuat reader dengan `ReaderConfig::default()`
    pub fn new(source: S) -> Self {
        let config = ReaderConfig::default();
        Self::build(source, config)
    }

    pub fn with_config(source: S, config: ReaderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(source, config))
    }

    pub fn with_packet_size(
        source: S,
        packet_size: usize,
        no_delay: bool,
    ) -> Result<Self, ConfigError> {
        Self::with_config(source, ReaderConfig::new(packet_size, no_delay))
    }

    fn build(source: S, config: ReaderConfig) -> Self {
        Self {
            source,
            packet_size: config.packet_size,
            no_delay: config.no_delay,
            pending: Vec::new(),
            pending_pos: 0,
            eof: false,
            closed: false,
        }
    }

    #[inline(always)]
    pub fn packet_size(&self) -> usize {
        self.packet_size
    }

    #[inline(always)]
    pub fn no_delay(&self) -> bool {
        self.no_delay
    }

    /// `true` once the source reported end of stream (or after `close`)
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Bytes retained from byte-level reads, not yet handed out
    #[inline(always)]
    pub fn buffered(&self) -> usize {
        self.pending.len() - self.pending_pos
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Unwraps the source. Retained bytes are lost.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Next packet using the configured default mode.
    ///
    /// Equivalent to `read_packet(self.no_delay())`.
    pub fn read_next(&mut self) -> io::Result<Packet> {
        self.read_packet(self.no_delay)
    }

    /// Next packet.
    ///
    /// With `read_partial == false` this may block until `packet_size` bytes
    /// were collected or the stream ended; a short packet is returned only
    /// at EOF. With `read_partial == true` at most one source read is made
    /// and whatever it produced is returned, which may be `Packet::Empty`.
    pub fn read_packet(&mut self, read_partial: bool) -> io::Result<Packet> {
        self.read_packet_mode(ReadMode::from_partial(read_partial))
    }

    pub fn read_packet_mode(&mut self, mode: ReadMode) -> io::Result<Packet> {
        let packet = self.assemble(mode)?;
        if let Packet::Data(bytes) = &packet {
            log::trace!("packet assembled: {} bytes ({:?})", bytes.len(), mode);
        }
        Ok(packet)
    }

    /// Full packets deliverable right now without blocking.
    ///
    /// Counts retained bytes plus what the source reports as readable
    /// (`ByteSource::available`). Never reads. Probe failures count as 0.
    pub fn packets_available(&self) -> usize {
        self.available() / self.packet_size
    }

    /// Bytes deliverable right now without blocking (same rule as
    /// `packets_available`, not rounded to packets)
    pub fn available(&self) -> usize {
        let buffered = self.buffered();
        if self.eof {
            return buffered;
        }

        match self.source.available() {
            Ok(n) => buffered.saturating_add(n),
            Err(e) => {
                log::debug!("source availability probe failed: {}", e);
                buffered
            }
        }
    }

    /// Iterator of blocking packets until EOF
    pub fn packets(&mut self) -> Packets<'_, S> {
        Packets { reader: self }
    }

    /// Single byte, or `None` at EOF. Blocks until a byte is available.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.fill_buf()?.first().copied();
        if byte.is_some() {
            self.consume(1);
        }
        Ok(byte)
    }

    /// Reads into `buf[offset..offset + len]`; returns 0 only at EOF
    /// (or when `len == 0`).
    pub fn read_into(&mut self, buf: &mut [u8], offset: usize, len: usize) -> io::Result<usize> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= buf.len())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "range out of buffer bounds")
            })?;

        self.read(&mut buf[offset..end])
    }

    /// Drops retained bytes, enters the terminal state and closes the source.
    ///
    /// The source is closed once; later calls are no-ops.
    pub fn close(&mut self) -> io::Result<()> {
        self.pending = Vec::new();
        self.pending_pos = 0;
        self.eof = true;

        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.source.close()
    }

    /// Core assembly loop.
    ///
    /// Retained bytes dipakai dulu. Setiap percobaan baca lewat
    /// `read_packet_from` dengan buffer seukuran sisa kapasitas packet.
    fn assemble(&mut self, mode: ReadMode) -> io::Result<Packet> {
        let mut packet = self.take_pending();

        loop {
            if packet.len() >= self.packet_size {
                return Ok(Packet::Data(packet));
            }
            if self.eof {
                return Ok(Self::finish_at_eof(packet));
            }

            let remaining = self.packet_size - packet.len();
            let attempt = match read_packet_from(&mut self.source, vec![0u8; remaining]) {
                Ok(attempt) => attempt,
                Err(e) => {
                    // Bytes yang sudah terkumpul tidak boleh hilang
                    self.retain(packet);
                    return Err(e);
                }
            };

            match attempt {
                Packet::Data(bytes) => {
                    if packet.is_empty() {
                        packet = bytes;
                    } else {
                        packet.extend_from_slice(&bytes);
                    }
                    if mode.is_partial() {
                        return Ok(Self::finish(packet));
                    }
                }
                Packet::Empty => {
                    if mode.is_partial() {
                        return Ok(Self::finish(packet));
                    }
                    thread::yield_now();
                }
                Packet::Eof => {
                    log::debug!("source reached EOF");
                    self.eof = true;
                }
            }
        }
    }

    fn finish(mut packet: Vec<u8>) -> Packet {
        if packet.is_empty() {
            return Packet::Empty;
        }
        packet.shrink_to_fit();
        Packet::Data(packet)
    }

    fn finish_at_eof(packet: Vec<u8>) -> Packet {
        if packet.is_empty() {
            return Packet::Eof;
        }
        Self::finish(packet)
    }

    fn take_pending(&mut self) -> Vec<u8> {
        let pos = mem::replace(&mut self.pending_pos, 0);
        let mut pending = mem::take(&mut self.pending);
        if pos > 0 {
            pending.drain(..pos);
        }
        pending
    }

    fn retain(&mut self, bytes: Vec<u8>) {
        debug_assert!(self.buffered() == 0);
        self.pending = bytes;
        self.pending_pos = 0;
    }
}

impl<S: ByteSource> Read for PacketReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let n = {
            let available = self.fill_buf()?;
            let n = available.len().min(buf.len());
            buf[..n].copy_from_slice(&available[..n]);
            n
        };
        self.consume(n);

        Ok(n)
    }
}

impl<S: ByteSource> BufRead for PacketReader<S> {
    /// Retained bytes, or a freshly assembled packet once they run out.
    ///
    /// Blocks until at least one byte is available; empty only at EOF.
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        while self.buffered() == 0 {
            if self.eof {
                return Ok(&[]);
            }

            match self.assemble(ReadMode::NoDelay)? {
                Packet::Data(bytes) => self.retain(bytes),
                Packet::Empty => thread::yield_now(),
                Packet::Eof => return Ok(&[]),
            }
        }

        Ok(&self.pending[self.pending_pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pending_pos = (self.pending_pos + amt).min(self.pending.len());
        if self.pending_pos == self.pending.len() {
            self.pending.clear();
            self.pending_pos = 0;
        }
    }
}

/// Blocking packets from a `PacketReader` until EOF
pub struct Packets<'a, S> {
    reader: &'a mut PacketReader<S>,
}

impl<S: ByteSource> Iterator for Packets<'_, S> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_packet_mode(ReadMode::Blocking) {
                Ok(Packet::Data(bytes)) => return Some(Ok(bytes)),
                Ok(Packet::Empty) => continue,
                Ok(Packet::Eof) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
