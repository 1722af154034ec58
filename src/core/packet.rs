//! Packet model dan primitive perakitan packet
//!
//! Satu-satunya tempat kebijakan "short read → buffer seukuran data" berada.
//! Semua mode baca di `PacketReader` dibangun di atas `read_packet_from`.

use std::io;

use crate::source::{ByteSource, Fill};

/// Canonical empty packet: no data available right now, not EOF
pub const EMPTY_PACKET: &[u8] = &[];

/// Hasil satu operasi baca packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// `1..=packet_size` bytes, exclusively owned by the caller
    Data(Vec<u8>),
    /// Tidak ada data saat ini, tapi belum EOF
    Empty,
    /// Stream habis, tidak akan ada packet lagi
    Eof,
}

impl Packet {
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        matches!(self, Packet::Eof)
    }

    /// `true` for `Empty` and `Eof`
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        match self {
            Packet::Data(bytes) => bytes.len(),
            Packet::Empty | Packet::Eof => 0,
        }
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Packet::Data(bytes) => bytes.as_slice(),
            Packet::Empty | Packet::Eof => EMPTY_PACKET,
        }
    }

    /// Owned bytes, or `None` at EOF
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Packet::Data(bytes) => Some(bytes),
            Packet::Empty => Some(Vec::new()),
            Packet::Eof => None,
        }
    }
}

/// Read discipline for a single packet read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Tunggu sampai packet penuh atau EOF
    Blocking,
    /// Kembalikan apa pun yang tersedia (bisa 0 bytes)
    NoDelay,
}

impl ReadMode {
    #[inline(always)]
    pub fn from_partial(read_partial: bool) -> Self {
        if read_partial {
            ReadMode::NoDelay
        } else {
            ReadMode::Blocking
        }
    }

    #[inline(always)]
    pub fn is_partial(self) -> bool {
        self == ReadMode::NoDelay
    }
}

impl From<bool> for ReadMode {
    fn from(read_partial: bool) -> Self {
        Self::from_partial(read_partial)
    }
}

/// Reads one packet from `source` into `packet`.
///
/// Exactly one `read_into` attempt sized to `packet.len()`:
/// - full read: `packet` itself is returned (same allocation)
/// - short read: a new buffer of exactly the bytes read is returned
/// - nothing available: `Packet::Empty`
/// - end of stream: `Packet::Eof`
///
/// A zero-length `packet` yields `Packet::Empty` without touching the source.
/// Source errors are returned unchanged.
pub fn read_packet_from<S>(source: &mut S, mut packet: Vec<u8>) -> io::Result<Packet>
where
    S: ByteSource + ?Sized,
{
    if packet.is_empty() {
        return Ok(Packet::Empty);
    }

    match source.read_into(&mut packet)? {
        Fill::Bytes(0) | Fill::Nothing => Ok(Packet::Empty),
        Fill::Bytes(read_len) if read_len >= packet.len() => Ok(Packet::Data(packet)),
        Fill::Bytes(read_len) => {
            log::trace!("short read: {} of {} bytes", read_len, packet.len());
            // Shrink buffer untuk output, buffer asli tidak pernah dikembalikan setengah terisi
            Ok(Packet::Data(packet[..read_len].to_vec()))
        }
        Fill::Eof => Ok(Packet::Eof),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ScriptedSource, Step};

    #[test]
    fn test_full_read_returns_same_buffer() {
        let mut source = ScriptedSource::new(vec![Step::bytes(b"0123456789")]);
        let packet = vec![0u8; 10];
        let ptr = packet.as_ptr();

        match read_packet_from(&mut source, packet).unwrap() {
            Packet::Data(bytes) => {
                assert_eq!(bytes, b"0123456789");
                assert_eq!(bytes.as_ptr(), ptr);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_short_read_allocates_exact_buffer() {
        let mut source = ScriptedSource::new(vec![Step::bytes(b"abcd")]);
        let packet = vec![0xFFu8; 10];
        let ptr = packet.as_ptr();

        match read_packet_from(&mut source, packet).unwrap() {
            Packet::Data(bytes) => {
                assert_eq!(bytes, b"abcd");
                assert_eq!(bytes.len(), 4);
                assert_ne!(bytes.as_ptr(), ptr);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_nothing_available_is_empty_packet() {
        let mut source = ScriptedSource::new(vec![Step::Nothing, Step::bytes(b"x")]);
        let packet = read_packet_from(&mut source, vec![0u8; 10]).unwrap();

        assert_eq!(packet, Packet::Empty);
        assert!(!packet.is_eof());
        assert_eq!(packet.as_bytes(), EMPTY_PACKET);
        assert_eq!(packet.into_bytes(), Some(Vec::new()));
    }

    #[test]
    fn test_eof_is_no_packet() {
        let mut source = ScriptedSource::new(Vec::new());
        let packet = read_packet_from(&mut source, vec![0u8; 10]).unwrap();

        assert!(packet.is_eof());
        assert!(packet.is_empty());
        assert_eq!(packet.into_bytes(), None);
    }

    #[test]
    fn test_zero_length_destination_skips_source() {
        let mut source = ScriptedSource::new(vec![Step::bytes(b"abc")]);
        let packet = read_packet_from(&mut source, Vec::new()).unwrap();

        assert_eq!(packet, Packet::Empty);
        assert_eq!(source.reads(), 0);
    }

    #[test]
    fn test_source_error_propagates() {
        let mut source = ScriptedSource::new(vec![Step::error(io::ErrorKind::BrokenPipe)]);
        let err = read_packet_from(&mut source, vec![0u8; 4]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_read_mode_from_flag() {
        assert_eq!(ReadMode::from(true), ReadMode::NoDelay);
        assert_eq!(ReadMode::from(false), ReadMode::Blocking);
        assert!(ReadMode::NoDelay.is_partial());
        assert!(!ReadMode::Blocking.is_partial());
    }
}
