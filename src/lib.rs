//! Kurir - Packet-oriented reader over arbitrary byte sources
//!
//! Arsitektur:
//! - Core: `PacketReader` merakit byte stream menjadi packets berukuran tetap
//! - Source: `ByteSource` trait + adapters (io::Read, mmap, scripted)
//! - Network: socket source non-blocking (unix)
//!
//! Dua disiplin baca:
//! - Blocking: tunggu sampai packet penuh atau EOF
//! - No-delay: kembalikan apa yang tersedia sekarang, mungkin 0 bytes
//!
//! ```
//! use kurir::{Packet, PacketReader};
//!
//! let mut reader = PacketReader::with_packet_size(
//!     kurir::source::ReadSource::new(&b"hello world"[..]),
//!     4,
//!     false,
//! )
//! .unwrap();
//!
//! let mut total = 0;
//! while let Packet::Data(bytes) = reader.read_packet(false).unwrap() {
//!     assert!(bytes.len() <= 4);
//!     total += bytes.len();
//! }
//! assert_eq!(total, 11);
//! ```

pub mod config;
pub mod core;
pub mod error;
#[cfg(unix)]
pub mod network;
pub mod source;

pub use crate::config::{ReaderConfig, DEFAULT_PACKET_SIZE, MAX_PACKET_SIZE};
pub use crate::core::{read_packet_from, Packet, PacketReader, Packets, ReadMode, EMPTY_PACKET};
pub use crate::error::{ConfigError, Error, Result};
pub use crate::source::{ByteSource, Fill};
