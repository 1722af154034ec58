//! Core module: packet assembly dan PacketReader
//!
//! Prinsip desain:
//! - Satu primitive (`read_packet_from`) untuk kebijakan short read
//! - Setiap packet yang dikembalikan adalah buffer milik caller sendiri
//! - EOF bersifat terminal dan konsisten di semua mode baca

mod packet;
mod reader;

pub use packet::{read_packet_from, Packet, ReadMode, EMPTY_PACKET};
pub use reader::{PacketReader, Packets};
