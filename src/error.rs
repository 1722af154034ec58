//! Error types
//!
//! Kegagalan dari source selalu `std::io::Error` dan diteruskan apa adanya
//! oleh semua method read. Tipe di sini hanya untuk konstruksi dan untuk
//! caller yang menggabungkan keduanya.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Invalid reader configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("packet size must be positive")]
    ZeroPacketSize,
    #[error("packet size too large: {size} bytes (max {max})")]
    PacketTooLarge { size: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
