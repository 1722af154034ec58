//! Reader configuration
//!
//! Ukuran packet dan mode no-delay ditetapkan saat konstruksi,
//! tidak bisa diubah setelahnya.

use crate::error::ConfigError;

/// Target size of packets returned by packet reads
pub const DEFAULT_PACKET_SIZE: usize = 1024;

/// Upper bound on packet size (16 MB) to keep a single packet allocation sane
pub const MAX_PACKET_SIZE: usize = 16 * 1024 * 1024;

/// PacketReader configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Target packet size in bytes
    pub packet_size: usize,
    /// Accept partial packets when the mode is not given at call time.
    /// Partial reads mean more source calls but lower latency per packet.
    pub no_delay: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            packet_size: DEFAULT_PACKET_SIZE,
            no_delay: false,
        }
    }
}

impl ReaderConfig {
    pub fn new(packet_size: usize, no_delay: bool) -> Self {
        Self {
            packet_size,
            no_delay,
        }
    }

    pub fn packet_size(mut self, packet_size: usize) -> Self {
        self.packet_size = packet_size;
        self
    }

    pub fn no_delay(mut self, no_delay: bool) -> Self {
        self.no_delay = no_delay;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.packet_size == 0 {
            return Err(ConfigError::ZeroPacketSize);
        }
        if self.packet_size > MAX_PACKET_SIZE {
            return Err(ConfigError::PacketTooLarge {
                size: self.packet_size,
                max: MAX_PACKET_SIZE,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.packet_size, 1024);
        assert!(!config.no_delay);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ReaderConfig::default().packet_size(64).no_delay(true);
        assert_eq!(config, ReaderConfig::new(64, true));
    }

    #[test]
    fn test_validate_bounds() {
        assert_eq!(
            ReaderConfig::new(0, false).validate(),
            Err(ConfigError::ZeroPacketSize)
        );
        assert_eq!(
            ReaderConfig::new(MAX_PACKET_SIZE + 1, false).validate(),
            Err(ConfigError::PacketTooLarge {
                size: MAX_PACKET_SIZE + 1,
                max: MAX_PACKET_SIZE,
            })
        );
        assert!(ReaderConfig::new(MAX_PACKET_SIZE, false).validate().is_ok());
        assert!(ReaderConfig::new(1, true).validate().is_ok());
    }
}
