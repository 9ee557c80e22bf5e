//! Flash persistence
//!
//! The configuration is stored as postcard binary data behind a magic
//! number and a format version, so a blank or stale flash page is
//! rejected instead of misread.

use serde::{Deserialize, Serialize};

use super::types::{ConfigError, DisplayConfig};

/// Magic number to identify stored display configuration
pub const CONFIG_MAGIC: u32 = 0x4550_4443; // "EPDC"

/// Current storage format version
pub const CONFIG_VERSION: u8 = 1;

/// Upper bound on the encoded size
pub const MAX_ENCODED_LEN: usize = 16;

#[derive(Serialize, Deserialize)]
struct Stored {
    magic: u32,
    version: u8,
    config: DisplayConfig,
}

/// Serialize `config` into `buf`, returning the number of bytes used
pub fn encode(config: &DisplayConfig, buf: &mut [u8]) -> Result<usize, ConfigError> {
    let stored = Stored {
        magic: CONFIG_MAGIC,
        version: CONFIG_VERSION,
        config: *config,
    };
    let used = postcard::to_slice(&stored, buf).map_err(|_| ConfigError::BufferTooSmall)?;
    Ok(used.len())
}

/// Read a configuration written by [`encode`]
pub fn decode(bytes: &[u8]) -> Result<DisplayConfig, ConfigError> {
    let stored: Stored = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupt)?;
    if stored.magic != CONFIG_MAGIC || stored.version != CONFIG_VERSION {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "config: stored header {=u32:x} v{} rejected",
            stored.magic,
            stored.version
        );
        return Err(ConfigError::BadHeader);
    }
    Ok(stored.config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelModel;
    use crate::framebuffer::Rotation;
    use crate::state::UpdateMode;

    #[test]
    fn test_store_and_load() {
        let config = DisplayConfig::new(PanelModel::Epd5in79)
            .with_rotation(Rotation::Deg90)
            .with_full_update_every(25)
            .with_update_mode(Some(UpdateMode::Full));
        let mut buf = [0u8; MAX_ENCODED_LEN];
        let len = encode(&config, &mut buf).unwrap();
        assert!(len <= MAX_ENCODED_LEN);
        assert_eq!(decode(&buf[..len]), Ok(config));
    }

    #[test]
    fn test_erased_flash_rejected() {
        // Erased NOR flash reads back as 0xFF
        let erased = [0xFFu8; MAX_ENCODED_LEN];
        assert!(decode(&erased).is_err());
    }

    #[test]
    fn test_wrong_version_rejected() {
        let mut buf = [0u8; MAX_ENCODED_LEN];
        let len = encode(&DisplayConfig::default(), &mut buf).unwrap();
        // Magic is a varint; the version byte follows it
        let magic_len = buf.iter().position(|b| b & 0x80 == 0).unwrap() + 1;
        buf[magic_len] = CONFIG_VERSION + 1;
        assert_eq!(decode(&buf[..len]), Err(ConfigError::BadHeader));
    }

    #[test]
    fn test_small_buffer() {
        let mut buf = [0u8; 3];
        assert_eq!(
            encode(&DisplayConfig::default(), &mut buf),
            Err(ConfigError::BufferTooSmall)
        );
    }
}
