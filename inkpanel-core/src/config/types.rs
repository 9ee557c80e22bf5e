//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::framebuffer::{Geometry, Rotation};
use crate::state::{UpdateMode, UpdatePolicy, DEFAULT_FULL_UPDATE_EVERY};

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown section header
    InvalidSection,
    /// Unknown key in a known section
    UnknownKey,
    /// Value of the wrong type or out of range
    InvalidValue,
    /// Unknown panel model name
    UnknownModel,
    /// Rotation not one of 0, 90, 180, 270
    InvalidRotation,
    /// Output buffer too small
    BufferTooSmall,
    /// Stored data has the wrong magic or version
    BadHeader,
    /// Stored data could not be decoded
    Corrupt,
}

/// Supported panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PanelModel {
    /// 4.2", 400 x 300, one controller
    #[default]
    Epd4in2,
    /// 5.79", 792 x 272, two cascaded controllers
    Epd5in79,
}

impl PanelModel {
    /// Name used in configuration files
    pub const fn name(self) -> &'static str {
        match self {
            PanelModel::Epd4in2 => "4.2in",
            PanelModel::Epd5in79 => "5.79in",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "4.2in" | "4.20in" => Some(PanelModel::Epd4in2),
            "5.79in" => Some(PanelModel::Epd5in79),
            _ => None,
        }
    }

    /// Native panel layout
    pub const fn geometry(self) -> Geometry {
        match self {
            PanelModel::Epd4in2 => Geometry::single(400, 300).mirrored(),
            PanelModel::Epd5in79 => Geometry::cascade(792, 272).mirrored(),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Panel model
    pub model: PanelModel,
    /// Logical rotation
    pub rotation: Rotation,
    /// Every Nth update is a full refresh
    pub full_update_every: u16,
    /// Forced refresh mode; `None` follows the cadence
    pub update_mode: Option<UpdateMode>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            model: PanelModel::default(),
            rotation: Rotation::Deg0,
            full_update_every: DEFAULT_FULL_UPDATE_EVERY,
            update_mode: None,
        }
    }
}

impl DisplayConfig {
    pub fn new(model: PanelModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_full_update_every(mut self, every: u16) -> Self {
        self.full_update_every = every;
        self
    }

    pub fn with_update_mode(mut self, mode: Option<UpdateMode>) -> Self {
        self.update_mode = mode;
        self
    }

    /// Cadence policy for this configuration
    pub fn policy(&self) -> UpdatePolicy {
        UpdatePolicy::new(self.full_update_every, self.update_mode)
    }
}
