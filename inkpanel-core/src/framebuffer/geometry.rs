//! Panel geometry and rotation

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed physical layout of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    /// Native width in pixels
    pub width: u16,
    /// Native height in pixels
    pub height: u16,
    /// Number of chained controller chips (1 or 2)
    pub controllers: u8,
    /// Controller RAM counts X from the right edge
    pub mirror_x: bool,
}

impl Geometry {
    /// Single-controller panel
    pub const fn single(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            controllers: 1,
            mirror_x: false,
        }
    }

    /// Panel driven by a primary and a secondary controller
    pub const fn cascade(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            controllers: 2,
            mirror_x: false,
        }
    }

    /// Same panel with the X axis mirrored in controller RAM
    pub const fn mirrored(self) -> Self {
        Self {
            mirror_x: true,
            ..self
        }
    }

    /// Bytes per native row
    pub const fn width_bytes(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Size of the packed 1-bit buffer
    pub const fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize / 8
    }

    pub const fn is_cascade(&self) -> bool {
        self.controllers > 1
    }
}

/// Clockwise rotation of the logical drawing space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse a rotation given in degrees
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether logical width and height are swapped
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Map a logical coordinate to native panel space.
    ///
    /// `width` and `height` are the native dimensions. The result may lie
    /// outside the panel; callers bounds-check it.
    pub const fn apply(self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
        match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (y, (width - 1).saturating_sub(x)),
            Rotation::Deg180 => (
                (width - 1).saturating_sub(x),
                (height - 1).saturating_sub(y),
            ),
            Rotation::Deg270 => ((height - 1).saturating_sub(y), x),
        }
    }
}
