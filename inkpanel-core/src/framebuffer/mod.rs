//! Packed 1-bit framebuffer
//!
//! One bit per pixel, row-major, MSB is the leftmost pixel of each byte.
//! Controller RAM polarity is inverted: a cleared bit is black, a set bit
//! is white.
//!
//! Drawing happens in logical (rotated) coordinates. Each write is mapped
//! to native panel space, mirrored if the panel addresses X from the right,
//! then bounds-checked. Anything that lands outside the panel is dropped.

mod canvas;
mod geometry;

pub use canvas::Canvas;
pub use geometry::{Geometry, Rotation};

use heapless::Vec;

/// Storage for the largest supported panel (792 x 272)
pub const MAX_FRAME_BYTES: usize = 26_928;

/// Fill byte for an all-white buffer
const WHITE: u8 = 0xFF;
/// Fill byte for an all-black buffer
const BLACK: u8 = 0x00;

/// Framebuffer for one panel
///
/// Starts unallocated; [`Framebuffer::allocate`] sizes it for the panel.
/// Every pixel operation on an unallocated buffer is a logged no-op.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    bytes: Vec<u8, MAX_FRAME_BYTES>,
    geometry: Geometry,
    rotation: Rotation,
}

impl Framebuffer {
    pub const fn new(geometry: Geometry, rotation: Rotation) -> Self {
        Self {
            bytes: Vec::new(),
            geometry,
            rotation,
        }
    }

    /// Size the buffer for the panel and clear it to white.
    ///
    /// Returns `false` if the panel does not fit in [`MAX_FRAME_BYTES`].
    pub fn allocate(&mut self) -> bool {
        self.bytes.clear();
        if self
            .bytes
            .resize(self.geometry.buffer_len(), WHITE)
            .is_err()
        {
            #[cfg(feature = "defmt")]
            defmt::error!(
                "framebuffer: {} bytes needed, capacity {}",
                self.geometry.buffer_len(),
                MAX_FRAME_BYTES
            );
            return false;
        }
        true
    }

    pub fn is_allocated(&self) -> bool {
        !self.bytes.is_empty() && self.bytes.len() == self.geometry.buffer_len()
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Logical width, after rotation
    pub fn width(&self) -> u16 {
        if self.rotation.swaps_axes() {
            self.geometry.height
        } else {
            self.geometry.width
        }
    }

    /// Logical height, after rotation
    pub fn height(&self) -> u16 {
        if self.rotation.swaps_axes() {
            self.geometry.width
        } else {
            self.geometry.height
        }
    }

    /// Raw controller RAM image
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Set every pixel to black or white
    pub fn fill(&mut self, black: bool) {
        if !self.is_allocated() {
            #[cfg(feature = "defmt")]
            defmt::warn!("framebuffer: fill before allocation");
            return;
        }
        let value = if black { BLACK } else { WHITE };
        self.bytes.iter_mut().for_each(|b| *b = value);
    }

    /// Write one pixel in logical coordinates
    pub fn set_pixel(&mut self, x: i32, y: i32, black: bool) {
        let Some((index, mask)) = self.locate(x, y) else {
            return;
        };
        let Some(byte) = self.bytes.get_mut(index) else {
            return;
        };
        if black {
            *byte &= !mask;
        } else {
            *byte |= mask;
        }
    }

    /// Read one pixel in logical coordinates, `Some(true)` if black
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        let (index, mask) = self.locate(x, y)?;
        self.bytes.get(index).map(|byte| byte & mask == 0)
    }

    /// Borrow as a drawing surface
    pub fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(self)
    }

    /// Byte index and bit mask for a logical coordinate
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if !self.is_allocated() {
            #[cfg(feature = "defmt")]
            defmt::warn!("framebuffer: pixel access before allocation");
            return None;
        }

        let w = i32::from(self.geometry.width);
        let h = i32::from(self.geometry.height);
        let (mut nx, ny) = self.rotation.apply(x, y, w, h);
        if !(0..w).contains(&nx) || !(0..h).contains(&ny) {
            return None;
        }
        if self.geometry.mirror_x {
            nx = w - 1 - nx;
        }

        // Both non-negative after the range check
        let (nx, ny) = (nx as usize, ny as usize);
        let index = (ny * w as usize + nx) / 8;
        let mask = 0x80 >> (nx % 8);
        Some((index, mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocated(geometry: Geometry, rotation: Rotation) -> Framebuffer {
        let mut fb = Framebuffer::new(geometry, rotation);
        assert!(fb.allocate());
        fb
    }

    #[test]
    fn test_allocate_clears_to_white() {
        let fb = allocated(Geometry::single(16, 4), Rotation::Deg0);
        assert_eq!(fb.as_bytes().len(), 8);
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_unallocated_is_noop() {
        let mut fb = Framebuffer::new(Geometry::single(16, 4), Rotation::Deg0);
        fb.fill(true);
        fb.set_pixel(0, 0, true);
        assert!(fb.as_bytes().is_empty());
        assert_eq!(fb.pixel(0, 0), None);
    }

    #[test]
    fn test_black_clears_msb_first() {
        let mut fb = allocated(Geometry::single(16, 2), Rotation::Deg0);
        fb.set_pixel(0, 0, true);
        assert_eq!(fb.as_bytes()[0], 0x7F);
        fb.set_pixel(9, 1, true);
        assert_eq!(fb.as_bytes()[3], 0xBF);
        fb.set_pixel(0, 0, false);
        assert_eq!(fb.as_bytes()[0], 0xFF);
    }

    #[test]
    fn test_mirror_flips_columns() {
        let mut fb = allocated(Geometry::single(16, 1).mirrored(), Rotation::Deg0);
        fb.set_pixel(0, 0, true);
        // Leftmost logical pixel lands in the last native column
        assert_eq!(fb.as_bytes(), &[0xFF, 0xFE]);
    }

    #[test]
    fn test_fill_overwrites_everything() {
        let mut fb = allocated(Geometry::single(16, 2), Rotation::Deg0);
        fb.set_pixel(3, 1, true);
        fb.fill(false);
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
        fb.fill(true);
        assert!(fb.as_bytes().iter().all(|&b| b == 0x00));
        fb.fill(true);
        assert!(fb.as_bytes().iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_logical_dimensions_swap() {
        let fb = Framebuffer::new(Geometry::cascade(792, 272), Rotation::Deg90);
        assert_eq!((fb.width(), fb.height()), (272, 792));
        let fb = Framebuffer::new(Geometry::cascade(792, 272), Rotation::Deg180);
        assert_eq!((fb.width(), fb.height()), (792, 272));
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut fb = allocated(Geometry::single(16, 2), Rotation::Deg0);
        for (x, y) in [(-1, 0), (0, -1), (16, 0), (0, 2), (i32::MAX, i32::MIN)] {
            fb.set_pixel(x, y, true);
        }
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn rotation() -> impl Strategy<Value = Rotation> {
            prop_oneof![
                Just(Rotation::Deg0),
                Just(Rotation::Deg90),
                Just(Rotation::Deg180),
                Just(Rotation::Deg270),
            ]
        }

        proptest! {
            #[test]
            fn pixel_reads_back(
                rotation in rotation(),
                mirror in any::<bool>(),
                x in -4i32..44,
                y in -4i32..44,
                black in any::<bool>(),
            ) {
                let geometry = Geometry::single(40, 24);
                let geometry = if mirror { geometry.mirrored() } else { geometry };
                let mut fb = allocated(geometry, rotation);
                fb.fill(!black);
                let before = fb.as_bytes().to_vec();

                fb.set_pixel(x, y, black);

                match fb.pixel(x, y) {
                    Some(read) => {
                        prop_assert_eq!(read, black);
                        let changed = before
                            .iter()
                            .zip(fb.as_bytes())
                            .map(|(a, b)| (a ^ b).count_ones())
                            .sum::<u32>();
                        prop_assert_eq!(changed, 1);
                    }
                    None => prop_assert_eq!(&before[..], fb.as_bytes()),
                }
            }
        }
    }
}
