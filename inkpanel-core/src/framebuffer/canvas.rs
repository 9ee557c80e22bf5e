//! Drawing surface handed to renderers
//!
//! A `Canvas` only lets the caller set pixels and query the logical size.
//! It borrows the framebuffer for the duration of one render call.

use super::Framebuffer;

/// Pixel-level view of a framebuffer
pub struct Canvas<'a> {
    fb: &'a mut Framebuffer,
}

impl<'a> Canvas<'a> {
    pub(super) fn new(fb: &'a mut Framebuffer) -> Self {
        Self { fb }
    }

    /// Set one pixel in logical coordinates; out of range is ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, black: bool) {
        self.fb.set_pixel(x, y, black);
    }

    /// Logical width in pixels
    ///
    /// At 90 and 270 degrees on a non-square panel the rotated area is
    /// cropped to the native one: on a 400 x 300 panel at 90 degrees,
    /// logical x below 100 is dropped.
    pub fn width(&self) -> u16 {
        self.fb.width()
    }

    /// Logical height in pixels
    pub fn height(&self) -> u16 {
        self.fb.height()
    }
}

#[cfg(feature = "graphics")]
mod graphics {
    use core::convert::Infallible;

    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_graphics::Pixel;

    use super::Canvas;

    impl OriginDimensions for Canvas<'_> {
        fn size(&self) -> Size {
            Size::new(u32::from(self.width()), u32::from(self.height()))
        }
    }

    /// `BinaryColor::On` is black ink
    impl DrawTarget for Canvas<'_> {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(Point { x, y }, colour) in pixels {
                self.set_pixel(x, y, colour.is_on());
            }
            Ok(())
        }

        fn clear(&mut self, colour: Self::Color) -> Result<(), Self::Error> {
            self.fb.fill(colour.is_on());
            Ok(())
        }
    }
}
