//! Drawing callback

use crate::framebuffer::Canvas;

/// Draws a frame onto a freshly cleared canvas
///
/// Called exactly once per update, after the buffer has been cleared to
/// white and before any data goes to the controller. The canvas must not
/// outlive the call.
pub trait Renderer {
    fn render(&mut self, canvas: &mut Canvas<'_>);
}

impl<F> Renderer for F
where
    F: FnMut(&mut Canvas<'_>),
{
    fn render(&mut self, canvas: &mut Canvas<'_>) {
        self(canvas)
    }
}

/// Leaves the canvas blank
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRenderer;

impl Renderer for NoRenderer {
    fn render(&mut self, _canvas: &mut Canvas<'_>) {}
}
