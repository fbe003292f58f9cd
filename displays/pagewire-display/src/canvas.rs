//! Canvas traits
//!
//! [`Canvas`] is the single-pixel primitive every drawing routine is built
//! on; [`CanvasExt`] layers the checked shape API on top of it.

use crate::draw;
use crate::error::Error;
use crate::params::DrawParams;

/// Pixel-addressable monochrome surface
///
/// Implementations do not bounds-check; callers stay inside
/// `[0, width) x [0, height)`.
pub trait Canvas {
    /// Width in pixels
    fn width(&self) -> u8;

    /// Height in pixels
    fn height(&self) -> u8;

    /// Set (`true`) or clear (`false`) one pixel
    fn set_pixel(&mut self, x: u8, y: u8, on: bool);

    /// Read back one pixel
    fn get_pixel(&self, x: u8, y: u8) -> bool;
}

/// Checked drawing operations for any [`Canvas`]
pub trait CanvasExt: Canvas {
    /// Set or clear a pixel, rejecting out-of-range coordinates
    fn put_pixel(&mut self, x: u8, y: u8, on: bool) -> Result<(), Error> {
        draw::put_pixel(self, x, y, on)
    }

    /// Draw a rectangle between two corners
    fn put_rectangle(
        &mut self,
        x0: u8,
        y0: u8,
        x1: u8,
        y1: u8,
        params: DrawParams,
    ) -> Result<(), Error> {
        draw::put_rectangle(self, x0, y0, x1, y1, params)
    }

    /// Draw a line between two points
    fn put_line(
        &mut self,
        x0: u8,
        y0: u8,
        x1: u8,
        y1: u8,
        params: DrawParams,
    ) -> Result<(), Error> {
        draw::put_line(self, x0, y0, x1, y1, params)
    }

    /// Set every pixel to `on`
    fn fill(&mut self, on: bool) {
        draw::fill(self, on)
    }
}

// Blanket implementation for all Canvas types
impl<T: Canvas + ?Sized> CanvasExt for T {}
