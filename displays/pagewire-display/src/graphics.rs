//! embedded-graphics support
//!
//! Lets text, fonts and images from the embedded-graphics ecosystem render
//! into a [`Framebuffer`]. `BinaryColor::On` sets framebuffer bits.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::framebuffer::Framebuffer;

impl DrawTarget for Framebuffer<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = (i32::from(self.width()), i32::from(self.height()));

        for Pixel(Point { x, y }, color) in pixels {
            // Pixels off the display are dropped
            if (0..width).contains(&x) && (0..height).contains(&y) {
                self.set_pixel(x as u8, y as u8, color.is_on());
            }
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        if color.is_on() {
            crate::draw::fill(self, true);
        } else {
            Framebuffer::clear(self);
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer<'_> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}
