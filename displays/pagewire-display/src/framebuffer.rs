//! Page-packed framebuffer
//!
//! The controller's native layout: the display is cut into pages of 8
//! rows, and each byte holds one column of a page with bit 0 at the top.
//! Byte `page * width + x` covers rows `page * 8 ..= page * 8 + 7` of
//! column `x`.

use crate::canvas::Canvas;
use crate::error::Error;

/// Rows per page
pub const PAGE_HEIGHT: u8 = 8;

/// Bytes needed to back a `width` x `height` display
pub const fn buffer_len(width: u8, height: u8) -> usize {
    width as usize * (height / PAGE_HEIGHT) as usize
}

/// Monochrome framebuffer over caller-provided storage
#[derive(Debug)]
pub struct Framebuffer<'a> {
    buf: &'a mut [u8],
    width: u8,
    height: u8,
}

impl<'a> Framebuffer<'a> {
    /// Wrap `buf` as a `width` x `height` framebuffer
    ///
    /// `height` must be a non-zero multiple of 8 and `buf` must hold at
    /// least [`buffer_len`] bytes; any excess is left unused. The buffer
    /// contents are kept as-is.
    pub fn new(buf: &'a mut [u8], width: u8, height: u8) -> Result<Self, Error> {
        if width == 0 || height == 0 || height % PAGE_HEIGHT != 0 {
            return Err(Error::InvalidDimensions);
        }
        let len = buffer_len(width, height);
        if buf.len() < len {
            return Err(Error::InvalidDimensions);
        }
        Ok(Self {
            buf: &mut buf[..len],
            width,
            height,
        })
    }

    /// Number of 8-row pages
    pub const fn num_pages(&self) -> u8 {
        self.height / PAGE_HEIGHT
    }

    /// Width in pixels
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Byte offset of the first column of `page`
    pub fn page_offset(&self, page: u8) -> usize {
        page as usize * self.width as usize
    }

    /// One page worth of bytes (`width` bytes), or `None` past the last page
    pub fn page(&self, page: u8) -> Option<&[u8]> {
        if page >= self.num_pages() {
            return None;
        }
        let start = self.page_offset(page);
        Some(&self.buf[start..start + self.width as usize])
    }

    /// The whole buffer, page-major
    pub fn as_bytes(&self) -> &[u8] {
        self.buf
    }

    /// Clear every pixel
    pub fn clear(&mut self) {
        self.buf.fill(0);
    }

    /// Set the pixel at `(x, y)` without bounds validation
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the display.
    pub fn set_pixel(&mut self, x: u8, y: u8, on: bool) {
        let idx = self.index(x, y);
        let mask = 1u8 << (y % PAGE_HEIGHT);
        if on {
            self.buf[idx] |= mask;
        } else {
            self.buf[idx] &= !mask;
        }
    }

    /// Read the pixel at `(x, y)` without bounds validation
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the display.
    pub fn get_pixel(&self, x: u8, y: u8) -> bool {
        self.buf[self.index(x, y)] & (1 << (y % PAGE_HEIGHT)) != 0
    }

    fn index(&self, x: u8, y: u8) -> usize {
        self.page_offset(y / PAGE_HEIGHT) + x as usize
    }
}

impl Canvas for Framebuffer<'_> {
    fn width(&self) -> u8 {
        self.width
    }

    fn height(&self) -> u8 {
        self.height
    }

    fn set_pixel(&mut self, x: u8, y: u8, on: bool) {
        Framebuffer::set_pixel(self, x, y, on)
    }

    fn get_pixel(&self, x: u8, y: u8) -> bool {
        Framebuffer::get_pixel(self, x, y)
    }
}
