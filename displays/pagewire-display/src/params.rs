//! Drawing parameters
//!
//! A drawing call takes one color bit and one fill bit, packed the same way
//! application code has always passed them (`FILL | BLACK`).

use core::ops::BitOr;

use crate::error::Error;

/// Color and fill flags for rectangles and lines
///
/// The init sequence enables display inversion, so a set framebuffer bit
/// renders dark: [`DrawParams::BLACK`] sets bits, [`DrawParams::WHITE`]
/// clears them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawParams(u8);

impl DrawParams {
    /// Clear pixels
    pub const WHITE: Self = Self(0);
    /// Set pixels
    pub const BLACK: Self = Self(0b01);
    /// Draw only the outline
    pub const OUTLINE: Self = Self(0);
    /// Fill the shape
    pub const FILL: Self = Self(0b10);

    /// Highest valid raw value (`BLACK | FILL`)
    pub const MAX_BITS: u8 = 0b11;

    /// Validate raw flag bits
    pub const fn from_bits(bits: u8) -> Result<Self, Error> {
        if bits > Self::MAX_BITS {
            Err(Error::InvalidParams)
        } else {
            Ok(Self(bits))
        }
    }

    /// Raw flag bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Pixel state the shape is drawn with
    pub const fn color(self) -> bool {
        self.0 & Self::BLACK.0 != 0
    }

    /// Whether the shape is filled
    pub const fn is_fill(self) -> bool {
        self.0 & Self::FILL.0 != 0
    }
}

impl BitOr for DrawParams {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl TryFrom<u8> for DrawParams {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self, Error> {
        Self::from_bits(bits)
    }
}
