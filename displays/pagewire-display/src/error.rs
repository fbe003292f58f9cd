//! Driver error type
//!
//! Shared by the framebuffer, the drawing primitives and the bus driver.

use core::fmt;

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Coordinates lie outside the display, even after clamping
    OutOfBounds,
    /// Drawing parameters outside the color/fill flag combination
    InvalidParams,
    /// A bus transaction is already in flight
    Busy,
    /// Framebuffer storage or dimensions do not describe a valid display
    InvalidDimensions,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfBounds => f.write_str("coordinates out of display bounds"),
            Error::InvalidParams => f.write_str("invalid drawing parameters"),
            Error::Busy => f.write_str("bus transaction in flight"),
            Error::InvalidDimensions => f.write_str("invalid display dimensions"),
        }
    }
}
