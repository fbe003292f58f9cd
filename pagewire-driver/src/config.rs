//! Display configuration
//!
//! Panel geometry, bus address and bus speed, fixed for the lifetime of a
//! display handle.

use pagewire_display::{buffer_len, Error, PAGE_HEIGHT};
use pagewire_hal::I2cConfig;

/// Default SSD1306 bus address (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Pages the controller can address (`0xB0..=0xB7`)
pub const MAX_PAGES: u8 = 8;

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OledConfig {
    /// Width in pixels
    pub width: u8,
    /// Height in pixels (multiple of 8, at most 64)
    pub height: u8,
    /// 7-bit bus address
    pub address: u8,
    /// Bus configuration
    pub bus: I2cConfig,
}

impl Default for OledConfig {
    fn default() -> Self {
        Self::SSD1306_128X64
    }
}

impl OledConfig {
    /// 128x64 SSD1306 module
    pub const SSD1306_128X64: Self = Self {
        width: 128,
        height: 64,
        address: DEFAULT_ADDRESS,
        bus: I2cConfig::STANDARD,
    };

    /// 128x32 SSD1306 module
    pub const SSD1306_128X32: Self = Self {
        width: 128,
        height: 32,
        address: DEFAULT_ADDRESS,
        bus: I2cConfig::STANDARD,
    };

    /// Use a different bus address
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Use a different bus configuration
    pub const fn with_bus(mut self, bus: I2cConfig) -> Self {
        self.bus = bus;
        self
    }

    /// Number of 8-row pages
    pub const fn num_pages(&self) -> u8 {
        self.height / PAGE_HEIGHT
    }

    /// Framebuffer bytes this display needs
    pub const fn buffer_len(&self) -> usize {
        buffer_len(self.width, self.height)
    }

    /// Check geometry and address
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0
            || self.height == 0
            || self.height % PAGE_HEIGHT != 0
            || self.num_pages() > MAX_PAGES
        {
            return Err(Error::InvalidDimensions);
        }
        if self.address > 0x7F {
            return Err(Error::InvalidParams);
        }
        Ok(())
    }
}
