//! Two-wire (I2C/TWI) bus abstractions
//!
//! Unlike a blocking `write(address, bytes)` master, the driver moves one
//! byte per bus interrupt. Chip-specific HALs implement [`TwiMaster`] by
//! poking the peripheral's control and data registers; the transaction
//! engine in `pagewire-driver` decides which operation comes next.

/// Byte-level two-wire bus master
///
/// Every method only *requests* a bus condition and returns immediately.
/// Completion of each request is reported by the peripheral's interrupt,
/// which the application forwards to the driver.
pub trait TwiMaster {
    /// Configure the peripheral for the given bus frequency and enable its
    /// interrupt
    ///
    /// Clock divider arithmetic lives here, per chip.
    fn configure(&mut self, config: I2cConfig);

    /// Request a START condition
    fn start(&mut self);

    /// Load the address byte (7-bit address shifted left, R/W bit in bit 0)
    /// and clear the pending START request
    fn write_address(&mut self, address_byte: u8);

    /// Load the next data byte and continue the transfer
    fn write_byte(&mut self, byte: u8);

    /// Request a STOP condition
    fn stop(&mut self);
}

impl<T: TwiMaster + ?Sized> TwiMaster for &mut T {
    fn configure(&mut self, config: I2cConfig) {
        T::configure(self, config)
    }

    fn start(&mut self) {
        T::start(self)
    }

    fn write_address(&mut self, address_byte: u8) {
        T::write_address(self, address_byte)
    }

    fn write_byte(&mut self, byte: u8) {
        T::write_byte(self, byte)
    }

    fn stop(&mut self) {
        T::stop(self)
    }
}

/// Build the address byte for a write transfer to a 7-bit address
pub const fn write_address_byte(address: u8) -> u8 {
    (address & 0x7F) << 1
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };

    /// Custom bus frequency
    pub const fn with_frequency(frequency: u32) -> Self {
        Self { frequency }
    }
}
