//! SSD1306 bus byte sequences
//!
//! Every command byte is preceded by a control byte (`0x80`: one command
//! byte follows). Pixel data is preceded by the data control byte `0x40`
//! and runs until STOP.

use crate::twi::transaction::{command, Command};

/// SSD1306 command and control bytes
pub mod cmd {
    /// Control byte: single command byte follows
    pub const CONTROL_COMMAND: u8 = 0x80;
    /// Control byte: data bytes follow until STOP
    pub const CONTROL_DATA: u8 = 0x40;

    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const CHARGE_PUMP_ON: u8 = 0x14;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    /// Page address; low 3 bits select the page
    pub const SET_PAGE_ADDR: u8 = 0xB0;
}

use cmd::CONTROL_COMMAND as C;

/// Power-up sequence: charge pump on, display on, full brightness,
/// inverted
#[rustfmt::skip]
pub const INIT_SEQUENCE: [u8; 12] = [
    C, cmd::SET_CHARGE_PUMP, C, cmd::CHARGE_PUMP_ON,
    C, cmd::DISPLAY_ON,
    C, cmd::SET_CONTRAST, C, 0xFF,
    C, cmd::SET_INVERSE,
];

/// Prefix of a page data write
pub const DATA_PREFIX: [u8; 1] = [cmd::CONTROL_DATA];

/// Power-up sequence
pub fn init() -> Command {
    command(&INIT_SEQUENCE)
}

/// Move the write cursor to column 0 of `page`
pub fn set_page(page: u8) -> Command {
    command(&[
        C,
        cmd::SET_LOW_COLUMN,
        C,
        cmd::SET_HIGH_COLUMN,
        C,
        cmd::SET_PAGE_ADDR | (page & 0x07),
    ])
}

/// Set brightness (contrast) to `level`
pub fn brightness(level: u8) -> Command {
    command(&[C, cmd::SET_CONTRAST, C, level])
}

/// Turn the panel on or off; the display RAM is kept
pub fn display_on(on: bool) -> Command {
    command(&[C, if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF }])
}

/// Select inverted or normal pixel polarity
pub fn inverted(inverted: bool) -> Command {
    command(&[C, if inverted { cmd::SET_INVERSE } else { cmd::SET_NORMAL }])
}

/// Data control prefix
pub fn data_prefix() -> Command {
    command(&DATA_PREFIX)
}
