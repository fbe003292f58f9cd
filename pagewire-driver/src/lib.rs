//! Interrupt-driven SSD1306 OLED driver
//!
//! This crate drives a page-addressed monochrome OLED over a two-wire bus
//! without blocking on bus traffic:
//!
//! - One-slot transaction engine advanced from the bus interrupt (`twi`)
//! - Display lock shared between foreground and interrupt (`lock`)
//! - Page-by-page refresh pipeline (`pipeline`)
//! - SSD1306 command sequences (`command`)
//! - The `Oled` handle tying these to a `Framebuffer` (`oled`)
//!
//! # Usage
//!
//! ```text
//! let oled = Oled::new(twi, &mut BUF, OledConfig::default())?;
//! oled.init()?;
//!
//! let mut fb = oled.lock()?;
//! fb.put_rectangle(0, 0, 127, 63, DrawParams::BLACK)?;
//! fb.put_line(0, 0, 127, 63, DrawParams::BLACK)?;
//! fb.refresh()?;          // lock released by the interrupt when done
//!
//! oled.set_brightness(0x40)?;
//! ```
//!
//! The bus interrupt must call [`Oled::on_interrupt`].
//!
//! ## Features
//!
//! - `defmt` - logging and `defmt::Format` for public types
//! - `graphics` - `embedded-graphics` drawing via `FrameGuard::with_framebuffer`

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod lock;
#[cfg(test)]
mod mock;
pub mod oled;
pub mod pipeline;
pub mod retry;
pub mod twi;

pub use config::{OledConfig, DEFAULT_ADDRESS, MAX_PAGES};
pub use oled::{FrameGuard, Oled};
pub use retry::{Bounded, RetryPolicy, Spin};
pub use twi::{Command, OnComplete, Payload, Transaction, TwiState};

pub use pagewire_display::{Canvas, CanvasExt, DrawParams, Error, Framebuffer};
pub use pagewire_hal::{I2cConfig, TwiMaster};
