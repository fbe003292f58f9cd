//! Framebuffer and drawing primitives for pagewire
//!
//! This crate provides:
//! - `Framebuffer`, a page-packed 1 bit-per-pixel buffer over caller storage
//! - `Canvas`/`CanvasExt`, the pixel primitive and the checked shape API
//! - Rectangle and line rasterization (`draw`)
//! - `DrawParams` color/fill flags and the shared `Error` type
//!
//! # Architecture
//!
//! Nothing here touches hardware. The bus driver (`pagewire-driver`) owns a
//! `Framebuffer`, hands out access to it while no refresh is in flight, and
//! streams its pages to the display.
//!
//! ## Features
//!
//! - `graphics` - `embedded-graphics` `DrawTarget` for `Framebuffer`
//! - `defmt` - `defmt::Format` for public types

#![no_std]
#![deny(unsafe_code)]

pub mod canvas;
pub mod draw;
pub mod error;
pub mod framebuffer;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod params;

// Re-export key types
pub use canvas::{Canvas, CanvasExt};
pub use error::Error;
pub use framebuffer::{buffer_len, Framebuffer, PAGE_HEIGHT};
pub use params::DrawParams;
