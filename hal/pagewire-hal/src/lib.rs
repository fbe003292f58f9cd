//! pagewire Hardware Abstraction Layer
//!
//! This crate defines the bus trait that chip-specific code implements so
//! the same display driver runs on any microcontroller with a two-wire
//! peripheral and an interrupt for it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (draws, calls refresh)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pagewire-driver (FSM, refresh pipeline)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pagewire-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chip register access (per board)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`twi::TwiMaster`] - Interrupt-driven, byte-at-a-time bus master

#![no_std]
#![deny(unsafe_code)]

pub mod twi;

// Re-export key types at crate root for convenience
pub use twi::{write_address_byte, I2cConfig, TwiMaster};
