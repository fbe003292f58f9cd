//! Two-wire transaction engine
//!
//! A single transaction slot driven one byte per bus interrupt.

pub mod engine;
pub mod transaction;

pub use engine::{TwiEngine, TwiState};
pub use transaction::{command, Command, OnComplete, Payload, Transaction, COMMAND_CAPACITY};
