//! Recording bus for host tests
//!
//! Logs every request made to the peripheral and tracks whether a bus
//! event (interrupt) is pending, the way the hardware would raise one
//! after START, address and data requests but not after STOP.

extern crate std;

use std::sync::{Arc, Mutex};
use std::vec::Vec;

use pagewire_hal::{I2cConfig, TwiMaster};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Configure(u32),
    Start,
    Address(u8),
    Byte(u8),
    Stop,
}

#[derive(Debug, Default)]
struct BusLog {
    ops: Vec<BusOp>,
    pending: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockBus {
    log: Arc<Mutex<BusLog>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, op: BusOp, pending: bool) {
        let mut log = self.log.lock().unwrap();
        log.ops.push(op);
        log.pending = pending;
    }

    pub fn ops(&self) -> Vec<BusOp> {
        self.log.lock().unwrap().ops.clone()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().ops.clear();
    }

    /// Consume the pending interrupt, if any
    pub fn take_pending(&self) -> bool {
        core::mem::take(&mut self.log.lock().unwrap().pending)
    }

    /// Split the log into transactions: (address byte, bytes sent)
    pub fn transactions(&self) -> Vec<(u8, Vec<u8>)> {
        let mut out = Vec::new();
        let mut current: Option<(u8, Vec<u8>)> = None;
        for op in self.ops() {
            match op {
                BusOp::Address(a) => current = Some((a, Vec::new())),
                BusOp::Byte(b) => {
                    if let Some((_, bytes)) = current.as_mut() {
                        bytes.push(b);
                    }
                }
                BusOp::Stop => {
                    if let Some(tx) = current.take() {
                        out.push(tx);
                    }
                }
                BusOp::Configure(_) | BusOp::Start => {}
            }
        }
        out
    }
}

impl TwiMaster for MockBus {
    fn configure(&mut self, config: I2cConfig) {
        self.record(BusOp::Configure(config.frequency), false);
    }

    fn start(&mut self) {
        self.record(BusOp::Start, true);
    }

    fn write_address(&mut self, address_byte: u8) {
        self.record(BusOp::Address(address_byte), true);
    }

    fn write_byte(&mut self, byte: u8) {
        self.record(BusOp::Byte(byte), true);
    }

    fn stop(&mut self) {
        self.record(BusOp::Stop, false);
    }
}
