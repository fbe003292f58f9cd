//! Interrupt-driven transaction engine
//!
//! Moves exactly one byte per bus interrupt. [`TwiEngine::schedule`] only
//! starts a transaction when the engine is idle; [`TwiEngine::on_interrupt`]
//! is the state machine the bus interrupt handler runs.
//!
//! ```text
//!   schedule ──► SlaveAddress ──┬──► WritePrefix ──┬──► WriteByte ──┐
//!                               │                  │                │
//!                               ├──────────────────┼───► WriteByte  │
//!                               │                  ▼                ▼
//!                               └────────────────► Stop ◄───────────┘
//!                                                   │
//!                                            STOP + completion
//!                                                   ▼
//!                                                  Idle
//! ```
//!
//! The engine itself is not synchronized; the display handle keeps it in a
//! critical-section mutex shared with the interrupt handler.

use pagewire_hal::{write_address_byte, I2cConfig, TwiMaster};

use super::transaction::{OnComplete, Transaction};

/// Transaction engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwiState {
    /// No transaction in flight
    #[default]
    Idle,
    /// Last byte sent, STOP and completion on the next event
    Stop,
    /// START requested, address byte goes out on the next event
    SlaveAddress,
    /// Sending prefix bytes
    WritePrefix,
    /// Sending payload bytes
    WriteByte,
}

/// Single-slot transaction engine over a byte-level bus
#[derive(Debug)]
pub struct TwiEngine<T> {
    bus: T,
    state: TwiState,
    current: Option<Transaction>,
    /// Prefix bytes already loaded
    prefix_sent: usize,
    /// Payload bytes already loaded
    payload_sent: usize,
}

impl<T: TwiMaster> TwiEngine<T> {
    /// Create an idle engine
    pub const fn new(bus: T) -> Self {
        Self {
            bus,
            state: TwiState::Idle,
            current: None,
            prefix_sent: 0,
            payload_sent: 0,
        }
    }

    /// Configure the bus and reset the engine to idle
    pub fn configure(&mut self, config: I2cConfig) {
        self.state = TwiState::Idle;
        self.current = None;
        self.bus.configure(config);
    }

    /// Current state
    pub fn state(&self) -> TwiState {
        self.state
    }

    /// Whether a new transaction would be accepted
    pub fn is_idle(&self) -> bool {
        self.state == TwiState::Idle
    }

    /// The transaction in flight
    pub fn current(&self) -> Option<&Transaction> {
        self.current.as_ref()
    }

    /// The underlying bus
    pub fn bus(&self) -> &T {
        &self.bus
    }

    /// Mutable access to the underlying bus
    pub fn bus_mut(&mut self) -> &mut T {
        &mut self.bus
    }

    /// Start `transaction` if the engine is idle
    ///
    /// On success the descriptor is stored and a START condition is
    /// requested. When a transaction is already in flight nothing changes
    /// and the rejected descriptor is handed back.
    pub fn schedule(&mut self, transaction: Transaction) -> Result<(), Transaction> {
        if self.state != TwiState::Idle {
            return Err(transaction);
        }

        self.prefix_sent = 0;
        self.payload_sent = 0;
        self.current = Some(transaction);
        self.state = TwiState::SlaveAddress;
        self.bus.start();
        Ok(())
    }

    /// Advance the transaction by one bus event
    ///
    /// `payload_source` is the buffer the payload run indexes into. Returns
    /// the completion action once the transaction has finished; the engine
    /// is already idle at that point, so the caller may schedule the next
    /// transaction straight away.
    pub fn on_interrupt(&mut self, payload_source: &[u8]) -> Option<OnComplete> {
        if matches!(self.state, TwiState::Idle | TwiState::Stop) {
            self.bus.stop();
            self.state = TwiState::Idle;
            return self.current.take().map(|tx| tx.on_complete);
        }

        let Some(tx) = self.current.as_ref() else {
            // Mid-transfer state with nothing in flight
            self.bus.stop();
            self.state = TwiState::Idle;
            return None;
        };

        match self.state {
            TwiState::SlaveAddress => {
                self.bus.write_address(write_address_byte(tx.address));
                self.state = if !tx.prefix.is_empty() {
                    TwiState::WritePrefix
                } else if !tx.payload.is_empty() {
                    TwiState::WriteByte
                } else {
                    TwiState::Stop
                };
            }
            TwiState::WritePrefix => {
                self.bus.write_byte(tx.prefix[self.prefix_sent]);
                self.prefix_sent += 1;
                if self.prefix_sent >= tx.prefix.len() {
                    self.state = if tx.payload.is_empty() {
                        TwiState::Stop
                    } else {
                        TwiState::WriteByte
                    };
                }
            }
            TwiState::WriteByte => {
                let idx = tx.payload.offset + self.payload_sent;
                debug_assert!(idx < payload_source.len());
                self.bus
                    .write_byte(payload_source.get(idx).copied().unwrap_or_default());
                self.payload_sent += 1;
                if self.payload_sent >= tx.payload.len {
                    self.state = TwiState::Stop;
                }
            }
            TwiState::Idle | TwiState::Stop => {}
        }

        None
    }
}
