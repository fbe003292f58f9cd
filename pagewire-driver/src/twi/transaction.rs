//! Transaction descriptor
//!
//! One bus transaction: address, a short run of prefix bytes copied into
//! the descriptor, and an optional payload run that is read from the
//! payload source (the framebuffer) byte by byte as the transfer proceeds.

use heapless::Vec;

/// Maximum prefix length in bytes
pub const COMMAND_CAPACITY: usize = 16;

/// Prefix bytes sent ahead of the payload
pub type Command = Vec<u8, COMMAND_CAPACITY>;

/// Build a [`Command`] from a byte sequence, truncated to capacity
pub fn command(bytes: &[u8]) -> Command {
    let mut cmd = Command::new();
    for &b in bytes.iter().take(COMMAND_CAPACITY) {
        let _ = cmd.push(b);
    }
    cmd
}

/// What happens once a transaction has been fully sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OnComplete {
    /// Nothing further
    Nothing,
    /// Release the display lock
    ReleaseLock,
    /// Advance the page-refresh pipeline
    Refresh,
}

/// Payload run inside the payload source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Payload {
    /// Offset of the first byte
    pub offset: usize,
    /// Number of bytes
    pub len: usize,
}

impl Payload {
    /// No payload
    pub const NONE: Self = Self { offset: 0, len: 0 };

    /// Payload of `len` bytes starting at `offset`
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Whether there is nothing to send
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Bus transaction descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transaction {
    /// 7-bit device address
    pub address: u8,
    /// Bytes sent right after the address
    pub prefix: Command,
    /// Bytes sent after the prefix
    pub payload: Payload,
    /// Completion action
    pub on_complete: OnComplete,
    /// Fail immediately when the bus is busy instead of retrying
    pub fast_fail: bool,
}

impl Transaction {
    /// Command-only transaction with no completion action
    pub fn new(address: u8, prefix: Command) -> Self {
        Self {
            address,
            prefix,
            payload: Payload::NONE,
            on_complete: OnComplete::Nothing,
            fast_fail: true,
        }
    }

    /// Attach a payload run
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Set the completion action
    pub fn on_complete(mut self, on_complete: OnComplete) -> Self {
        self.on_complete = on_complete;
        self
    }

    /// Set the fast-fail flag
    pub fn fast_fail(mut self, fast_fail: bool) -> Self {
        self.fast_fail = fast_fail;
        self
    }

    /// Total bytes after the address
    pub fn byte_count(&self) -> usize {
        self.prefix.len() + self.payload.len
    }
}
