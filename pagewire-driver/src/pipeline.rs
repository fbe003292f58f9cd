//! Page-refresh pipeline
//!
//! Streams the framebuffer to the display as alternating transactions:
//! set-page (cursor to column 0 of the page), then write-page (one page of
//! framebuffer bytes). The pipeline is a plain state machine advanced once
//! per "transaction complete" event; it never touches the bus itself, it
//! only hands out the next transaction to schedule.

use crate::command;
use crate::twi::transaction::{OnComplete, Payload, Transaction};

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshStage {
    /// No refresh in flight
    #[default]
    Idle,
    /// A set-page transaction is on the bus
    SetPage,
    /// A write-page transaction is on the bus
    WritePage,
}

/// What to do after a pipeline transaction completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshStep {
    /// Schedule this transaction next
    Send(Transaction),
    /// Every page has been written
    Finished,
}

/// Refresh progress for one display
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshPipeline {
    address: u8,
    width: u8,
    num_pages: u8,
    /// Next page to write; meaningful only while a refresh is in flight
    cur_page: u8,
    stage: RefreshStage,
}

impl RefreshPipeline {
    /// Pipeline for a display at `address` with `num_pages` pages of
    /// `width` bytes
    pub const fn new(address: u8, width: u8, num_pages: u8) -> Self {
        Self {
            address,
            width,
            num_pages,
            cur_page: 0,
            stage: RefreshStage::Idle,
        }
    }

    /// Current stage
    pub fn stage(&self) -> RefreshStage {
        self.stage
    }

    /// Whether a refresh is in flight
    pub fn is_active(&self) -> bool {
        self.stage != RefreshStage::Idle
    }

    /// Next page to be written
    pub fn cur_page(&self) -> u8 {
        self.cur_page
    }

    /// Total pages per refresh
    pub fn num_pages(&self) -> u8 {
        self.num_pages
    }

    /// Begin a refresh from page 0, returning the first transaction
    pub fn start(&mut self) -> Transaction {
        self.cur_page = 0;
        self.stage = RefreshStage::SetPage;
        self.set_page()
    }

    /// Advance after the current transaction completed
    pub fn advance(&mut self) -> RefreshStep {
        match self.stage {
            RefreshStage::SetPage => self.write_page(),
            RefreshStage::WritePage if self.cur_page < self.num_pages => {
                self.stage = RefreshStage::SetPage;
                RefreshStep::Send(self.set_page())
            }
            RefreshStage::WritePage | RefreshStage::Idle => self.finish(),
        }
    }

    /// Drop the refresh in flight
    pub fn abort(&mut self) {
        self.stage = RefreshStage::Idle;
    }

    fn set_page(&self) -> Transaction {
        Transaction::new(self.address, command::set_page(self.cur_page))
            .on_complete(OnComplete::Refresh)
    }

    fn write_page(&mut self) -> RefreshStep {
        if self.cur_page >= self.num_pages {
            return self.finish();
        }

        let offset = self.cur_page as usize * self.width as usize;
        let tx = Transaction::new(self.address, command::data_prefix())
            .with_payload(Payload::new(offset, self.width as usize))
            .on_complete(OnComplete::Refresh);
        self.cur_page += 1;
        self.stage = RefreshStage::WritePage;
        RefreshStep::Send(tx)
    }

    fn finish(&mut self) -> RefreshStep {
        self.stage = RefreshStage::Idle;
        RefreshStep::Finished
    }
}
